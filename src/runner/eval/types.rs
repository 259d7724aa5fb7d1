//! Core types for the evaluation engine.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::lex_env::JsLexEnvironmentType;
use crate::runner::ds::value::JsValue;

/// Completion record type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompletionType {
    /// Normal completion - execution continues.
    Normal,
    /// Return completion - function returns.
    Return,
}

/// Completion record.
/// Every statement evaluation returns a completion record.
pub struct Completion {
    pub completion_type: CompletionType,
    /// The value, if any.
    pub value: Option<JsValue>,
}

impl Completion {
    /// Create a normal completion with no value.
    pub fn normal() -> Self {
        Completion {
            completion_type: CompletionType::Normal,
            value: None,
        }
    }

    /// Create a normal completion with a value.
    pub fn normal_with_value(value: JsValue) -> Self {
        Completion {
            completion_type: CompletionType::Normal,
            value: Some(value),
        }
    }

    /// Create a return completion.
    pub fn return_value(value: JsValue) -> Self {
        Completion {
            completion_type: CompletionType::Return,
            value: Some(value),
        }
    }

    pub fn is_normal(&self) -> bool {
        self.completion_type == CompletionType::Normal
    }

    /// Check if this is an abrupt completion (not normal).
    pub fn is_abrupt(&self) -> bool {
        !self.is_normal()
    }

    /// Get the value, or undefined if none.
    pub fn get_value(&self) -> JsValue {
        self.value.clone().unwrap_or(JsValue::Undefined)
    }

    /// Fill in the value of a normal completion that has none.
    pub fn update_empty(self, value: Option<JsValue>) -> Self {
        if self.value.is_none() {
            Completion { value, ..self }
        } else {
            self
        }
    }
}

/// What an identifier or member expression designates.
#[derive(Clone)]
pub enum ReferenceBase {
    /// Property of an object (or of a primitive, for reads).
    Object(JsValue),
    /// Binding in the scope that was found to hold it.
    Environment(JsLexEnvironmentType),
    /// No scope on the chain binds the name.
    Unresolvable,
}

#[derive(Clone)]
pub struct Reference {
    pub base: ReferenceBase,
    pub referenced_name: String,
}

impl Reference {
    pub fn property(base: JsValue, name: impl Into<String>) -> Self {
        Reference {
            base: ReferenceBase::Object(base),
            referenced_name: name.into(),
        }
    }

    pub fn environment(env: JsLexEnvironmentType, name: impl Into<String>) -> Self {
        Reference {
            base: ReferenceBase::Environment(env),
            referenced_name: name.into(),
        }
    }

    pub fn unresolvable(name: impl Into<String>) -> Self {
        Reference {
            base: ReferenceBase::Unresolvable,
            referenced_name: name.into(),
        }
    }

    pub fn is_property_reference(&self) -> bool {
        matches!(self.base, ReferenceBase::Object(_))
    }

    pub fn is_unresolvable(&self) -> bool {
        matches!(self.base, ReferenceBase::Unresolvable)
    }

    /// Receiver for a call through this reference: the base object for
    /// property references, none otherwise.
    pub fn get_this_value(&self) -> Option<JsValue> {
        match &self.base {
            ReferenceBase::Object(base) => Some(base.clone()),
            _ => None,
        }
    }
}

/// Result type for evaluation operations.
pub type EvalResult = Result<Completion, JErrorType>;

/// Result type for value-returning operations.
pub type ValueResult = Result<JsValue, JErrorType>;

/// Result type for reference-returning operations.
pub type ReferenceResult = Result<Reference, JErrorType>;
