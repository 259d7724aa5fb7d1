//! Expectations and matchers.
//!
//! Scripts reach these through `expect(actual)`, which returns an object
//! carrying one method per matcher plus a `not` object with the negated
//! forms. Native examples use [`expect`] directly.

use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::operations::object::set_property;
use crate::runner::ds::operations::test_and_comparison::{deep_equals, same_value};
use crate::runner::ds::operations::type_conversion::to_boolean;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::{BuiltInFn, EvalContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    ToBe,
    ToEqual,
    ToBeTruthy,
    ToBeFalsy,
    ToBeUndefined,
    ToBeDefined,
}

pub const ALL_MATCHERS: [Matcher; 6] = [
    Matcher::ToBe,
    Matcher::ToEqual,
    Matcher::ToBeTruthy,
    Matcher::ToBeFalsy,
    Matcher::ToBeUndefined,
    Matcher::ToBeDefined,
];

impl Matcher {
    /// Method name on the expectation object.
    pub fn name(&self) -> &'static str {
        match self {
            Matcher::ToBe => "toBe",
            Matcher::ToEqual => "toEqual",
            Matcher::ToBeTruthy => "toBeTruthy",
            Matcher::ToBeFalsy => "toBeFalsy",
            Matcher::ToBeUndefined => "toBeUndefined",
            Matcher::ToBeDefined => "toBeDefined",
        }
    }

    pub fn takes_expected(&self) -> bool {
        matches!(self, Matcher::ToBe | Matcher::ToEqual)
    }

    /// Whether the un-negated matcher holds. `toBe` is identity for objects
    /// and `SameValue` for primitives; `toEqual` compares structurally.
    pub fn holds(&self, actual: &JsValue, expected: &JsValue) -> bool {
        match self {
            Matcher::ToBe => same_value(actual, expected),
            Matcher::ToEqual => deep_equals(actual, expected),
            Matcher::ToBeTruthy => to_boolean(actual),
            Matcher::ToBeFalsy => !to_boolean(actual),
            Matcher::ToBeUndefined => actual.is_undefined(),
            Matcher::ToBeDefined => !actual.is_undefined(),
        }
    }
}

/// Check one matcher, producing an assertion mismatch when it does not hold.
pub fn check_expectation(
    matcher: Matcher,
    actual: &JsValue,
    expected: &JsValue,
    negated: bool,
) -> Result<(), JErrorType> {
    if matcher.holds(actual, expected) != negated {
        return Ok(());
    }
    Err(JErrorType::AssertionMismatch {
        matcher: matcher.name().to_string(),
        expected: if matcher.takes_expected() {
            Some(expected.clone())
        } else {
            None
        },
        actual: actual.clone(),
        negated,
    })
}

/// Rust-side expectation used by native examples.
#[derive(Debug, Clone)]
pub struct Expectation {
    actual: JsValue,
    negated: bool,
}

pub fn expect(actual: JsValue) -> Expectation {
    Expectation {
        actual,
        negated: false,
    }
}

impl Expectation {
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    fn check(&self, matcher: Matcher, expected: &JsValue) -> Result<(), JErrorType> {
        check_expectation(matcher, &self.actual, expected, self.negated)
    }

    pub fn to_be(&self, expected: JsValue) -> Result<(), JErrorType> {
        self.check(Matcher::ToBe, &expected)
    }

    pub fn to_equal(&self, expected: JsValue) -> Result<(), JErrorType> {
        self.check(Matcher::ToEqual, &expected)
    }

    pub fn to_be_truthy(&self) -> Result<(), JErrorType> {
        self.check(Matcher::ToBeTruthy, &JsValue::Undefined)
    }

    pub fn to_be_falsy(&self) -> Result<(), JErrorType> {
        self.check(Matcher::ToBeFalsy, &JsValue::Undefined)
    }

    pub fn to_be_undefined(&self) -> Result<(), JErrorType> {
        self.check(Matcher::ToBeUndefined, &JsValue::Undefined)
    }

    pub fn to_be_defined(&self) -> Result<(), JErrorType> {
        self.check(Matcher::ToBeDefined, &JsValue::Undefined)
    }
}

/// Expect `result` to be an error accepted by `accept`. Anything else is
/// reported as a `toThrow` mismatch.
pub fn expect_error(
    result: Result<JsValue, JErrorType>,
    accept: impl Fn(&JErrorType) -> bool,
) -> Result<(), JErrorType> {
    let actual = match result {
        Err(error) if accept(&error) => return Ok(()),
        Err(error) => JsValue::String(error.to_string()),
        Ok(value) => value,
    };
    Err(JErrorType::AssertionMismatch {
        matcher: "toThrow".to_string(),
        expected: None,
        actual,
        negated: false,
    })
}

/// The object `expect(actual)` returns to a script.
pub fn create_expectation_object(ctx: &EvalContext, actual: JsValue) -> JsObjectType {
    let expectation = matcher_object(ctx, &actual, false);
    let negated = matcher_object(ctx, &actual, true);
    set_property(&expectation, "not".to_string(), JsValue::Object(negated));
    expectation
}

fn matcher_object(ctx: &EvalContext, actual: &JsValue, negated: bool) -> JsObjectType {
    let object = ctx.realm.new_object();
    for matcher in ALL_MATCHERS.iter().copied() {
        let actual = actual.clone();
        let method = BuiltInFn::Plugin(Rc::new(
            move |_ctx: &mut EvalContext, _this: JsValue, args: Vec<JsValue>| -> Result<JsValue, JErrorType> {
                let expected = args.first().cloned().unwrap_or(JsValue::Undefined);
                check_expectation(matcher, &actual, &expected, negated)?;
                Ok(JsValue::Undefined)
            },
        ));
        let function = ctx.realm.new_builtin_function(matcher.name(), method);
        set_property(&object, matcher.name().to_string(), JsValue::Object(function));
    }
    object
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_be_uses_same_value() {
        assert!(expect(JsValue::from_f64(f64::NAN))
            .to_be(JsValue::from_f64(f64::NAN))
            .is_ok());
        assert!(expect(JsValue::from_f64(0.0))
            .to_be(JsValue::from_f64(-0.0))
            .is_err());
    }

    #[test]
    fn test_negated_mismatch_is_reported() {
        let err = expect(JsValue::Boolean(true))
            .not()
            .to_be_truthy()
            .unwrap_err();
        assert_eq!(
            err,
            JErrorType::AssertionMismatch {
                matcher: "toBeTruthy".to_string(),
                expected: None,
                actual: JsValue::Boolean(true),
                negated: true,
            }
        );
        assert_eq!(err.to_string(), "Expected true not to be truthy.");
    }

    #[test]
    fn test_undefined_and_defined() {
        assert!(expect(JsValue::Undefined).to_be_undefined().is_ok());
        assert!(expect(JsValue::Null).to_be_defined().is_ok());
        assert!(expect(JsValue::Null).to_be_falsy().is_ok());
    }
}
