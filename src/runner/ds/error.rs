use thiserror::Error;

use crate::runner::ds::value::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum JErrorType {
    /// A name that no scope on the chain binds.
    #[error("Uncaught reference error: {0} is not defined.")]
    UnboundName(String),
    /// An expectation in a spec example did not hold.
    #[error("{}", describe_assertion(.matcher, .expected, .actual, .negated))]
    AssertionMismatch {
        matcher: String,
        expected: Option<JsValue>,
        actual: JsValue,
        negated: bool,
    },
    #[error("Uncaught type error: {0}.")]
    TypeError(String),
    #[error("Uncaught range error: {0}.")]
    RangeError(String),
    #[error("Uncaught syntax error: {0}.")]
    SyntaxError(String),
}
impl JErrorType {
    pub fn is_assertion_mismatch(&self) -> bool {
        matches!(self, JErrorType::AssertionMismatch { .. })
    }
}

/// Renders `toBeTruthy` as "to be truthy" and prefixes "not" when negated.
fn describe_assertion(
    matcher: &str,
    expected: &Option<JsValue>,
    actual: &JsValue,
    negated: &bool,
) -> String {
    let mut words = String::new();
    for c in matcher.chars() {
        if c.is_uppercase() {
            words.push(' ');
            words.extend(c.to_lowercase());
        } else {
            words.push(c);
        }
    }
    let not = if *negated { "not " } else { "" };
    match expected {
        Some(expected) => format!("Expected {} {}{} {}.", actual, not, words, expected),
        None => format!("Expected {} {}{}.", actual, not, words),
    }
}
