//! Tests for the expression and statement evaluator.
//!
//! These cover operators, conversions and control flow as scripts see them.

extern crate protoscope;

use protoscope::runner::api::run_script;
use protoscope::runner::ds::error::JErrorType;
use protoscope::runner::ds::operations::test_and_comparison::{
    abstract_equality_comparison, deep_equals, same_value, strict_equality_comparison,
};
use protoscope::runner::ds::operations::type_conversion::{to_boolean, to_number, type_of};
use protoscope::runner::ds::value::JsValue;
use protoscope::runner::plugin::types::EvalContext;

fn str_val(s: &str) -> JsValue {
    JsValue::String(s.to_string())
}

fn num_val(n: f64) -> JsValue {
    JsValue::from_f64(n)
}

/// Helper to run a script in a fresh context.
fn run_js(code: &str) -> Result<JsValue, JErrorType> {
    let mut ctx = EvalContext::new();
    run_script(code, &mut ctx)
}

fn assert_js(code: &str, expected: JsValue) {
    match run_js(code) {
        Ok(value) => assert_eq!(value, expected, "evaluating {}", code),
        Err(e) => panic!("evaluating {} failed: {}", code, e),
    }
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn test_to_boolean() {
    assert!(!to_boolean(&JsValue::Undefined));
    assert!(!to_boolean(&JsValue::Null));
    assert!(!to_boolean(&num_val(0.0)));
    assert!(!to_boolean(&num_val(f64::NAN)));
    assert!(!to_boolean(&str_val("")));
    assert!(to_boolean(&str_val("0")));
    assert!(to_boolean(&num_val(-1.0)));
}

#[test]
fn test_to_number() {
    assert_eq!(to_number(&str_val(" 42 ")), 42.0);
    assert_eq!(to_number(&str_val("0x10")), 16.0);
    assert_eq!(to_number(&str_val("")), 0.0);
    assert!(to_number(&str_val("abc")).is_nan());
    assert!(to_number(&JsValue::Undefined).is_nan());
    assert_eq!(to_number(&JsValue::Null), 0.0);
    assert_eq!(to_number(&JsValue::Boolean(true)), 1.0);
}

#[test]
fn test_type_of() {
    assert_eq!(type_of(&JsValue::Null), "object");
    assert_eq!(type_of(&JsValue::Undefined), "undefined");
    assert_eq!(type_of(&str_val("s")), "string");
    assert_js("typeof function () {}", str_val("function"));
    assert_js("typeof {}", str_val("object"));
}

// ============================================================================
// Equality
// ============================================================================

#[test]
fn test_same_value() {
    assert!(same_value(&num_val(f64::NAN), &num_val(f64::NAN)));
    assert!(!same_value(&num_val(0.0), &num_val(-0.0)));
    assert!(strict_equality_comparison(&num_val(0.0), &num_val(-0.0)));
    assert!(!strict_equality_comparison(&num_val(f64::NAN), &num_val(f64::NAN)));
}

#[test]
fn test_abstract_equality() {
    assert!(abstract_equality_comparison(&JsValue::Null, &JsValue::Undefined));
    assert!(abstract_equality_comparison(&str_val("1"), &num_val(1.0)));
    assert!(!abstract_equality_comparison(&JsValue::Null, &num_val(0.0)));
    assert_js("'1' == 1", JsValue::Boolean(true));
    assert_js("'1' === 1", JsValue::Boolean(false));
}

#[test]
fn test_deep_equals() {
    let mut ctx = EvalContext::new();
    let a = run_script("var a = { x: [1, 2], y: { z: 'z' } }; a", &mut ctx).unwrap();
    let b = run_script("var b = { y: { z: 'z' }, x: [1, 2] }; b", &mut ctx).unwrap();
    let c = run_script("var c = { x: [1, 2] }; c", &mut ctx).unwrap();
    assert!(deep_equals(&a, &b));
    assert!(!deep_equals(&a, &c));
    assert_ne!(a, b);
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_arithmetic() {
    assert_js("1 + 2 * 3", num_val(7.0));
    assert_js("(1 + 2) * 3", num_val(9.0));
    assert_js("7 % 4", num_val(3.0));
    assert_js("1 / 2", num_val(0.5));
    assert_js("-'3'", num_val(-3.0));
}

#[test]
fn test_string_concatenation() {
    assert_js("'a' + 1 + 2", str_val("a12"));
    assert_js("1 + 2 + 'a'", str_val("3a"));
    assert_js("'n: ' + null + ' ' + undefined", str_val("n: null undefined"));
}

#[test]
fn test_comparison() {
    assert_js("1 < 2", JsValue::Boolean(true));
    assert_js("'b' > 'a'", JsValue::Boolean(true));
    assert_js("2 >= 2", JsValue::Boolean(true));
    assert_js("NaN < 1", JsValue::Boolean(false));
}

#[test]
fn test_logical_short_circuit() {
    assert_js("var hit = 'no'; false && (hit = 'yes'); hit", str_val("no"));
    assert_js("null || 'fallback'", str_val("fallback"));
    assert_js("'first' && 'second'", str_val("second"));
    assert_js("!0", JsValue::Boolean(true));
}

#[test]
fn test_update_and_compound_assignment() {
    assert_js("var i = 1; i++; i", num_val(2.0));
    assert_js("var i = 1; i++", num_val(1.0));
    assert_js("var i = 1; ++i", num_val(2.0));
    assert_js("var s = 'a'; s += 'b'; s", str_val("ab"));
    assert_js("var o = { n: 2 }; o.n *= 5; o.n", num_val(10.0));
}

#[test]
fn test_conditional_and_sequence() {
    assert_js("true ? 'yes' : 'no'", str_val("yes"));
    assert_js("var x = (1, 2, 3); x", num_val(3.0));
}

#[test]
fn test_computed_member_access() {
    assert_js("var o = {}; var key = 'dyn'; o[key] = 1; o.dyn", num_val(1.0));
    assert_js("var arr = [10, 20]; arr[1]", num_val(20.0));
    assert_js("var arr = []; arr[3] = 'x'; arr.length", num_val(4.0));
    assert_js("'hey'[1]", str_val("e"));
}

#[test]
fn test_reading_property_of_undefined_fails() {
    let result = run_js("var nothing; nothing.field");
    assert!(matches!(result, Err(JErrorType::TypeError(_))));
}

#[test]
fn test_writing_property_of_null_fails() {
    let result = run_js("var nothing = null; nothing.field = 1");
    assert!(matches!(result, Err(JErrorType::TypeError(_))));
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_if_else() {
    assert_js("var r; if (0) { r = 'then'; } else { r = 'else'; } r", str_val("else"));
}

#[test]
fn test_while_loop() {
    assert_js("var n = 0; while (n < 5) { n++; } n", num_val(5.0));
}

#[test]
fn test_return_exits_loop() {
    assert_js(
        "function find() { for (var i = 0; ; i++) { if (i === 3) { return i; } } } find()",
        num_val(3.0),
    );
}

#[test]
fn test_completion_value_of_script() {
    assert_js("1; 2; var x = 3;", num_val(2.0));
    assert_js("", JsValue::Undefined);
}

#[test]
fn test_syntax_error_surfaces() {
    assert!(matches!(run_js("var = ;"), Err(JErrorType::SyntaxError(_))));
}

#[test]
fn test_global_values() {
    assert_js("typeof undefined", str_val("undefined"));
    assert_js("Infinity > 1e308", JsValue::Boolean(true));
    assert_js("NaN === NaN", JsValue::Boolean(false));
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn test_array_length_follows_highest_index() {
    assert_js("var a = [1, 2]; a[5] = 3; a.length", num_val(6.0));
    assert_js("var a = []; a['4294967294'] = 1; a.length", num_val(4294967295.0));
}

#[test]
fn test_out_of_range_index_is_plain_property() {
    assert_js(
        "var a = []; a['9223372036854775807'] = 1; a.length",
        num_val(0.0),
    );
    assert_js("var a = []; a['4294967295'] = 1; a['4294967295']", num_val(1.0));
    assert_js("var a = [7]; a['01'] = 1; a.length", num_val(1.0));
}

#[test]
fn test_self_containing_array_converts_to_string() {
    assert_js("var a = []; a[0] = a; a + ''", str_val(""));
    assert_js("var a = [1, 2]; a[2] = a; a + '!'", str_val("1,2,!"));
    assert_js("var a = []; a[0] = a; a == ''", JsValue::Boolean(true));
}
