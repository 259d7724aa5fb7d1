//! Tests for the scope chain model.
//!
//! Covers resolution along the chain, declaration in the innermost scope,
//! hoisting and the absence of block scope.

extern crate protoscope;

use protoscope::runner::api::run_script;
use protoscope::runner::ds::error::JErrorType;
use protoscope::runner::ds::operations::lex_env::{
    assign, declare, define_at, get_identifier_reference, new_declarative_environment, resolve,
};
use protoscope::runner::ds::value::JsValue;
use protoscope::runner::plugin::types::EvalContext;
use std::rc::Rc;

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

// ============================================================================
// Environment operations
// ============================================================================

#[test]
fn test_resolve_walks_outward() {
    let outer = new_declarative_environment(None);
    let middle = new_declarative_environment(Some(outer.clone()));
    let inner = new_declarative_environment(Some(middle.clone()));
    declare(&outer, "x", str_val("outer")).unwrap();
    assert_eq!(resolve(&inner, "x").unwrap(), str_val("outer"));

    declare(&middle, "x", str_val("middle")).unwrap();
    assert_eq!(resolve(&inner, "x").unwrap(), str_val("middle"));
    assert_eq!(resolve(&outer, "x").unwrap(), str_val("outer"));
}

#[test]
fn test_resolve_unbound_name() {
    let env = new_declarative_environment(None);
    assert_eq!(
        resolve(&env, "missing"),
        Err(JErrorType::UnboundName("missing".to_string()))
    );
}

#[test]
fn test_identifier_reference_is_nearest_scope() {
    let outer = new_declarative_environment(None);
    let inner = new_declarative_environment(Some(outer.clone()));
    declare(&outer, "x", num_val(1.0)).unwrap();
    let found = get_identifier_reference(&inner, "x").unwrap();
    assert!(Rc::ptr_eq(&found, &outer));
    assert!(get_identifier_reference(&inner, "y").is_none());
}

#[test]
fn test_declare_never_touches_outer_scope() {
    let outer = new_declarative_environment(None);
    let inner = new_declarative_environment(Some(outer.clone()));
    declare(&outer, "x", str_val("outer")).unwrap();
    declare(&inner, "x", str_val("inner")).unwrap();
    assert_eq!(resolve(&outer, "x").unwrap(), str_val("outer"));
    assert_eq!(resolve(&inner, "x").unwrap(), str_val("inner"));
}

#[test]
fn test_define_at_is_idempotent() {
    let env = new_declarative_environment(None);
    define_at(&env, "x");
    assert_eq!(resolve(&env, "x").unwrap(), JsValue::Undefined);
    declare(&env, "x", num_val(5.0)).unwrap();
    define_at(&env, "x");
    assert_eq!(resolve(&env, "x").unwrap(), num_val(5.0));
}

#[test]
fn test_assign_updates_nearest_binding() {
    let outer = new_declarative_environment(None);
    let inner = new_declarative_environment(Some(outer.clone()));
    declare(&outer, "count", num_val(1.0)).unwrap();
    assign(&inner, "count", num_val(2.0)).unwrap();
    assert_eq!(resolve(&outer, "count").unwrap(), num_val(2.0));
    assert!(assign(&inner, "nowhere", num_val(0.0)).is_err());
}

// ============================================================================
// Scripts
// ============================================================================

#[test]
fn test_function_has_own_scope() {
    let result = run_js(
        "var msg = 'outer';
         function f() { var msg = 'inner'; return msg; }
         f() + ' ' + msg",
    );
    assert_eq!(result.unwrap(), str_val("inner outer"));
}

#[test]
fn test_for_loop_has_no_scope() {
    let result = run_js(
        "function f() {
             var i = 'msg';
             for (var i = 0; i < 6; i++) {}
             return i;
         }
         f()",
    );
    assert_eq!(result.unwrap(), num_val(6.0));
}

#[test]
fn test_block_var_visible_after_block() {
    let result = run_js("if (true) { var inside = 'seen'; } inside");
    assert_eq!(result.unwrap(), str_val("seen"));
}

#[test]
fn test_var_is_hoisted_as_undefined() {
    let result = run_js(
        "function f() { var before = typeof later; var later = 1; return before; }
         f()",
    );
    assert_eq!(result.unwrap(), str_val("undefined"));
}

#[test]
fn test_function_declaration_is_hoisted() {
    let result = run_js("var r = early(); function early() { return 'ready'; } r");
    assert_eq!(result.unwrap(), str_val("ready"));
}

#[test]
fn test_redeclaration_keeps_assigned_value() {
    let result = run_js("function f() { x = 5; var x; return x; } f()");
    assert_eq!(result.unwrap(), num_val(5.0));
}

#[test]
fn test_closure_uses_defining_scope() {
    let result = run_js(
        "var word = 'poop!';
         function speak() { return word; }
         function caller() { var word = 'nope'; return speak(); }
         caller()",
    );
    assert_eq!(result.unwrap(), str_val("poop!"));
}

#[test]
fn test_closure_sees_later_updates() {
    let result = run_js(
        "function counter() {
             var n = 0;
             return function () { n = n + 1; return n; };
         }
         var next = counter();
         next();
         next()",
    );
    assert_eq!(result.unwrap(), num_val(2.0));
}

#[test]
fn test_assignment_to_undeclared_name_fails() {
    let result = run_js("function f() { undeclared = 1; } f()");
    assert_eq!(result, Err(JErrorType::UnboundName("undeclared".to_string())));
}

#[test]
fn test_named_function_expression_binds_own_name() {
    let result = run_js(
        "var fact = function inner(n) { return n <= 1 ? 1 : n * inner(n - 1); };
         fact(5) + ' ' + typeof inner",
    );
    assert_eq!(result.unwrap(), str_val("120 undefined"));
}

#[test]
fn test_global_var_becomes_global_object_property() {
    let result = run_js("var shared = 3; window.shared");
    assert_eq!(result.unwrap(), num_val(3.0));
}

#[test]
fn test_global_object_property_is_global_binding() {
    let result = run_js("globalThis.fromObject = 'yes'; fromObject");
    assert_eq!(result.unwrap(), str_val("yes"));
}
