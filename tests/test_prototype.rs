//! Tests for prototype resolution: own properties, parent lookup,
//! re-parenting and the `Object` built-in.

extern crate protoscope;

use protoscope::runner::api::run_script;
use protoscope::runner::ds::error::JErrorType;
use protoscope::runner::ds::object::{object_create, JsObjectType};
use protoscope::runner::ds::operations::object::{
    get, get_property, get_prototype, has_own, has_property, is_prototype_of, put, set_parent,
    set_property,
};
use protoscope::runner::ds::value::JsValue;
use protoscope::runner::plugin::types::EvalContext;
use std::rc::Rc;

fn str_val(s: &str) -> JsValue {
    JsValue::String(s.to_string())
}

/// Helper to run a script in a fresh context.
fn run_js(code: &str) -> Result<JsValue, JErrorType> {
    let mut ctx = EvalContext::new();
    run_script(code, &mut ctx)
}

fn object_with(name: &str, value: JsValue, parent: Option<JsObjectType>) -> JsObjectType {
    let o = object_create(parent);
    set_property(&o, name.to_string(), value);
    o
}

// ============================================================================
// Object operations
// ============================================================================

#[test]
fn test_own_property_found_first() {
    let parent = object_with("name", str_val("parent"), None);
    let child = object_with("name", str_val("child"), Some(parent));
    assert_eq!(get_property(&child, "name"), Some(str_val("child")));
}

#[test]
fn test_inherited_property_is_not_own() {
    let parent = object_with("name", str_val("parent"), None);
    let child = object_create(Some(parent));
    assert!(!has_own(&child, "name"));
    assert!(has_property(&child, "name"));
    assert_eq!(get_property(&child, "name"), Some(str_val("parent")));
}

#[test]
fn test_missing_property_is_absent_not_error() {
    let o = object_create(None);
    assert_eq!(get_property(&o, "missing"), None);
    assert_eq!(get(&o, "missing"), JsValue::Undefined);
}

#[test]
fn test_three_level_chain_sees_mutation() {
    let grand = object_create(None);
    let parent = object_create(Some(grand.clone()));
    let child = object_create(Some(parent.clone()));
    assert_eq!(get_property(&child, "name"), None);
    set_property(&grand, "name".to_string(), str_val("Alan"));
    assert_eq!(get_property(&child, "name"), Some(str_val("Alan")));
    set_property(&parent, "name".to_string(), str_val("Bob"));
    assert_eq!(get_property(&child, "name"), Some(str_val("Bob")));
    assert!(is_prototype_of(&grand, &child));
    assert!(!is_prototype_of(&child, &grand));
}

#[test]
fn test_set_parent_replaces_link() {
    let first = object_with("from", str_val("first"), None);
    let second = object_with("from", str_val("second"), None);
    let child = object_create(Some(first));
    set_parent(&child, Some(second.clone())).unwrap();
    assert!(Rc::ptr_eq(&get_prototype(&child).unwrap(), &second));
    assert_eq!(get_property(&child, "from"), Some(str_val("second")));
    set_parent(&child, None).unwrap();
    assert!(get_prototype(&child).is_none());
}

#[test]
fn test_set_parent_rejects_cycle() {
    let a = object_create(None);
    let b = object_create(Some(a.clone()));
    let c = object_create(Some(b.clone()));
    assert!(matches!(set_parent(&a, Some(c)), Err(JErrorType::TypeError(_))));
    assert!(matches!(set_parent(&a, Some(a.clone())), Err(JErrorType::TypeError(_))));
    assert!(get_prototype(&a).is_none());
}

#[test]
fn test_proto_key_reads_and_writes_parent() {
    let parent = object_create(None);
    let child = object_create(None);
    assert_eq!(get(&child, "__proto__"), JsValue::Null);
    put(&child, "__proto__".to_string(), JsValue::Object(parent.clone())).unwrap();
    assert_eq!(get(&child, "__proto__"), JsValue::Object(parent));
    put(&child, "__proto__".to_string(), str_val("ignored")).unwrap();
    assert!(get_prototype(&child).is_some());
    assert!(!has_own(&child, "__proto__"));
}

// ============================================================================
// Scripts
// ============================================================================

#[test]
fn test_proto_assignment_in_script() {
    let result = run_js(
        "var parent = { greeting: 'hello' };
         var child = {};
         child.__proto__ = parent;
         child.greeting + ' ' + child.hasOwnProperty('greeting')",
    );
    assert_eq!(result.unwrap(), str_val("hello false"));
}

#[test]
fn test_recursive_lookup_with_receiver() {
    let result = run_js(
        "var grandParent = {};
         var parent = {};
         var child = {};
         parent.__proto__ = grandParent;
         child.__proto__ = parent;
         grandParent.name = 'Alan';
         grandParent.sayHi = function () { return 'Hi! My name is ' + this.name + '!'; };
         child.sayHi()",
    );
    assert_eq!(result.unwrap(), str_val("Hi! My name is Alan!"));
}

#[test]
fn test_assignment_shadows_inherited_property() {
    let result = run_js(
        "var parent = { name: 'parent' };
         var child = Object.create(parent);
         child.name = 'child';
         child.name + ' ' + parent.name",
    );
    assert_eq!(result.unwrap(), str_val("child parent"));
}

#[test]
fn test_object_prototype_is_shared_root() {
    let result = run_js(
        "var a = {};
         var b = {};
         Object.prototype.everywhere = 'yes';
         a.everywhere + b.everywhere",
    );
    assert_eq!(result.unwrap(), str_val("yesyes"));
}

#[test]
fn test_cyclic_proto_in_script_fails() {
    let result = run_js("var p = {}; var q = Object.create(p); p.__proto__ = q;");
    assert!(matches!(result, Err(JErrorType::TypeError(_))));
}

#[test]
fn test_object_create_null_has_no_parent() {
    let result = run_js(
        "var bare = Object.create(null);
         Object.getPrototypeOf(bare) === null",
    );
    assert_eq!(result.unwrap(), JsValue::Boolean(true));
}

#[test]
fn test_set_prototype_of() {
    let result = run_js(
        "var animal = { legs: 4 };
         var dog = Object.setPrototypeOf({}, animal);
         dog.legs",
    );
    assert_eq!(result.unwrap(), JsValue::from_f64(4.0));
}

#[test]
fn test_object_keys_lists_own_in_order() {
    let result = run_js(
        "var parent = { inherited: 1 };
         var o = Object.create(parent);
         o.b = 1;
         o.a = 2;
         Object.keys(o).length + ':' + Object.keys(o)[0] + Object.keys(o)[1]",
    );
    assert_eq!(result.unwrap(), str_val("2:ba"));
}

#[test]
fn test_in_operator_walks_chain() {
    let result = run_js(
        "var parent = { x: 1 };
         var child = Object.create(parent);
         ('x' in child) + ' ' + ('y' in child)",
    );
    assert_eq!(result.unwrap(), str_val("true false"));
}

#[test]
fn test_primitive_inherits_object_prototype() {
    let result = run_js("var s = 'abc'; s.hasOwnProperty('length') + ' ' + s.length");
    assert_eq!(result.unwrap(), str_val("true 3"));
}

#[test]
fn test_to_string_class_tag() {
    let result = run_js("var a = [1]; ({}).toString() + ' ' + Object.prototype.toString.call(a)");
    assert_eq!(result.unwrap(), str_val("[object Object] [object Array]"));
}
