//! Object built-in.
//!
//! Provides the Object constructor, its static reflection methods and the
//! methods every ordinary object inherits from `Object.prototype`.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{object_create, LENGTH_PROPERTY};
use crate::runner::ds::object_property::is_array_index;
use crate::runner::ds::operations::object::{get_prototype, has_own, set_parent};
use crate::runner::ds::operations::type_conversion::to_property_key;
use crate::runner::ds::realm::WellKnownIntrinsics;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};

/// Register the Object built-in with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let prototype = BuiltInObject::for_intrinsic(WellKnownIntrinsics::ObjectPrototype)
        .add_method("hasOwnProperty", object_has_own_property)
        .add_method("toString", object_to_string);
    registry.register_object(prototype);

    let object = BuiltInObject::new("Object")
        .with_constructor(object_constructor)
        .with_prototype_object(WellKnownIntrinsics::ObjectPrototype)
        .add_method("getPrototypeOf", object_get_prototype_of)
        .add_method("setPrototypeOf", object_set_prototype_of)
        .add_method("create", object_create_method)
        .add_method("keys", object_keys);
    registry.register_object(object);
}

fn first_arg(args: &[JsValue]) -> JsValue {
    args.first().cloned().unwrap_or(JsValue::Undefined)
}

/// `Object(v)`: objects pass through, anything else yields a new empty object.
fn object_constructor(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    match first_arg(&args) {
        v @ JsValue::Object(_) => Ok(v),
        _ => Ok(JsValue::Object(ctx.realm.new_object())),
    }
}

/// Object.prototype.hasOwnProperty
fn object_has_own_property(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let key = to_property_key(&first_arg(&args));
    Ok(JsValue::Boolean(match &this {
        JsValue::Object(o) => has_own(o, &key),
        JsValue::String(s) => {
            key == LENGTH_PROPERTY || is_array_index(&key).map_or(false, |i| i < s.chars().count())
        }
        JsValue::Undefined | JsValue::Null => {
            return Err(JErrorType::TypeError(
                "Cannot convert undefined or null to object".to_string(),
            ))
        }
        _ => false,
    }))
}

/// Object.prototype.toString
fn object_to_string(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let tag = match &this {
        JsValue::Undefined => "Undefined",
        JsValue::Null => "Null",
        JsValue::Boolean(_) => "Boolean",
        JsValue::Number(_) => "Number",
        JsValue::String(_) => "String",
        JsValue::Object(o) => o.borrow().as_js_object().class_name(),
    };
    Ok(JsValue::String(format!("[object {}]", tag)))
}

/// Object.getPrototypeOf
fn object_get_prototype_of(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    match first_arg(&args) {
        JsValue::Object(o) => Ok(match get_prototype(&o) {
            Some(p) => JsValue::Object(p),
            None => JsValue::Null,
        }),
        JsValue::Undefined | JsValue::Null => Err(JErrorType::TypeError(
            "Cannot convert undefined or null to object".to_string(),
        )),
        _ => Ok(JsValue::Object(
            ctx.intrinsic(WellKnownIntrinsics::ObjectPrototype),
        )),
    }
}

/// Object.setPrototypeOf
fn object_set_prototype_of(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let target = first_arg(&args);
    let parent = match args.get(1) {
        Some(JsValue::Object(p)) => Some(p.clone()),
        Some(JsValue::Null) => None,
        other => {
            return Err(JErrorType::TypeError(format!(
                "Object prototype may only be an Object or null: {}",
                other.cloned().unwrap_or(JsValue::Undefined)
            )))
        }
    };
    match &target {
        JsValue::Object(o) => set_parent(o, parent)?,
        JsValue::Undefined | JsValue::Null => {
            return Err(JErrorType::TypeError(
                "Object.setPrototypeOf called on null or undefined".to_string(),
            ))
        }
        _ => {}
    }
    Ok(target)
}

/// Object.create
fn object_create_method(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    match first_arg(&args) {
        JsValue::Object(p) => Ok(JsValue::Object(object_create(Some(p)))),
        JsValue::Null => Ok(JsValue::Object(object_create(None))),
        other => Err(JErrorType::TypeError(format!(
            "Object prototype may only be an Object or null: {}",
            other
        ))),
    }
}

/// Object.keys - own property names in insertion order.
fn object_keys(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let keys = match first_arg(&args) {
        JsValue::Object(o) => {
            let o = o.borrow();
            let js_object = o.as_js_object();
            let is_array = js_object.class_name() == "Array";
            js_object
                .own_keys()
                .into_iter()
                .filter(move |k| !(is_array && k == LENGTH_PROPERTY))
                .map(JsValue::String)
                .collect()
        }
        JsValue::String(s) => (0..s.chars().count())
            .map(|i| JsValue::String(i.to_string()))
            .collect(),
        JsValue::Undefined | JsValue::Null => {
            return Err(JErrorType::TypeError(
                "Cannot convert undefined or null to object".to_string(),
            ))
        }
        _ => Vec::new(),
    };
    Ok(JsValue::Object(ctx.realm.new_array(keys)))
}
