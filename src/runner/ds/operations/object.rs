use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::{PropertyKey, PROTO_PROPERTY};
use crate::runner::ds::value::JsValue;

pub fn get_prototype(o: &JsObjectType) -> Option<JsObjectType> {
    o.borrow().as_js_object().get_prototype_of()
}

/// Own property first, then each ancestor in turn. `None` when no object on
/// the chain has the property.
pub fn get_property(o: &JsObjectType, p: &str) -> Option<JsValue> {
    let mut current = Some(o.clone());
    while let Some(obj) = current {
        let next = {
            let obj_ref = obj.borrow();
            let js_object = obj_ref.as_js_object();
            if let Some(v) = js_object.get_own_property(p) {
                return Some(v.clone());
            }
            js_object.get_prototype_of()
        };
        current = next;
    }
    None
}

pub fn has_own(o: &JsObjectType, p: &str) -> bool {
    o.borrow().as_js_object().has_own_property(p)
}

pub fn has_property(o: &JsObjectType, p: &str) -> bool {
    let mut current = Some(o.clone());
    while let Some(obj) = current {
        if has_own(&obj, p) {
            return true;
        }
        current = get_prototype(&obj);
    }
    false
}

/// Always writes an own property, shadowing any inherited one.
pub fn set_property(o: &JsObjectType, p: PropertyKey, value: JsValue) {
    o.borrow_mut().as_js_object_mut().define_own_property(p, value);
}

/// Replaces the parent reference of `o`. Rejects a parent whose own chain
/// already reaches `o`.
pub fn set_parent(o: &JsObjectType, parent: Option<JsObjectType>) -> Result<(), JErrorType> {
    let mut current = parent.clone();
    while let Some(ancestor) = current {
        if Rc::ptr_eq(&ancestor, o) {
            return Err(JErrorType::TypeError("Cyclic __proto__ value".to_string()));
        }
        current = get_prototype(&ancestor);
    }
    o.borrow_mut().as_js_object_mut().set_prototype_of(parent);
    Ok(())
}

/// Is `proto` somewhere on the parent chain of `o` (excluding `o` itself)?
pub fn is_prototype_of(proto: &JsObjectType, o: &JsObjectType) -> bool {
    let mut current = get_prototype(o);
    while let Some(ancestor) = current {
        if Rc::ptr_eq(&ancestor, proto) {
            return true;
        }
        current = get_prototype(&ancestor);
    }
    false
}

/// Property read as scripts see it: `__proto__` reads the parent and a
/// missing property reads as `undefined`.
pub fn get(o: &JsObjectType, p: &str) -> JsValue {
    if p == PROTO_PROPERTY && !has_own(o, p) {
        return match get_prototype(o) {
            Some(proto) => JsValue::Object(proto),
            None => JsValue::Null,
        };
    }
    get_property(o, p).unwrap_or(JsValue::Undefined)
}

/// Property write as scripts see it: writing `__proto__` re-parents when the
/// value is an object or `null` and is otherwise ignored.
pub fn put(o: &JsObjectType, p: PropertyKey, value: JsValue) -> Result<(), JErrorType> {
    if p == PROTO_PROPERTY {
        match value {
            JsValue::Object(parent) => set_parent(o, Some(parent)),
            JsValue::Null => set_parent(o, None),
            _ => Ok(()),
        }
    } else {
        set_property(o, p, value);
        Ok(())
    }
}
