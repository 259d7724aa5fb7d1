//! Value properties of the global object.

use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::BuiltInObject;

pub fn register(registry: &mut BuiltInRegistry) {
    let globals = BuiltInObject::for_global_object()
        .add_property("undefined", JsValue::Undefined)
        .add_property("NaN", JsValue::Number(JsNumberType::NaN))
        .add_property("Infinity", JsValue::Number(JsNumberType::PositiveInfinity));
    registry.register_object(globals);
}
