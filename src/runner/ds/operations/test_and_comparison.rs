use std::rc::Rc;

use crate::runner::ds::object::ObjectType;
use crate::runner::ds::operations::type_conversion::{to_number, to_primitive};
use crate::runner::ds::value::{JsNumberType, JsValue};

/// Nesting beyond this compares by identity only.
const MAX_DEEP_EQUALS_DEPTH: usize = 32;

fn is_same_value(a: &JsValue, b: &JsValue, strict_mode: bool) -> bool {
    match (a, b) {
        (JsValue::Undefined, JsValue::Undefined) => true,
        (JsValue::Null, JsValue::Null) => true,
        (JsValue::Boolean(x), JsValue::Boolean(y)) => x == y,
        (JsValue::String(x), JsValue::String(y)) => x == y,
        (JsValue::Number(x), JsValue::Number(y)) => {
            if strict_mode {
                x.as_f64() == y.as_f64()
            } else {
                same_number(x, y)
            }
        }
        (JsValue::Object(x), JsValue::Object(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

/// NaN equals NaN and +0 differs from -0.
fn same_number(x: &JsNumberType, y: &JsNumberType) -> bool {
    let (fx, fy) = (x.as_f64(), y.as_f64());
    if fx.is_nan() && fy.is_nan() {
        true
    } else if fx == 0.0 && fy == 0.0 {
        fx.is_sign_negative() == fy.is_sign_negative()
    } else {
        fx == fy
    }
}

pub fn same_value(a: &JsValue, b: &JsValue) -> bool {
    is_same_value(a, b, false)
}

pub fn strict_equality_comparison(a: &JsValue, b: &JsValue) -> bool {
    is_same_value(a, b, true)
}

pub fn abstract_equality_comparison(a: &JsValue, b: &JsValue) -> bool {
    match (a, b) {
        (JsValue::Undefined, JsValue::Null) | (JsValue::Null, JsValue::Undefined) => true,
        (JsValue::Undefined, _) | (JsValue::Null, _) | (_, JsValue::Undefined) | (_, JsValue::Null) => {
            strict_equality_comparison(a, b)
        }
        (JsValue::Object(_), JsValue::Object(_)) => strict_equality_comparison(a, b),
        (JsValue::Object(_), _) => abstract_equality_comparison(&to_primitive(a), b),
        (_, JsValue::Object(_)) => abstract_equality_comparison(a, &to_primitive(b)),
        (JsValue::String(x), JsValue::String(y)) => x == y,
        (JsValue::Boolean(x), JsValue::Boolean(y)) => x == y,
        _ => to_number(a) == to_number(b),
    }
}

/// Structural equality: primitives by SameValue, arrays element-wise and
/// other objects by their own properties (identity short-circuits).
pub fn deep_equals(a: &JsValue, b: &JsValue) -> bool {
    deep_equals_at_depth(a, b, 0)
}

fn deep_equals_at_depth(a: &JsValue, b: &JsValue, depth: usize) -> bool {
    match (a, b) {
        (JsValue::Object(x), JsValue::Object(y)) => {
            if Rc::ptr_eq(x, y) {
                return true;
            }
            if depth >= MAX_DEEP_EQUALS_DEPTH {
                return false;
            }
            let (x, y) = ((**x).borrow(), (**y).borrow());
            let equal = match (&*x, &*y) {
                (ObjectType::Function(_), _) | (_, ObjectType::Function(_)) => false,
                (ObjectType::Array(_), ObjectType::Ordinary(_))
                | (ObjectType::Ordinary(_), ObjectType::Array(_)) => false,
                _ => {
                    let (ox, oy) = (x.as_js_object(), y.as_js_object());
                    let mut keys_x = ox.own_keys();
                    let mut keys_y = oy.own_keys();
                    keys_x.sort();
                    keys_y.sort();
                    keys_x == keys_y
                        && keys_x.iter().all(|k| match (ox.get_own_property(k), oy.get_own_property(k)) {
                            (Some(vx), Some(vy)) => deep_equals_at_depth(vx, vy, depth + 1),
                            _ => false,
                        })
                }
            };
            equal
        }
        _ => same_value(a, b),
    }
}
