use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::ds::function_object::FunctionKind;
use crate::runner::ds::object::ObjectType;
use crate::runner::ds::value::{JsNumberType, JsValue};

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

/// Internal type tag; `null` is its own type here, unlike `typeof`.
pub fn get_type(a: &JsValue) -> &'static str {
    match a {
        JsValue::Undefined => TYPE_STR_UNDEFINED,
        JsValue::Null => TYPE_STR_NULL,
        JsValue::Boolean(_) => TYPE_STR_BOOLEAN,
        JsValue::String(_) => TYPE_STR_STRING,
        JsValue::Number(_) => TYPE_STR_NUMBER,
        JsValue::Object(o) => match *(**o).borrow() {
            ObjectType::Function(_) => TYPE_STR_FUNCTION,
            ObjectType::Ordinary(_) | ObjectType::Array(_) => TYPE_STR_OBJECT,
        },
    }
}

pub fn type_of(a: &JsValue) -> &'static str {
    match a {
        JsValue::Null => TYPE_STR_OBJECT,
        _ => get_type(a),
    }
}

pub fn to_boolean(v: &JsValue) -> bool {
    match v {
        JsValue::Undefined | JsValue::Null => false,
        JsValue::Boolean(b) => *b,
        JsValue::String(s) => !s.is_empty(),
        JsValue::Number(n) => match n {
            JsNumberType::Integer(i) => *i != 0,
            JsNumberType::Float(f) => *f != 0.0,
            JsNumberType::NaN => false,
            JsNumberType::PositiveInfinity | JsNumberType::NegativeInfinity => true,
        },
        JsValue::Object(_) => true,
    }
}

/// Objects convert through their string form (no `valueOf` hook).
pub fn to_primitive(v: &JsValue) -> JsValue {
    match v {
        JsValue::Object(_) => JsValue::String(to_string(v)),
        _ => v.clone(),
    }
}

pub fn to_number(v: &JsValue) -> f64 {
    match v {
        JsValue::Undefined => f64::NAN,
        JsValue::Null => 0.0,
        JsValue::Boolean(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        JsValue::String(s) => string_to_number(s),
        JsValue::Number(n) => n.as_f64(),
        JsValue::Object(_) => to_number(&to_primitive(v)),
    }
}

fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return match i64::from_str_radix(hex, 16) {
            Ok(i) => i as f64,
            Err(_) => f64::NAN,
        };
    }
    // Rust accepts spellings like "inf" and "nan" that scripts must not.
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{}", n as i128)
    } else {
        format!("{}", n)
    }
}

pub fn to_string(v: &JsValue) -> String {
    to_string_visiting(v, &mut Vec::new())
}

/// Arrays already being joined render as the empty string, so a
/// self-containing array terminates.
fn to_string_visiting(v: &JsValue, visiting: &mut Vec<*const RefCell<ObjectType>>) -> String {
    match v {
        JsValue::Undefined => TYPE_STR_UNDEFINED.to_string(),
        JsValue::Null => TYPE_STR_NULL.to_string(),
        JsValue::Boolean(b) => b.to_string(),
        JsValue::String(s) => s.to_string(),
        JsValue::Number(n) => number_to_string(n.as_f64()),
        JsValue::Object(o) => match &*(**o).borrow() {
            ObjectType::Function(f) => match f.kind() {
                FunctionKind::Script { function_data, .. } => {
                    function_data.meta.source_text().to_string()
                }
                FunctionKind::BuiltIn(_) => {
                    format!("function {}() {{ [native code] }}", f.name())
                }
            },
            ObjectType::Array(a) => {
                let ptr = Rc::as_ptr(o);
                if visiting.contains(&ptr) {
                    return String::new();
                }
                visiting.push(ptr);
                let joined = a
                    .elements()
                    .iter()
                    .map(|e| match e {
                        JsValue::Undefined | JsValue::Null => String::new(),
                        _ => to_string_visiting(e, visiting),
                    })
                    .collect::<Vec<String>>()
                    .join(",");
                visiting.pop();
                joined
            }
            ObjectType::Ordinary(_) => "[object Object]".to_string(),
        },
    }
}

/// Property key form of a value, as used by computed member access.
pub fn to_property_key(v: &JsValue) -> String {
    to_string(v)
}
