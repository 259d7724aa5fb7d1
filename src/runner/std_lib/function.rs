//! Function built-in.
//!
//! `Function.prototype.call` and `apply` are how scripts pick the receiver
//! of a call explicitly.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::ObjectType;
use crate::runner::ds::realm::WellKnownIntrinsics;
use crate::runner::ds::value::JsValue;
use crate::runner::eval::function::{invoke, invoke_with};
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};

/// Register the Function built-in with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let prototype = BuiltInObject::for_intrinsic(WellKnownIntrinsics::FunctionPrototype)
        .add_method("call", function_call)
        .add_method("apply", function_apply);
    registry.register_object(prototype);

    let function = BuiltInObject::new("Function")
        .with_constructor(function_constructor)
        .with_prototype_object(WellKnownIntrinsics::FunctionPrototype);
    registry.register_object(function);
}

/// Compiling functions from strings is outside the supported language.
fn function_constructor(
    _ctx: &mut EvalContext,
    _this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Err(JErrorType::TypeError(
        "Function constructor is not supported".to_string(),
    ))
}

/// `undefined` and `null` receivers fall back to the global object.
fn explicit_receiver(receiver: Option<&JsValue>) -> Option<JsValue> {
    match receiver {
        None | Some(JsValue::Undefined) | Some(JsValue::Null) => None,
        Some(r) => Some(r.clone()),
    }
}

fn callable_this(this: &JsValue, method: &str) -> Result<(), JErrorType> {
    if this.is_callable() {
        Ok(())
    } else {
        Err(JErrorType::TypeError(format!(
            "Function.prototype.{} called on {}, which is not a function",
            method, this
        )))
    }
}

fn call_with_receiver(
    ctx: &mut EvalContext,
    this: &JsValue,
    receiver: Option<JsValue>,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    match (this, receiver) {
        (JsValue::Object(f), Some(receiver)) => invoke_with(ctx, f, receiver, args),
        (JsValue::Object(f), None) => invoke(ctx, f, None, args),
        _ => Ok(JsValue::Undefined),
    }
}

/// Function.prototype.call
fn function_call(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    callable_this(&this, "call")?;
    let receiver = explicit_receiver(args.first());
    let rest = args.into_iter().skip(1).collect();
    call_with_receiver(ctx, &this, receiver, rest)
}

/// Function.prototype.apply
fn function_apply(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    callable_this(&this, "apply")?;
    let receiver = explicit_receiver(args.first());
    let call_args = match args.get(1) {
        None | Some(JsValue::Undefined) | Some(JsValue::Null) => Vec::new(),
        Some(JsValue::Object(o)) => match &*o.borrow() {
            ObjectType::Array(array) => array.elements(),
            _ => {
                return Err(JErrorType::TypeError(
                    "Function.prototype.apply expects an array of arguments".to_string(),
                ))
            }
        },
        Some(_) => {
            return Err(JErrorType::TypeError(
                "CreateListFromArrayLike called on non-object".to_string(),
            ))
        }
    };
    call_with_receiver(ctx, &this, receiver, call_args)
}
