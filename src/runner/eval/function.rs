//! Function creation, invocation and construction.
//!
//! Invocation always builds the new function scope on top of the closure
//! captured when the function value was created, so a callee never sees its
//! caller's bindings. The receiver is an explicit argument: callers pass the
//! base object of a member call, an explicit receiver for `call`/`apply`, or
//! nothing, in which case the realm's global object is bound.

use std::rc::Rc;

use crate::parser::ast::FunctionData;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::execution_context::ExecutionContext;
use crate::runner::ds::function_object::{function_create, FunctionKind, FunctionObject};
use crate::runner::ds::lex_env::JsLexEnvironmentType;
use crate::runner::ds::object::{object_create, JsObjectType, ObjectType};
use crate::runner::ds::object_property::{
    ARGUMENTS_BINDING, CONSTRUCTOR_PROPERTY, PROTOTYPE_PROPERTY,
};
use crate::runner::ds::operations::lex_env::{
    declare, define_at, new_declarative_environment, new_function_environment,
};
use crate::runner::ds::operations::object::{get, is_prototype_of, set_property};
use crate::runner::ds::realm::WellKnownIntrinsics;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::EvalContext;

use super::statement::execute_function_body;
use super::types::{CompletionType, ValueResult};
use super::{STACK_GROW_SIZE, STACK_RED_ZONE};

pub const STACK_OVERFLOW_MESSAGE: &str = "Maximum call stack size exceeded";

/// Create a function value closing over `scope`, with a fresh `prototype`
/// object whose `constructor` points back at the function.
pub fn instantiate_function(
    function_data: &Rc<FunctionData>,
    scope: &JsLexEnvironmentType,
    ctx: &EvalContext,
) -> JsObjectType {
    let f = function_create(FunctionObject::new_script_function(
        function_data.clone(),
        scope.clone(),
        Some(ctx.intrinsic(WellKnownIntrinsics::FunctionPrototype)),
    ));
    let prototype = ctx.realm.new_object();
    set_property(
        &prototype,
        CONSTRUCTOR_PROPERTY.to_string(),
        JsValue::Object(f.clone()),
    );
    set_property(&f, PROTOTYPE_PROPERTY.to_string(), JsValue::Object(prototype));
    f
}

/// A named function expression can refer to itself by name; that binding
/// lives in a scope of its own between the function and `scope`.
pub fn instantiate_function_expression(
    function_data: &Rc<FunctionData>,
    scope: &JsLexEnvironmentType,
    ctx: &EvalContext,
) -> Result<JsObjectType, JErrorType> {
    match &function_data.name {
        Some(name) => {
            let func_env = new_declarative_environment(Some(scope.clone()));
            let f = instantiate_function(function_data, &func_env, ctx);
            declare(&func_env, name, JsValue::Object(f.clone()))?;
            Ok(f)
        }
        None => Ok(instantiate_function(function_data, scope, ctx)),
    }
}

/// Register hoisted names in `env` before any statement of the body runs:
/// every `var` as `undefined` (keeping any existing value), then every
/// function declaration bound to a new function value.
pub fn hoist_declarations(
    env: &JsLexEnvironmentType,
    var_names: &[String],
    function_declarations: &[Rc<FunctionData>],
    ctx: &EvalContext,
) -> Result<(), JErrorType> {
    for name in var_names {
        define_at(env, name);
    }
    for function_data in function_declarations {
        if let Some(name) = &function_data.name {
            let f = instantiate_function(function_data, env, ctx);
            declare(env, name, JsValue::Object(f))?;
        }
    }
    Ok(())
}

fn function_kind(f: &JsObjectType) -> Result<(String, FunctionKind), JErrorType> {
    match &*f.borrow() {
        ObjectType::Function(func) => Ok((func.display_name().to_string(), func.kind().clone())),
        _ => Err(JErrorType::TypeError(format!(
            "{} is not a function",
            JsValue::Object(f.clone())
        ))),
    }
}

/// Call `f` with `this_value` as receiver, or the global object when none is given.
pub fn invoke(
    ctx: &mut EvalContext,
    f: &JsObjectType,
    this_value: Option<JsValue>,
    args: Vec<JsValue>,
) -> ValueResult {
    let (name, kind) = function_kind(f)?;
    let depth = ctx.call_depth();
    if depth >= ctx.config.max_call_depth {
        return Err(JErrorType::RangeError(STACK_OVERFLOW_MESSAGE.to_string()));
    }
    let this_value = this_value.unwrap_or_else(|| JsValue::Object(ctx.global_object()));
    log::trace!("Invoking {} at depth {}", name, depth);
    match kind {
        FunctionKind::BuiltIn(builtin) => builtin.call(ctx, this_value, args),
        FunctionKind::Script {
            function_data,
            environment,
        } => {
            let env = new_function_environment(f.clone(), this_value.clone(), environment);
            for (i, param) in function_data.params.iter().enumerate() {
                let value = args.get(i).cloned().unwrap_or(JsValue::Undefined);
                declare(&env, param, value)?;
            }
            if !function_data.params.iter().any(|p| p == ARGUMENTS_BINDING) {
                let arguments = ctx.realm.new_array(args.clone());
                declare(&env, ARGUMENTS_BINDING, JsValue::Object(arguments))?;
            }
            hoist_declarations(
                &env,
                &function_data.var_names,
                &function_data.function_declarations,
                ctx,
            )?;

            ctx.ctx_stack.push_execution_ctx(ExecutionContext {
                function: Some(f.clone()),
                lex_env: env,
                this_value,
                arguments: args,
            });
            let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
                execute_function_body(&function_data.body, ctx)
            });
            ctx.ctx_stack.pop_running_execution_ctx();

            let completion = result?;
            Ok(match completion.completion_type {
                CompletionType::Return => completion.get_value(),
                CompletionType::Normal => JsValue::Undefined,
            })
        }
    }
}

/// Call `f` with an explicit receiver, however it was reached.
pub fn invoke_with(
    ctx: &mut EvalContext,
    f: &JsObjectType,
    receiver: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    invoke(ctx, f, Some(receiver), args)
}

/// Call any value, failing with a type error when it is not a function.
pub fn call_value(
    ctx: &mut EvalContext,
    callee: &JsValue,
    this_value: Option<JsValue>,
    args: Vec<JsValue>,
) -> ValueResult {
    match callee {
        JsValue::Object(f) if callee.is_callable() => invoke(ctx, f, this_value, args),
        _ => Err(JErrorType::TypeError(format!("{} is not a function", callee))),
    }
}

/// `new callee(...args)`: a fresh object parented to `callee.prototype`
/// (or `Object.prototype` when that is not an object) is the receiver; it is
/// the result unless the body returns an object.
pub fn construct(ctx: &mut EvalContext, callee: &JsValue, args: Vec<JsValue>) -> ValueResult {
    let f = match callee {
        JsValue::Object(o) => {
            let is_constructor = match &*o.borrow() {
                ObjectType::Function(func) => func.is_constructor(),
                _ => false,
            };
            if !is_constructor {
                return Err(JErrorType::TypeError(format!("{} is not a constructor", callee)));
            }
            o.clone()
        }
        _ => {
            return Err(JErrorType::TypeError(format!("{} is not a constructor", callee)));
        }
    };
    let proto = match get(&f, PROTOTYPE_PROPERTY) {
        JsValue::Object(p) => p,
        _ => ctx.intrinsic(WellKnownIntrinsics::ObjectPrototype),
    };
    let instance = object_create(Some(proto));
    log::trace!("Constructing instance of {}", callee);
    let result = invoke(ctx, &f, Some(JsValue::Object(instance.clone())), args)?;
    Ok(match result {
        JsValue::Object(_) => result,
        _ => JsValue::Object(instance),
    })
}

/// `value instanceof target`: is `target.prototype` on `value`'s parent chain?
pub fn instance_of(value: &JsValue, target: &JsValue) -> Result<bool, JErrorType> {
    let target = match target {
        JsValue::Object(t) if target.is_callable() => t,
        _ => {
            return Err(JErrorType::TypeError(
                "Right-hand side of 'instanceof' is not callable".to_string(),
            ))
        }
    };
    let proto = match get(target, PROTOTYPE_PROPERTY) {
        JsValue::Object(p) => p,
        _ => {
            return Err(JErrorType::TypeError(
                "Function has non-object prototype in instanceof check".to_string(),
            ))
        }
    };
    Ok(match value {
        JsValue::Object(o) => is_prototype_of(&proto, o),
        _ => false,
    })
}
