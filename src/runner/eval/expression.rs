//! Expression evaluation.
//!
//! Identifiers and member expressions are first evaluated to a
//! [`Reference`] so that the same code serves reads, writes, updates and the
//! receiver of a method call.

use std::cmp::Ordering;

use crate::parser::ast::{
    AssignmentOperator, BinaryOperator, ExpressionType, LiteralType, LogicalOperator,
    MemberExpressionType, NumberLiteralType, UnaryOperator, UpdateOperator,
};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::LENGTH_PROPERTY;
use crate::runner::ds::object_property::is_array_index;
use crate::runner::ds::operations::lex_env::{get_identifier_reference, get_this_environment_value};
use crate::runner::ds::operations::object::{get, has_property, put};
use crate::runner::ds::operations::test_and_comparison::{
    abstract_equality_comparison, strict_equality_comparison,
};
use crate::runner::ds::operations::type_conversion::{
    to_boolean, to_number, to_primitive, to_property_key, to_string, type_of, TYPE_STR_UNDEFINED,
};
use crate::runner::ds::realm::WellKnownIntrinsics;
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::types::EvalContext;

use super::function::{call_value, construct, instance_of, instantiate_function_expression};
use super::types::{Reference, ReferenceBase, ReferenceResult, ValueResult};
use super::{STACK_GROW_SIZE, STACK_RED_ZONE};

/// Evaluate an expression and return its value.
pub fn evaluate_expression(expr: &ExpressionType, ctx: &mut EvalContext) -> ValueResult {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
        evaluate_expression_inner(expr, ctx)
    })
}

fn evaluate_expression_inner(expr: &ExpressionType, ctx: &mut EvalContext) -> ValueResult {
    match expr {
        ExpressionType::Literal(lit) => Ok(evaluate_literal(lit)),

        ExpressionType::Identifier(_) | ExpressionType::MemberExpression(_) => {
            let reference = evaluate_reference(expr, ctx)?;
            get_value(&reference, ctx)
        }

        ExpressionType::ThisExpression => Ok(get_this_environment_value(&ctx.current_env())),

        ExpressionType::ArrayExpression(elements) => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(evaluate_expression(element, ctx)?);
            }
            Ok(JsValue::Object(ctx.realm.new_array(values)))
        }

        ExpressionType::ObjectExpression(properties) => {
            let o = ctx.realm.new_object();
            for property in properties {
                let value = evaluate_expression(&property.value, ctx)?;
                put(&o, property.key.clone(), value)?;
            }
            Ok(JsValue::Object(o))
        }

        ExpressionType::FunctionExpression(function_data) => {
            let env = ctx.current_env();
            let f = instantiate_function_expression(function_data, &env, ctx)?;
            Ok(JsValue::Object(f))
        }

        ExpressionType::UnaryExpression { operator, argument } => {
            evaluate_unary_expression(*operator, argument, ctx)
        }

        ExpressionType::UpdateExpression {
            operator,
            prefix,
            argument,
        } => evaluate_update_expression(*operator, *prefix, argument, ctx),

        ExpressionType::BinaryExpression {
            operator,
            left,
            right,
        } => {
            let lval = evaluate_expression(left, ctx)?;
            let rval = evaluate_expression(right, ctx)?;
            apply_binary_operator(*operator, &lval, &rval)
        }

        ExpressionType::LogicalExpression {
            operator,
            left,
            right,
        } => {
            let lval = evaluate_expression(left, ctx)?;
            let short_circuit = match operator {
                LogicalOperator::And => !to_boolean(&lval),
                LogicalOperator::Or => to_boolean(&lval),
            };
            if short_circuit {
                Ok(lval)
            } else {
                evaluate_expression(right, ctx)
            }
        }

        ExpressionType::AssignmentExpression {
            operator,
            left,
            right,
        } => evaluate_assignment_expression(*operator, left, right, ctx),

        ExpressionType::ConditionalExpression {
            test,
            consequent,
            alternate,
        } => {
            if to_boolean(&evaluate_expression(test, ctx)?) {
                evaluate_expression(consequent, ctx)
            } else {
                evaluate_expression(alternate, ctx)
            }
        }

        ExpressionType::CallExpression {
            callee, arguments, ..
        } => evaluate_call_expression(callee, arguments, ctx),

        ExpressionType::NewExpression {
            callee, arguments, ..
        } => {
            let constructor = evaluate_expression(callee, ctx)?;
            let args = evaluate_arguments(arguments, ctx)?;
            if !constructor.is_callable() {
                return Err(JErrorType::TypeError(format!(
                    "{} is not a constructor",
                    describe_expression(callee)
                )));
            }
            construct(ctx, &constructor, args)
        }

        ExpressionType::SequenceExpression(expressions) => {
            let mut value = JsValue::Undefined;
            for e in expressions {
                value = evaluate_expression(e, ctx)?;
            }
            Ok(value)
        }
    }
}

fn evaluate_literal(lit: &LiteralType) -> JsValue {
    match lit {
        LiteralType::NullLiteral => JsValue::Null,
        LiteralType::BooleanLiteral(b) => JsValue::Boolean(*b),
        LiteralType::StringLiteral(s) => JsValue::String(s.clone()),
        LiteralType::NumberLiteral(NumberLiteralType::IntegerLiteral(i)) => {
            JsValue::Number(JsNumberType::Integer(*i))
        }
        LiteralType::NumberLiteral(NumberLiteralType::FloatLiteral(f)) => JsValue::from_f64(*f),
    }
}

/// Resolve an identifier or member expression without reading it.
pub fn evaluate_reference(expr: &ExpressionType, ctx: &mut EvalContext) -> ReferenceResult {
    match expr {
        ExpressionType::Identifier(id) => {
            let env = ctx.current_env();
            Ok(match get_identifier_reference(&env, &id.name) {
                Some(found) => Reference::environment(found, id.name.clone()),
                None => Reference::unresolvable(id.name.clone()),
            })
        }
        ExpressionType::MemberExpression(MemberExpressionType::SimpleMemberExpression {
            object,
            property,
        }) => {
            let base = evaluate_expression(object, ctx)?;
            Ok(Reference::property(base, property.clone()))
        }
        ExpressionType::MemberExpression(MemberExpressionType::ComputedMemberExpression {
            object,
            property,
        }) => {
            let base = evaluate_expression(object, ctx)?;
            let key = to_property_key(&evaluate_expression(property, ctx)?);
            Ok(Reference::property(base, key))
        }
        _ => Err(JErrorType::SyntaxError(
            "Invalid left-hand side in assignment".to_string(),
        )),
    }
}

pub fn get_value(reference: &Reference, ctx: &EvalContext) -> ValueResult {
    let name = &reference.referenced_name;
    match &reference.base {
        ReferenceBase::Object(base) => get_value_property(base, name, ctx),
        ReferenceBase::Environment(env) => env.borrow().inner.as_env_record().get_binding_value(name),
        ReferenceBase::Unresolvable => Err(JErrorType::UnboundName(name.clone())),
    }
}

/// Writes never create a binding: an unresolvable name is an error.
pub fn put_value(reference: &Reference, value: JsValue) -> Result<(), JErrorType> {
    let name = &reference.referenced_name;
    match &reference.base {
        ReferenceBase::Object(JsValue::Object(o)) => put(o, name.clone(), value),
        ReferenceBase::Object(base @ JsValue::Undefined)
        | ReferenceBase::Object(base @ JsValue::Null) => Err(JErrorType::TypeError(format!(
            "Cannot set properties of {} (setting '{}')",
            to_string(base),
            name
        ))),
        // Writes to primitives are dropped.
        ReferenceBase::Object(_) => Ok(()),
        ReferenceBase::Environment(env) => env
            .borrow_mut()
            .inner
            .as_env_record_mut()
            .set_mutable_binding(name.clone(), value),
        ReferenceBase::Unresolvable => Err(JErrorType::UnboundName(name.clone())),
    }
}

/// Property read on any value. Primitives other than `undefined` and `null`
/// read through `Object.prototype`; strings also expose `length` and indices.
pub fn get_value_property(base: &JsValue, name: &str, ctx: &EvalContext) -> ValueResult {
    match base {
        JsValue::Object(o) => Ok(get(o, name)),
        JsValue::Undefined | JsValue::Null => Err(JErrorType::TypeError(format!(
            "Cannot read properties of {} (reading '{}')",
            to_string(base),
            name
        ))),
        JsValue::String(s) if name == LENGTH_PROPERTY => {
            Ok(JsValue::Number(JsNumberType::Integer(s.chars().count() as i64)))
        }
        JsValue::String(s) if is_array_index(name).is_some() => Ok(is_array_index(name)
            .and_then(|i| s.chars().nth(i))
            .map(|c| JsValue::String(c.to_string()))
            .unwrap_or(JsValue::Undefined)),
        _ => Ok(get(
            &ctx.intrinsic(WellKnownIntrinsics::ObjectPrototype),
            name,
        )),
    }
}

fn evaluate_arguments(arguments: &[ExpressionType], ctx: &mut EvalContext) -> Result<Vec<JsValue>, JErrorType> {
    let mut args = Vec::with_capacity(arguments.len());
    for arg in arguments {
        args.push(evaluate_expression(arg, ctx)?);
    }
    Ok(args)
}

/// `o.f(...)` and `o[k](...)` pass `o` as receiver; any other callee is
/// invoked without one.
fn evaluate_call_expression(
    callee: &ExpressionType,
    arguments: &[ExpressionType],
    ctx: &mut EvalContext,
) -> ValueResult {
    let (func, this_value) = match callee {
        ExpressionType::Identifier(_) | ExpressionType::MemberExpression(_) => {
            let reference = evaluate_reference(callee, ctx)?;
            (get_value(&reference, ctx)?, reference.get_this_value())
        }
        _ => (evaluate_expression(callee, ctx)?, None),
    };
    let args = evaluate_arguments(arguments, ctx)?;
    if !func.is_callable() {
        return Err(JErrorType::TypeError(format!(
            "{} is not a function",
            describe_expression(callee)
        )));
    }
    call_value(ctx, &func, this_value, args)
}

fn evaluate_unary_expression(
    operator: UnaryOperator,
    argument: &ExpressionType,
    ctx: &mut EvalContext,
) -> ValueResult {
    match operator {
        UnaryOperator::TypeOf => {
            if let ExpressionType::Identifier(_) = argument {
                let reference = evaluate_reference(argument, ctx)?;
                if reference.is_unresolvable() {
                    return Ok(JsValue::String(TYPE_STR_UNDEFINED.to_string()));
                }
                let value = get_value(&reference, ctx)?;
                return Ok(JsValue::String(type_of(&value).to_string()));
            }
            let value = evaluate_expression(argument, ctx)?;
            Ok(JsValue::String(type_of(&value).to_string()))
        }
        UnaryOperator::LogicalNot => {
            let value = evaluate_expression(argument, ctx)?;
            Ok(JsValue::Boolean(!to_boolean(&value)))
        }
        UnaryOperator::Minus => {
            let value = evaluate_expression(argument, ctx)?;
            Ok(JsValue::from_f64(-to_number(&value)))
        }
        UnaryOperator::Plus => {
            let value = evaluate_expression(argument, ctx)?;
            Ok(JsValue::from_f64(to_number(&value)))
        }
    }
}

fn evaluate_update_expression(
    operator: UpdateOperator,
    prefix: bool,
    argument: &ExpressionType,
    ctx: &mut EvalContext,
) -> ValueResult {
    let reference = evaluate_reference(argument, ctx)?;
    let old_value = to_number(&get_value(&reference, ctx)?);
    let new_value = match operator {
        UpdateOperator::PlusPlus => old_value + 1.0,
        UpdateOperator::MinusMinus => old_value - 1.0,
    };
    put_value(&reference, JsValue::from_f64(new_value))?;
    Ok(JsValue::from_f64(if prefix { new_value } else { old_value }))
}

fn evaluate_assignment_expression(
    operator: AssignmentOperator,
    left: &ExpressionType,
    right: &ExpressionType,
    ctx: &mut EvalContext,
) -> ValueResult {
    let reference = evaluate_reference(left, ctx)?;
    let value = match operator {
        AssignmentOperator::Equals => evaluate_expression(right, ctx)?,
        _ => {
            let lval = get_value(&reference, ctx)?;
            let rval = evaluate_expression(right, ctx)?;
            let binary_operator = match operator {
                AssignmentOperator::AddEquals => BinaryOperator::Add,
                AssignmentOperator::SubtractEquals => BinaryOperator::Subtract,
                AssignmentOperator::MultiplyEquals => BinaryOperator::Multiply,
                _ => BinaryOperator::Divide,
            };
            apply_binary_operator(binary_operator, &lval, &rval)?
        }
    };
    put_value(&reference, value.clone())?;
    Ok(value)
}

pub fn apply_binary_operator(operator: BinaryOperator, lval: &JsValue, rval: &JsValue) -> ValueResult {
    Ok(match operator {
        BinaryOperator::Add => {
            let (lprim, rprim) = (to_primitive(lval), to_primitive(rval));
            match (&lprim, &rprim) {
                (JsValue::String(_), _) | (_, JsValue::String(_)) => {
                    JsValue::String(format!("{}{}", to_string(&lprim), to_string(&rprim)))
                }
                _ => JsValue::from_f64(to_number(&lprim) + to_number(&rprim)),
            }
        }
        BinaryOperator::Subtract => JsValue::from_f64(to_number(lval) - to_number(rval)),
        BinaryOperator::Multiply => JsValue::from_f64(to_number(lval) * to_number(rval)),
        BinaryOperator::Divide => JsValue::from_f64(to_number(lval) / to_number(rval)),
        BinaryOperator::Modulo => JsValue::from_f64(to_number(lval) % to_number(rval)),
        BinaryOperator::StrictlyEqual => JsValue::Boolean(strict_equality_comparison(lval, rval)),
        BinaryOperator::StrictlyUnequal => {
            JsValue::Boolean(!strict_equality_comparison(lval, rval))
        }
        BinaryOperator::LooselyEqual => JsValue::Boolean(abstract_equality_comparison(lval, rval)),
        BinaryOperator::LooselyUnequal => {
            JsValue::Boolean(!abstract_equality_comparison(lval, rval))
        }
        BinaryOperator::LessThan => JsValue::Boolean(compare(lval, rval) == Some(Ordering::Less)),
        BinaryOperator::GreaterThan => {
            JsValue::Boolean(compare(lval, rval) == Some(Ordering::Greater))
        }
        BinaryOperator::LessThanEqual => JsValue::Boolean(matches!(
            compare(lval, rval),
            Some(Ordering::Less) | Some(Ordering::Equal)
        )),
        BinaryOperator::GreaterThanEqual => JsValue::Boolean(matches!(
            compare(lval, rval),
            Some(Ordering::Greater) | Some(Ordering::Equal)
        )),
        BinaryOperator::In => match rval {
            JsValue::Object(o) => JsValue::Boolean(has_property(o, &to_property_key(lval))),
            _ => {
                return Err(JErrorType::TypeError(format!(
                    "Cannot use 'in' operator to search for '{}' in {}",
                    to_string(lval),
                    to_string(rval)
                )))
            }
        },
        BinaryOperator::InstanceOf => JsValue::Boolean(instance_of(lval, rval)?),
    })
}

/// Strings compare by code point, everything else numerically. `None` when
/// either side is NaN.
fn compare(lval: &JsValue, rval: &JsValue) -> Option<Ordering> {
    let (lprim, rprim) = (to_primitive(lval), to_primitive(rval));
    match (&lprim, &rprim) {
        (JsValue::String(a), JsValue::String(b)) => Some(a.cmp(b)),
        _ => to_number(&lprim).partial_cmp(&to_number(&rprim)),
    }
}

/// Short source-like name of a callee for error messages.
fn describe_expression(expr: &ExpressionType) -> String {
    match expr {
        ExpressionType::Identifier(id) => id.name.clone(),
        ExpressionType::ThisExpression => "this".to_string(),
        ExpressionType::MemberExpression(MemberExpressionType::SimpleMemberExpression {
            object,
            property,
        }) => format!("{}.{}", describe_expression(object), property),
        ExpressionType::MemberExpression(MemberExpressionType::ComputedMemberExpression {
            object,
            ..
        }) => format!("{}[...]", describe_expression(object)),
        ExpressionType::CallExpression { meta, .. } | ExpressionType::NewExpression { meta, .. } => {
            meta.source_text().to_string()
        }
        _ => "expression".to_string(),
    }
}
