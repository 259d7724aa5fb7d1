//! Statement execution.
//!
//! Blocks and loops run in the scope of the enclosing function; only
//! function invocation creates a new scope.

use crate::parser::ast::{
    ExpressionType, ProgramData, StatementType, VariableDeclarationData,
    VariableDeclarationOrExpression,
};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::lex_env::declare;
use crate::runner::ds::operations::type_conversion::to_boolean;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::EvalContext;

use super::expression::evaluate_expression;
use super::function::hoist_declarations;
use super::types::{Completion, EvalResult};

/// Execute a statement and return its completion.
pub fn execute_statement(stmt: &StatementType, ctx: &mut EvalContext) -> EvalResult {
    match stmt {
        StatementType::EmptyStatement => Ok(Completion::normal()),

        StatementType::ExpressionStatement { expression } => {
            let value = evaluate_expression(expression, ctx)?;
            Ok(Completion::normal_with_value(value))
        }

        StatementType::BlockStatement(body) => execute_statement_list(body, ctx),

        StatementType::VariableDeclaration(decl) => {
            execute_variable_declaration(decl, ctx)?;
            Ok(Completion::normal())
        }

        // Bound when the enclosing body was entered.
        StatementType::FunctionDeclaration(_) => Ok(Completion::normal()),

        StatementType::IfStatement {
            test,
            consequent,
            alternate,
        } => {
            if to_boolean(&evaluate_expression(test, ctx)?) {
                execute_statement(consequent, ctx)
            } else if let Some(alternate) = alternate {
                execute_statement(alternate, ctx)
            } else {
                Ok(Completion::normal())
            }
        }

        StatementType::WhileStatement { test, body } => {
            execute_loop(None, Some(test), None, body, ctx)
        }

        StatementType::ForStatement {
            init,
            test,
            update,
            body,
        } => execute_loop(init.as_ref(), test.as_ref(), update.as_ref(), body, ctx),

        StatementType::ReturnStatement { argument } => {
            let value = match argument {
                Some(arg) => evaluate_expression(arg, ctx)?,
                None => JsValue::Undefined,
            };
            Ok(Completion::return_value(value))
        }
    }
}

/// Run statements in order, stopping at the first abrupt completion. The
/// completion value is that of the last statement that produced one.
pub fn execute_statement_list(statements: &[StatementType], ctx: &mut EvalContext) -> EvalResult {
    let mut last_value = None;
    for stmt in statements {
        let completion = execute_statement(stmt, ctx)?;
        if completion.is_abrupt() {
            return Ok(completion);
        }
        if completion.value.is_some() {
            last_value = completion.value;
        }
    }
    Ok(Completion::normal().update_empty(last_value))
}

pub fn execute_function_body(body: &[StatementType], ctx: &mut EvalContext) -> EvalResult {
    execute_statement_list(body, ctx)
}

/// Hoist the script's declarations into the running scope, then run it.
pub fn execute_program(program: &ProgramData, ctx: &mut EvalContext) -> EvalResult {
    let env = ctx.current_env();
    hoist_declarations(
        &env,
        &program.var_names,
        &program.function_declarations,
        ctx,
    )?;
    execute_statement_list(&program.body, ctx)
}

/// `var` with an initialiser writes the binding in the running function's
/// scope; without one it leaves the hoisted value alone.
fn execute_variable_declaration(
    decl: &VariableDeclarationData,
    ctx: &mut EvalContext,
) -> Result<(), JErrorType> {
    for declarator in &decl.declarations {
        if let Some(init) = &declarator.init {
            let value = evaluate_expression(init, ctx)?;
            declare(&ctx.current_env(), &declarator.id.name, value)?;
        }
    }
    Ok(())
}

fn execute_loop(
    init: Option<&VariableDeclarationOrExpression>,
    test: Option<&ExpressionType>,
    update: Option<&ExpressionType>,
    body: &StatementType,
    ctx: &mut EvalContext,
) -> EvalResult {
    match init {
        Some(VariableDeclarationOrExpression::VariableDeclaration(decl)) => {
            execute_variable_declaration(decl, ctx)?
        }
        Some(VariableDeclarationOrExpression::Expression(expr)) => {
            evaluate_expression(expr, ctx)?;
        }
        None => {}
    }
    let mut last_value = None;
    loop {
        if let Some(test) = test {
            if !to_boolean(&evaluate_expression(test, ctx)?) {
                break;
            }
        }
        let completion = execute_statement(body, ctx)?;
        if completion.is_abrupt() {
            return Ok(completion);
        }
        if completion.value.is_some() {
            last_value = completion.value;
        }
        if let Some(update) = update {
            evaluate_expression(update, ctx)?;
        }
    }
    Ok(Completion::normal().update_empty(last_value))
}
