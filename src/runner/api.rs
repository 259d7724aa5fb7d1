use std::fs;
use std::path::Path;

use crate::parser::ast::ProgramData;
use crate::parser::JsParser;
use crate::runner::ds::error::JErrorType;
use crate::runner::eval::statement::execute_program;
use crate::runner::eval::types::ValueResult;
use crate::runner::plugin::types::EvalContext;

/// Parse and run `source` in `ctx`'s global scope. The result is the value
/// of the last statement that produced one, or `undefined`.
pub fn run_script(source: &str, ctx: &mut EvalContext) -> ValueResult {
    let program = JsParser::parse_to_ast_from_str(source)?;
    run_program(&program, ctx)
}

pub fn run_program(program: &ProgramData, ctx: &mut EvalContext) -> ValueResult {
    let completion = execute_program(program, ctx)?;
    Ok(completion.get_value())
}

pub fn run_file(path: &Path, ctx: &mut EvalContext) -> ValueResult {
    let source = read_script(path)?;
    run_script(&source, ctx)
}

/// Read a script file, reporting I/O failures as syntax errors against the path.
pub fn read_script(path: &Path) -> Result<String, JErrorType> {
    fs::read_to_string(path).map_err(|e| {
        JErrorType::SyntaxError(format!("cannot read {}: {}", path.display(), e))
    })
}
