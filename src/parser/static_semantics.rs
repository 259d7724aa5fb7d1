use std::rc::Rc;

use crate::parser::ast::{
    FunctionData, StatementType, VariableDeclarationData, VariableDeclarationOrExpression,
};

/// Var-scoped declarations of one function body (or script).
pub struct Semantics {
    pub(crate) var_names: Vec<String>,
    pub(crate) function_declarations: Vec<Rc<FunctionData>>,
}
impl Semantics {
    pub(crate) fn new_empty() -> Self {
        Semantics {
            var_names: vec![],
            function_declarations: vec![],
        }
    }

    fn add_var_name(&mut self, name: &str) {
        if !self.var_names.iter().any(|n| n == name) {
            self.var_names.push(name.to_string());
        }
    }

    fn add_variable_declaration(&mut self, v: &VariableDeclarationData) {
        for d in &v.declarations {
            self.add_var_name(&d.id.name);
        }
    }
}

/// Collects every `var` name and function declaration reachable from
/// `statements` without crossing into a nested function. Blocks and loop
/// bodies are walked because they share the enclosing function scope.
pub(crate) fn get_var_scoped_declarations(statements: &[StatementType]) -> Semantics {
    let mut semantics = Semantics::new_empty();
    for s in statements {
        scan_statement(s, &mut semantics);
    }
    semantics
}

fn scan_statement(statement: &StatementType, semantics: &mut Semantics) {
    match statement {
        StatementType::VariableDeclaration(v) => semantics.add_variable_declaration(v),
        StatementType::FunctionDeclaration(f) => {
            if let Some(name) = &f.name {
                semantics.add_var_name(name);
            }
            semantics.function_declarations.push(f.clone());
        }
        StatementType::BlockStatement(body) => {
            for s in body {
                scan_statement(s, semantics);
            }
        }
        StatementType::IfStatement {
            consequent,
            alternate,
            ..
        } => {
            scan_statement(consequent, semantics);
            if let Some(alternate) = alternate {
                scan_statement(alternate, semantics);
            }
        }
        StatementType::ForStatement { init, body, .. } => {
            if let Some(VariableDeclarationOrExpression::VariableDeclaration(v)) = init {
                semantics.add_variable_declaration(v);
            }
            scan_statement(body, semantics);
        }
        StatementType::WhileStatement { body, .. } => scan_statement(body, semantics),
        StatementType::ExpressionStatement { .. }
        | StatementType::ReturnStatement { .. }
        | StatementType::EmptyStatement => {}
    }
}
