use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;

use pest::error::{Error, ErrorVariant};
use pest::iterators::{Pair, Pairs};
use pest::{Parser, Position, Span};
use pest_derive::Parser;

use super::ast::*;
use super::static_semantics::get_var_scoped_declarations;
use crate::runner::ds::error::JErrorType;
use crate::runner::eval::{STACK_GROW_SIZE, STACK_RED_ZONE};

#[derive(Parser)]
#[grammar = "parser/js_grammar.pest"] // relative to src
pub struct JsParser;

const TAB_WIDTH: usize = 2;

lazy_static! {
    static ref ESCAPED_CHARACTERS: HashMap<char, char> = {
        let mut m = HashMap::new();
        m.insert('n', '\n');
        m.insert('t', '\t');
        m.insert('r', '\r');
        m.insert('b', '\u{8}');
        m.insert('f', '\u{c}');
        m.insert('v', '\u{b}');
        m.insert('0', '\0');
        m
    };
}

type BuildResult<T> = Result<T, Error<Rule>>;

impl JsParser {
    /// Parses a script into its AST, reporting grammar failures as `SyntaxError`.
    pub fn parse_to_ast_from_str(script: &str) -> Result<ProgramData, JErrorType> {
        parse_to_ast(script).map_err(|e| JErrorType::SyntaxError(e.to_string()))
    }
}

pub fn parse_to_token_tree(script: &str) -> Result<String, String> {
    let mut tree = vec![];
    let start = Instant::now();
    let result = JsParser::parse(Rule::script, script);
    log::debug!(
        "token tree parse took {}ms",
        Instant::now().saturating_duration_since(start).as_millis()
    );

    match result {
        Ok(pairs) => {
            for pair in pairs {
                tree.push(pair_to_string(pair, 0).join("\n"));
            }
        }
        Err(rule) => {
            return Err(format!("Parse error due to {}", rule));
        }
    }
    Ok(tree.join("\n"))
}

fn pair_to_string(pair: Pair<Rule>, level: usize) -> Vec<String> {
    let mut tree = vec![];
    let span = pair.as_span();
    let rule_name = format!(
        "{:?} => ({},{}) #{:?}",
        pair.as_rule(),
        span.start(),
        span.end(),
        span.as_str()
    );
    let string_pads = " ".repeat(level * TAB_WIDTH);
    tree.push(format!("{}{}", string_pads, rule_name));
    for child_pair in pair.into_inner() {
        tree.append(pair_to_string(child_pair, level + 1).as_mut());
    }
    tree
}

pub fn parse_to_ast(script: &str) -> Result<ProgramData, Error<Rule>> {
    let start = Instant::now();
    let mut pairs = JsParser::parse(Rule::script, script)?;
    let script_pair = pairs.next().ok_or_else(|| {
        Error::new_from_pos(
            ErrorVariant::CustomError {
                message: "Empty parse result".to_string(),
            },
            Position::from_start(script),
        )
    })?;
    let builder = AstBuilder {
        script: Rc::new(script.to_string()),
    };
    let program = builder.build_ast_from_script(script_pair)?;
    log::debug!(
        "parsed {} top level statements in {}ms",
        program.body.len(),
        Instant::now().saturating_duration_since(start).as_millis()
    );
    Ok(program)
}

fn get_unexpected_error(src: &'static str, pair: &Pair<Rule>) -> Error<Rule> {
    let message = format!(
        "Unexpected state reached in the parser at \"{:?}\" ({}). This indicates internal logic error in the parser.",
        pair.as_rule(),
        src
    );
    Error::new_from_span(ErrorVariant::CustomError { message }, pair.as_span())
}

fn get_validation_error(message: String, span: Span) -> Error<Rule> {
    Error::new_from_span(ErrorVariant::CustomError { message }, span)
}

fn next_child<'i>(
    inner: &mut impl Iterator<Item = Pair<'i, Rule>>,
    span: Span<'i>,
) -> BuildResult<Pair<'i, Rule>> {
    inner.next().ok_or_else(|| {
        get_validation_error(
            "Unexpected end of syntax node".to_string(),
            span,
        )
    })
}

/// Precedence rules that matched a single operand add no AST node; descend
/// to that operand without recursing.
fn skip_pass_through(mut pair: Pair<Rule>) -> Pair<Rule> {
    loop {
        match pair.as_rule() {
            Rule::expression
            | Rule::assignment_expression
            | Rule::conditional_expression
            | Rule::logical_or_expression
            | Rule::logical_and_expression
            | Rule::equality_expression
            | Rule::relational_expression
            | Rule::additive_expression
            | Rule::multiplicative_expression
            | Rule::unary_expression
            | Rule::postfix_expression
            | Rule::left_hand_side_expression
            | Rule::parenthesized_expression => {
                let mut inner = pair.clone().into_inner();
                match (inner.next(), inner.next()) {
                    (Some(only), None) => pair = only,
                    _ => return pair,
                }
            }
            _ => return pair,
        }
    }
}

fn is_keyword(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::kw_var
            | Rule::kw_function
            | Rule::kw_return
            | Rule::kw_if
            | Rule::kw_else
            | Rule::kw_for
            | Rule::kw_while
            | Rule::kw_new
    )
}

fn inner_without_keywords(pair: Pair<Rule>) -> impl Iterator<Item = Pair<Rule>> {
    pair.into_inner().filter(|p| !is_keyword(p.as_rule()))
}

struct AstBuilder {
    script: Rc<String>,
}
impl AstBuilder {
    fn get_meta(&self, pair: &Pair<Rule>) -> Meta {
        let span = pair.as_span();
        Meta {
            start_index: span.start(),
            end_index: span.end(),
            script: self.script.clone(),
        }
    }

    fn build_ast_from_script(&self, pair: Pair<Rule>) -> BuildResult<ProgramData> {
        let meta = self.get_meta(&pair);
        let body = self.build_ast_from_statement_list(pair.into_inner())?;
        let semantics = get_var_scoped_declarations(&body);
        Ok(ProgramData {
            meta,
            body,
            var_names: semantics.var_names,
            function_declarations: semantics.function_declarations,
        })
    }

    fn build_ast_from_statement_list(&self, pairs: Pairs<Rule>) -> BuildResult<Vec<StatementType>> {
        let mut statements = vec![];
        for pair in pairs {
            match pair.as_rule() {
                Rule::EOI => { /* Do nothing */ }
                _ => statements.push(self.build_ast_from_statement(pair)?),
            }
        }
        Ok(statements)
    }

    fn build_ast_from_statement(&self, pair: Pair<Rule>) -> BuildResult<StatementType> {
        let span = pair.as_span();
        Ok(match pair.as_rule() {
            Rule::block_statement => {
                StatementType::BlockStatement(self.build_ast_from_statement_list(pair.into_inner())?)
            }
            Rule::empty_statement => StatementType::EmptyStatement,
            Rule::var_statement => {
                let declaration = next_child(&mut pair.into_inner(), span)?;
                StatementType::VariableDeclaration(self.build_ast_from_variable_declaration(declaration)?)
            }
            Rule::function_declaration => {
                StatementType::FunctionDeclaration(Rc::new(self.build_ast_from_function(pair)?))
            }
            Rule::if_statement => {
                let mut inner = inner_without_keywords(pair);
                let test = self.build_ast_from_expression(next_child(&mut inner, span)?)?;
                let consequent = self.build_ast_from_statement(next_child(&mut inner, span)?)?;
                let alternate = match inner.next() {
                    Some(p) => Some(Box::new(self.build_ast_from_statement(p)?)),
                    None => None,
                };
                StatementType::IfStatement {
                    test,
                    consequent: Box::new(consequent),
                    alternate,
                }
            }
            Rule::for_statement => self.build_ast_from_for_statement(pair)?,
            Rule::while_statement => {
                let mut inner = inner_without_keywords(pair);
                let test = self.build_ast_from_expression(next_child(&mut inner, span)?)?;
                let body = self.build_ast_from_statement(next_child(&mut inner, span)?)?;
                StatementType::WhileStatement {
                    test,
                    body: Box::new(body),
                }
            }
            Rule::return_statement => {
                let argument = match inner_without_keywords(pair).next() {
                    Some(p) => Some(self.build_ast_from_expression(p)?),
                    None => None,
                };
                StatementType::ReturnStatement { argument }
            }
            Rule::expression_statement => {
                let expression = self.build_ast_from_expression(next_child(&mut pair.into_inner(), span)?)?;
                StatementType::ExpressionStatement { expression }
            }
            _ => return Err(get_unexpected_error("statement", &pair)),
        })
    }

    fn build_ast_from_for_statement(&self, pair: Pair<Rule>) -> BuildResult<StatementType> {
        let span = pair.as_span();
        let mut init = None;
        let mut test = None;
        let mut update = None;
        let mut body = None;
        for p in inner_without_keywords(pair) {
            match p.as_rule() {
                Rule::for_init => {
                    let inner_pair = next_child(&mut p.into_inner(), span)?;
                    init = Some(match inner_pair.as_rule() {
                        Rule::variable_declaration => VariableDeclarationOrExpression::VariableDeclaration(
                            self.build_ast_from_variable_declaration(inner_pair)?,
                        ),
                        _ => VariableDeclarationOrExpression::Expression(
                            self.build_ast_from_expression(inner_pair)?,
                        ),
                    });
                }
                Rule::for_test => {
                    test = Some(self.build_ast_from_expression(next_child(&mut p.into_inner(), span)?)?);
                }
                Rule::for_update => {
                    update = Some(self.build_ast_from_expression(next_child(&mut p.into_inner(), span)?)?);
                }
                _ => body = Some(self.build_ast_from_statement(p)?),
            }
        }
        let body = body.ok_or_else(|| get_validation_error("Missing for loop body".to_string(), span))?;
        Ok(StatementType::ForStatement {
            init,
            test,
            update,
            body: Box::new(body),
        })
    }

    fn build_ast_from_variable_declaration(&self, pair: Pair<Rule>) -> BuildResult<VariableDeclarationData> {
        let mut declarations = vec![];
        for declarator in inner_without_keywords(pair) {
            let span = declarator.as_span();
            let mut inner = declarator.into_inner();
            let id_pair = next_child(&mut inner, span)?;
            let id = IdentifierData {
                name: id_pair.as_str().to_string(),
                meta: self.get_meta(&id_pair),
            };
            let init = match inner.next() {
                Some(p) => Some(self.build_ast_from_expression(p)?),
                None => None,
            };
            declarations.push(VariableDeclaratorData { id, init });
        }
        Ok(VariableDeclarationData { declarations })
    }

    fn build_ast_from_function(&self, pair: Pair<Rule>) -> BuildResult<FunctionData> {
        let meta = self.get_meta(&pair);
        let mut name = None;
        let mut params = vec![];
        let mut body = vec![];
        for p in inner_without_keywords(pair) {
            match p.as_rule() {
                Rule::identifier => name = Some(p.as_str().to_string()),
                Rule::formal_parameters => {
                    for param in p.into_inner() {
                        let param_name = param.as_str().to_string();
                        if params.contains(&param_name) {
                            return Err(get_validation_error(
                                format!("Duplicate parameter name '{}'", param_name),
                                param.as_span(),
                            ));
                        }
                        params.push(param_name);
                    }
                }
                Rule::function_body => body = self.build_ast_from_statement_list(p.into_inner())?,
                _ => return Err(get_unexpected_error("function", &p)),
            }
        }
        let semantics = get_var_scoped_declarations(&body);
        Ok(FunctionData {
            meta,
            name,
            params,
            body,
            var_names: semantics.var_names,
            function_declarations: semantics.function_declarations,
        })
    }

    fn build_ast_from_expression(&self, pair: Pair<Rule>) -> BuildResult<ExpressionType> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.build_ast_from_expression_inner(skip_pass_through(pair))
        })
    }

    fn build_ast_from_expression_inner(&self, pair: Pair<Rule>) -> BuildResult<ExpressionType> {
        match pair.as_rule() {
            Rule::expression => self.build_ast_from_sequence_expression(pair),
            Rule::assignment_expression => self.build_ast_from_assignment_expression(pair),
            Rule::conditional_expression => self.build_ast_from_conditional_expression(pair),
            Rule::logical_or_expression | Rule::logical_and_expression => {
                self.build_ast_from_operator_chain(pair, true)
            }
            Rule::equality_expression
            | Rule::relational_expression
            | Rule::additive_expression
            | Rule::multiplicative_expression => self.build_ast_from_operator_chain(pair, false),
            Rule::unary_expression => self.build_ast_from_unary_expression(pair),
            Rule::postfix_expression => self.build_ast_from_postfix_expression(pair),
            Rule::left_hand_side_expression => self.build_ast_from_left_hand_side_expression(pair),
            Rule::new_expression => self.build_ast_from_new_expression(pair),
            Rule::parenthesized_expression => {
                let span = pair.as_span();
                self.build_ast_from_expression(next_child(&mut pair.into_inner(), span)?)
            }
            Rule::this_expression => Ok(ExpressionType::ThisExpression),
            Rule::function_expression => Ok(ExpressionType::FunctionExpression(Rc::new(
                self.build_ast_from_function(pair)?,
            ))),
            Rule::array_literal => self.build_ast_from_array_literal(pair),
            Rule::object_literal => self.build_ast_from_object_literal(pair),
            _ => self.build_ast_from_atom(pair),
        }
    }

    fn build_ast_from_atom(&self, pair: Pair<Rule>) -> BuildResult<ExpressionType> {
        Ok(match pair.as_rule() {
            Rule::identifier => ExpressionType::Identifier(IdentifierData {
                name: pair.as_str().to_string(),
                meta: self.get_meta(&pair),
            }),
            Rule::null_literal => ExpressionType::Literal(LiteralType::NullLiteral),
            Rule::boolean_literal => {
                ExpressionType::Literal(LiteralType::BooleanLiteral(pair.as_str() == "true"))
            }
            Rule::numeric_literal => {
                ExpressionType::Literal(LiteralType::NumberLiteral(get_number_literal(&pair)?))
            }
            Rule::string_literal => {
                ExpressionType::Literal(LiteralType::StringLiteral(get_string_value(pair)?))
            }
            _ => return Err(get_unexpected_error("expression", &pair)),
        })
    }

    fn build_ast_from_sequence_expression(&self, pair: Pair<Rule>) -> BuildResult<ExpressionType> {
        let span = pair.as_span();
        let mut expressions = vec![];
        for p in pair.into_inner() {
            expressions.push(self.build_ast_from_expression(p)?);
        }
        match expressions.len() {
            0 => Err(get_validation_error("Empty expression".to_string(), span)),
            1 => Ok(expressions.remove(0)),
            _ => Ok(ExpressionType::SequenceExpression(expressions)),
        }
    }

    fn build_ast_from_conditional_expression(&self, pair: Pair<Rule>) -> BuildResult<ExpressionType> {
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let test = self.build_ast_from_expression(next_child(&mut inner, span)?)?;
        let consequent = match inner.next() {
            None => return Ok(test),
            Some(consequent) => self.build_ast_from_expression(consequent)?,
        };
        let alternate = self.build_ast_from_expression(next_child(&mut inner, span)?)?;
        Ok(ExpressionType::ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    fn build_ast_from_postfix_expression(&self, pair: Pair<Rule>) -> BuildResult<ExpressionType> {
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let argument = self.build_ast_from_expression(next_child(&mut inner, span)?)?;
        let op = match inner.next() {
            None => return Ok(argument),
            Some(op) => op,
        };
        if !argument.is_valid_simple_assignment_target() {
            return Err(get_validation_error(
                "Invalid left-hand side expression in postfix operation".to_string(),
                span,
            ));
        }
        Ok(ExpressionType::UpdateExpression {
            operator: get_update_operator(&op)?,
            prefix: false,
            argument: Box::new(argument),
        })
    }

    fn build_ast_from_array_literal(&self, pair: Pair<Rule>) -> BuildResult<ExpressionType> {
        let mut elements = vec![];
        for p in pair.into_inner() {
            elements.push(self.build_ast_from_expression(p)?);
        }
        Ok(ExpressionType::ArrayExpression(elements))
    }

    fn build_ast_from_object_literal(&self, pair: Pair<Rule>) -> BuildResult<ExpressionType> {
        let mut properties = vec![];
        for property in pair.into_inner() {
            let property_span = property.as_span();
            let mut inner = property.into_inner();
            let key_pair = next_child(&mut inner, property_span)?;
            let key = match key_pair.as_rule() {
                Rule::string_literal => get_string_value(key_pair)?,
                Rule::numeric_literal => match get_number_literal(&key_pair)? {
                    NumberLiteralType::IntegerLiteral(i) => i.to_string(),
                    NumberLiteralType::FloatLiteral(f) => f.to_string(),
                },
                _ => key_pair.as_str().to_string(),
            };
            let value = self.build_ast_from_expression(next_child(&mut inner, property_span)?)?;
            properties.push(PropertyData { key, value });
        }
        Ok(ExpressionType::ObjectExpression(properties))
    }

    fn build_ast_from_assignment_expression(&self, pair: Pair<Rule>) -> BuildResult<ExpressionType> {
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let left = self.build_ast_from_expression(next_child(&mut inner, span)?)?;
        let op_pair = match inner.next() {
            None => return Ok(left),
            Some(op_pair) => op_pair,
        };
        if !left.is_valid_simple_assignment_target() {
            return Err(get_validation_error(
                "Invalid left-hand side in assignment".to_string(),
                span,
            ));
        }
        let operator = match op_pair.as_str() {
            "=" => AssignmentOperator::Equals,
            "+=" => AssignmentOperator::AddEquals,
            "-=" => AssignmentOperator::SubtractEquals,
            "*=" => AssignmentOperator::MultiplyEquals,
            "/=" => AssignmentOperator::DivideEquals,
            _ => return Err(get_unexpected_error("assignment operator", &op_pair)),
        };
        let right = self.build_ast_from_expression(next_child(&mut inner, span)?)?;
        Ok(ExpressionType::AssignmentExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Operands and operators alternate; the chain folds to the left.
    fn build_ast_from_operator_chain(&self, pair: Pair<Rule>, is_logical: bool) -> BuildResult<ExpressionType> {
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let mut left = self.build_ast_from_expression(next_child(&mut inner, span)?)?;
        while let Some(op_pair) = inner.next() {
            let right = self.build_ast_from_expression(next_child(&mut inner, span)?)?;
            left = if is_logical {
                let operator = match op_pair.as_str() {
                    "||" => LogicalOperator::Or,
                    "&&" => LogicalOperator::And,
                    _ => return Err(get_unexpected_error("logical operator", &op_pair)),
                };
                ExpressionType::LogicalExpression {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                }
            } else {
                ExpressionType::BinaryExpression {
                    operator: get_binary_operator(&op_pair)?,
                    left: Box::new(left),
                    right: Box::new(right),
                }
            };
        }
        Ok(left)
    }

    fn build_ast_from_unary_expression(&self, pair: Pair<Rule>) -> BuildResult<ExpressionType> {
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let first = next_child(&mut inner, span)?;
        if first.as_rule() != Rule::unary_operator {
            return self.build_ast_from_expression(first);
        }
        let argument = self.build_ast_from_expression(next_child(&mut inner, span)?)?;
        Ok(match first.as_str() {
            "++" | "--" => {
                if !argument.is_valid_simple_assignment_target() {
                    return Err(get_validation_error(
                        "Invalid left-hand side expression in prefix operation".to_string(),
                        span,
                    ));
                }
                ExpressionType::UpdateExpression {
                    operator: get_update_operator(&first)?,
                    prefix: true,
                    argument: Box::new(argument),
                }
            }
            op => {
                let operator = match op {
                    "!" => UnaryOperator::LogicalNot,
                    "-" => UnaryOperator::Minus,
                    "+" => UnaryOperator::Plus,
                    "typeof" => UnaryOperator::TypeOf,
                    _ => return Err(get_unexpected_error("unary operator", &first)),
                };
                ExpressionType::UnaryExpression {
                    operator,
                    argument: Box::new(argument),
                }
            }
        })
    }

    fn build_ast_from_left_hand_side_expression(&self, pair: Pair<Rule>) -> BuildResult<ExpressionType> {
        let span = pair.as_span();
        let start_index = span.start();
        let mut inner = pair.into_inner();
        let mut expression = self.build_ast_from_expression(next_child(&mut inner, span)?)?;
        for tail in inner {
            expression = match tail.as_rule() {
                Rule::arguments => {
                    let meta = Meta {
                        start_index,
                        end_index: tail.as_span().end(),
                        script: self.script.clone(),
                    };
                    ExpressionType::CallExpression {
                        meta,
                        callee: Box::new(expression),
                        arguments: self.build_ast_from_arguments(tail)?,
                    }
                }
                _ => self.build_ast_from_member_tail(expression, tail)?,
            };
        }
        Ok(expression)
    }

    fn build_ast_from_new_expression(&self, pair: Pair<Rule>) -> BuildResult<ExpressionType> {
        let span = pair.as_span();
        let meta = self.get_meta(&pair);
        let mut inner = inner_without_keywords(pair);
        let mut callee = self.build_ast_from_expression(next_child(&mut inner, span)?)?;
        let mut arguments = vec![];
        for tail in inner {
            match tail.as_rule() {
                Rule::arguments => arguments = self.build_ast_from_arguments(tail)?,
                _ => callee = self.build_ast_from_member_tail(callee, tail)?,
            }
        }
        Ok(ExpressionType::NewExpression {
            meta,
            callee: Box::new(callee),
            arguments,
        })
    }

    fn build_ast_from_member_tail(&self, object: ExpressionType, tail: Pair<Rule>) -> BuildResult<ExpressionType> {
        let span = tail.as_span();
        Ok(match tail.as_rule() {
            Rule::member_access => ExpressionType::MemberExpression(
                MemberExpressionType::SimpleMemberExpression {
                    object: Box::new(object),
                    property: next_child(&mut tail.into_inner(), span)?.as_str().to_string(),
                },
            ),
            Rule::computed_member_access => ExpressionType::MemberExpression(
                MemberExpressionType::ComputedMemberExpression {
                    object: Box::new(object),
                    property: Box::new(
                        self.build_ast_from_expression(next_child(&mut tail.into_inner(), span)?)?,
                    ),
                },
            ),
            _ => return Err(get_unexpected_error("member access", &tail)),
        })
    }

    fn build_ast_from_arguments(&self, pair: Pair<Rule>) -> BuildResult<Vec<ExpressionType>> {
        let mut arguments = vec![];
        for p in pair.into_inner() {
            arguments.push(self.build_ast_from_expression(p)?);
        }
        Ok(arguments)
    }
}

fn get_binary_operator(pair: &Pair<Rule>) -> BuildResult<BinaryOperator> {
    Ok(match pair.as_str() {
        "==" => BinaryOperator::LooselyEqual,
        "!=" => BinaryOperator::LooselyUnequal,
        "===" => BinaryOperator::StrictlyEqual,
        "!==" => BinaryOperator::StrictlyUnequal,
        "<" => BinaryOperator::LessThan,
        "<=" => BinaryOperator::LessThanEqual,
        ">" => BinaryOperator::GreaterThan,
        ">=" => BinaryOperator::GreaterThanEqual,
        "+" => BinaryOperator::Add,
        "-" => BinaryOperator::Subtract,
        "*" => BinaryOperator::Multiply,
        "/" => BinaryOperator::Divide,
        "%" => BinaryOperator::Modulo,
        "in" => BinaryOperator::In,
        "instanceof" => BinaryOperator::InstanceOf,
        _ => return Err(get_unexpected_error("binary operator", pair)),
    })
}

fn get_update_operator(pair: &Pair<Rule>) -> BuildResult<UpdateOperator> {
    match pair.as_str() {
        "++" => Ok(UpdateOperator::PlusPlus),
        "--" => Ok(UpdateOperator::MinusMinus),
        _ => Err(get_unexpected_error("update operator", pair)),
    }
}

fn get_number_literal(pair: &Pair<Rule>) -> BuildResult<NumberLiteralType> {
    let text = pair.as_str();
    if !text.contains(|c| c == '.' || c == 'e' || c == 'E') {
        if let Ok(i) = text.parse::<i64>() {
            return Ok(NumberLiteralType::IntegerLiteral(i));
        }
    }
    text.parse::<f64>()
        .map(NumberLiteralType::FloatLiteral)
        .map_err(|e| get_validation_error(format!("Invalid number literal: {}", e), pair.as_span()))
}

fn get_string_value(pair: Pair<Rule>) -> BuildResult<String> {
    let span = pair.as_span();
    let characters = next_child(&mut pair.into_inner(), span)?;
    unescape(characters.as_str()).ok_or_else(|| {
        get_validation_error("Invalid escape sequence in string literal".to_string(), span)
    })
}

fn unescape(raw: &str) -> Option<String> {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        let escaped = chars.next()?;
        match escaped {
            'u' => value.push(read_hex_char(&mut chars, 4)?),
            'x' => value.push(read_hex_char(&mut chars, 2)?),
            _ => value.push(*ESCAPED_CHARACTERS.get(&escaped).unwrap_or(&escaped)),
        }
    }
    Some(value)
}

fn read_hex_char(chars: &mut std::str::Chars, digits: usize) -> Option<char> {
    let hex: String = chars.take(digits).collect();
    if hex.len() != digits {
        return None;
    }
    u32::from_str_radix(&hex, 16).ok().and_then(std::char::from_u32)
}
