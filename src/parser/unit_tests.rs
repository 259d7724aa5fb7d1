use super::api::JsParser;
use super::api::Rule;
use super::ast::{
    ExpressionType, HasMeta, LiteralType, MemberExpressionType, NumberLiteralType, StatementType,
    VariableDeclarationOrExpression,
};
use crate::runner::ds::error::JErrorType;

use pest::consumes_to;
use pest::fails_with;
use pest::parses_to;

fn parse(script: &str) -> super::ast::ProgramData {
    JsParser::parse_to_ast_from_str(script).unwrap()
}

fn only_expression(script: &str) -> ExpressionType {
    let mut program = parse(script);
    assert_eq!(program.body.len(), 1);
    match program.body.remove(0) {
        StatementType::ExpressionStatement { expression } => expression,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

// ===== Tokens =====

#[test]
fn test_integer_literal() {
    parses_to! {
        parser: JsParser,
        input: "10",
        rule: Rule::numeric_literal,
        tokens: [
            numeric_literal(0, 2)
        ]
    };
}

#[test]
fn test_decimal_literal_with_exponent() {
    parses_to! {
        parser: JsParser,
        input: "1.5e3",
        rule: Rule::numeric_literal,
        tokens: [
            numeric_literal(0, 5)
        ]
    };
}

#[test]
fn test_single_quoted_string() {
    parses_to! {
        parser: JsParser,
        input: "'Hi!'",
        rule: Rule::string_literal,
        tokens: [
            string_literal(0, 5, [
                single_string_characters(1, 4)
            ])
        ]
    };
}

#[test]
fn test_double_quoted_string_with_escape() {
    parses_to! {
        parser: JsParser,
        input: "\"a\\\"b\"",
        rule: Rule::string_literal,
        tokens: [
            string_literal(0, 6, [
                double_string_characters(1, 5)
            ])
        ]
    };
}

#[test]
fn test_string_cannot_span_lines() {
    fails_with! {
        parser: JsParser,
        input: "'one\ntwo'",
        rule: Rule::string_literal,
        positives: vec![Rule::string_literal],
        negatives: vec![],
        pos: 0
    };
}

#[test]
fn test_identifier() {
    parses_to! {
        parser: JsParser,
        input: "grandParent",
        rule: Rule::identifier,
        tokens: [
            identifier(0, 11)
        ]
    };
}

#[test]
fn test_identifier_may_start_with_keyword() {
    parses_to! {
        parser: JsParser,
        input: "variable",
        rule: Rule::identifier,
        tokens: [
            identifier(0, 8)
        ]
    };
}

#[test]
fn test_reserved_word_is_not_an_identifier() {
    fails_with! {
        parser: JsParser,
        input: "this",
        rule: Rule::identifier,
        positives: vec![Rule::identifier],
        negatives: vec![],
        pos: 0
    };
}

#[test]
fn test_formal_parameters() {
    parses_to! {
        parser: JsParser,
        input: "(a, b)",
        rule: Rule::formal_parameters,
        tokens: [
            formal_parameters(0, 6, [
                identifier(1, 2),
                identifier(4, 5)
            ])
        ]
    };
}

#[test]
fn test_member_access() {
    parses_to! {
        parser: JsParser,
        input: ".__proto__",
        rule: Rule::member_access,
        tokens: [
            member_access(0, 10, [
                identifier_name(1, 10)
            ])
        ]
    };
}

// ===== AST =====

#[test]
fn test_var_declaration_ast() {
    let program = parse("var x = 1, y;");
    match &program.body[0] {
        StatementType::VariableDeclaration(decl) => {
            assert_eq!(decl.declarations.len(), 2);
            assert_eq!(decl.declarations[0].id.name, "x");
            assert!(matches!(
                decl.declarations[0].init,
                Some(ExpressionType::Literal(LiteralType::NumberLiteral(
                    NumberLiteralType::IntegerLiteral(1)
                )))
            ));
            assert_eq!(decl.declarations[1].id.name, "y");
            assert!(decl.declarations[1].init.is_none());
        }
        other => panic!("expected a var declaration, got {:?}", other),
    }
}

#[test]
fn test_string_escapes_are_decoded() {
    match only_expression(r#"'line\nnext'"#) {
        ExpressionType::Literal(LiteralType::StringLiteral(s)) => assert_eq!(s, "line\nnext"),
        other => panic!("expected a string literal, got {:?}", other),
    }
}

#[test]
fn test_method_call_ast() {
    match only_expression("child.sayHi('there')") {
        ExpressionType::CallExpression {
            callee, arguments, ..
        } => {
            assert_eq!(arguments.len(), 1);
            match *callee {
                ExpressionType::MemberExpression(MemberExpressionType::SimpleMemberExpression {
                    property,
                    ..
                }) => assert_eq!(property, "sayHi"),
                other => panic!("expected a member callee, got {:?}", other),
            }
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_new_expression_ast() {
    match only_expression("new Cat('Biscuit')") {
        ExpressionType::NewExpression { arguments, .. } => assert_eq!(arguments.len(), 1),
        other => panic!("expected new, got {:?}", other),
    }
}

#[test]
fn test_for_loop_with_var_init() {
    let program = parse("for (var i = 0; i < 6; i++) {}");
    match &program.body[0] {
        StatementType::ForStatement { init, test, update, .. } => {
            assert!(matches!(
                init,
                Some(VariableDeclarationOrExpression::VariableDeclaration(_))
            ));
            assert!(test.is_some());
            assert!(matches!(
                update,
                Some(ExpressionType::UpdateExpression { prefix: false, .. })
            ));
        }
        other => panic!("expected a for loop, got {:?}", other),
    }
    assert_eq!(program.var_names, vec!["i"]);
}

#[test]
fn test_semicolons_are_optional() {
    let program = parse("var a = 1\nvar b = 2\na + b");
    assert_eq!(program.body.len(), 3);
}

// ===== Hoisting collection =====

#[test]
fn test_var_names_collected_across_blocks() {
    let program = parse(
        "var a;
         if (a) { var b = 1; } else { var c; }
         while (false) { var d; }
         var a = 2;",
    );
    assert_eq!(program.var_names, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_function_declarations_collected_but_not_nested_vars() {
    let program = parse(
        "function outer(x) {
             var inner = 1;
             function nested() { var deep; }
         }
         var f = function named() { var hidden; };",
    );
    assert_eq!(program.var_names, vec!["outer", "f"]);
    assert_eq!(program.function_declarations.len(), 1);
    let outer = &program.function_declarations[0];
    assert_eq!(outer.name.as_deref(), Some("outer"));
    assert_eq!(outer.params, vec!["x"]);
    assert_eq!(outer.var_names, vec!["inner", "nested"]);
    assert_eq!(outer.function_declarations.len(), 1);
}

#[test]
fn test_function_source_text_and_line() {
    let program = parse("var x;\nfunction hello() { return 'hi'; }");
    let hello = &program.function_declarations[0];
    assert_eq!(hello.get_meta().line(), 2);
    assert_eq!(hello.meta.source_text(), "function hello() { return 'hi'; }");
}

// ===== Errors =====

#[test]
fn test_syntax_error_is_reported() {
    match JsParser::parse_to_ast_from_str("var = 5;") {
        Err(JErrorType::SyntaxError(_)) => {}
        other => panic!("expected a syntax error, got {:?}", other.map(|p| p.body.len())),
    }
}

#[test]
fn test_invalid_assignment_target() {
    assert!(JsParser::parse_to_ast_from_str("1 = 2;").is_err());
    assert!(JsParser::parse_to_ast_from_str("f()++;").is_err());
}

#[test]
fn test_duplicate_parameters_rejected() {
    assert!(JsParser::parse_to_ast_from_str("function f(a, a) {}").is_err());
}
