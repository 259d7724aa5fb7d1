use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::ds::env_record::{
    DeclarativeEnvironmentRecord, EnvironmentRecordType, FunctionEnvironmentRecord,
    GlobalEnvironmentRecord,
};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::lex_env::{JsLexEnvironmentType, LexEnvironment};
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::value::JsValue;

/// The nearest scope, starting at `lex` and walking outward, that binds `name`.
pub fn get_identifier_reference(
    lex: &JsLexEnvironmentType,
    name: &str,
) -> Option<JsLexEnvironmentType> {
    let mut current = Some(lex.clone());
    while let Some(env) = current {
        if env.borrow().inner.as_env_record().has_binding(name) {
            return Some(env);
        }
        current = env.borrow().outer.clone();
    }
    None
}

pub fn resolve(lex: &JsLexEnvironmentType, name: &str) -> Result<JsValue, JErrorType> {
    match get_identifier_reference(lex, name) {
        Some(env) => env.borrow().inner.as_env_record().get_binding_value(name),
        None => Err(JErrorType::UnboundName(name.to_string())),
    }
}

/// Creates or overwrites `name` in `lex` itself, never in an ancestor.
pub fn declare(lex: &JsLexEnvironmentType, name: &str, value: JsValue) -> Result<(), JErrorType> {
    let mut env = lex.borrow_mut();
    let record = env.inner.as_env_record_mut();
    record.create_mutable_binding(name.to_string());
    record.set_mutable_binding(name.to_string(), value)
}

/// Hoisting registration. Leaves an existing binding untouched.
pub fn define_at(lex: &JsLexEnvironmentType, name: &str) {
    lex.borrow_mut()
        .inner
        .as_env_record_mut()
        .create_mutable_binding(name.to_string());
}

/// Overwrites the nearest existing binding of `name`.
pub fn assign(lex: &JsLexEnvironmentType, name: &str, value: JsValue) -> Result<(), JErrorType> {
    match get_identifier_reference(lex, name) {
        Some(env) => env
            .borrow_mut()
            .inner
            .as_env_record_mut()
            .set_mutable_binding(name.to_string(), value),
        None => Err(JErrorType::UnboundName(name.to_string())),
    }
}

/// Receiver of the nearest function (or the global) scope.
pub fn get_this_environment_value(lex: &JsLexEnvironmentType) -> JsValue {
    let mut current = Some(lex.clone());
    while let Some(env) = current {
        let this = env.borrow().inner.get_this_binding();
        if let Some(this) = this {
            return this;
        }
        current = env.borrow().outer.clone();
    }
    JsValue::Undefined
}

pub fn new_declarative_environment(outer_lex: Option<JsLexEnvironmentType>) -> JsLexEnvironmentType {
    Rc::new(RefCell::new(LexEnvironment {
        inner: Box::new(EnvironmentRecordType::Declarative(
            DeclarativeEnvironmentRecord::new(),
        )),
        outer: outer_lex,
    }))
}

pub fn new_function_environment(
    f: JsObjectType,
    this_value: JsValue,
    outer_lex: JsLexEnvironmentType,
) -> JsLexEnvironmentType {
    Rc::new(RefCell::new(LexEnvironment {
        inner: Box::new(EnvironmentRecordType::Function(
            FunctionEnvironmentRecord::new(f, this_value),
        )),
        outer: Some(outer_lex),
    }))
}

pub fn new_global_environment(
    global_object: JsObjectType,
    aliases: Vec<String>,
) -> JsLexEnvironmentType {
    Rc::new(RefCell::new(LexEnvironment {
        inner: Box::new(EnvironmentRecordType::Global(GlobalEnvironmentRecord::new(
            global_object,
            aliases,
        ))),
        outer: None,
    }))
}
