use crate::runner::ds::env_record::EnvironmentRecordType;
use std::cell::RefCell;
use std::rc::Rc;

pub type JsLexEnvironmentType = Rc<RefCell<LexEnvironment>>;

/// A scope: its bindings plus the enclosing scope, fixed at creation.
pub struct LexEnvironment {
    pub inner: Box<EnvironmentRecordType>,
    pub outer: Option<JsLexEnvironmentType>,
}
