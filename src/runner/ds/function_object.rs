use std::cell::RefCell;
use std::rc::Rc;

use crate::parser::ast::FunctionData;
use crate::runner::ds::lex_env::JsLexEnvironmentType;
use crate::runner::ds::object::{JsObject, JsObjectType, ObjectBase, ObjectType};
use crate::runner::plugin::types::BuiltInFn;

/// What runs when the function is invoked.
#[derive(Clone)]
pub enum FunctionKind {
    /// Parsed function plus the scope it was created in. The closure scope
    /// is fixed at creation and never replaced.
    Script {
        function_data: Rc<FunctionData>,
        environment: JsLexEnvironmentType,
    },
    BuiltIn(BuiltInFn),
}

pub struct FunctionObject {
    name: String,
    kind: FunctionKind,
    is_constructor: bool,
    object_base: ObjectBase,
}
impl FunctionObject {
    pub fn new_script_function(
        function_data: Rc<FunctionData>,
        environment: JsLexEnvironmentType,
        prototype: Option<JsObjectType>,
    ) -> Self {
        FunctionObject {
            name: function_data.name.clone().unwrap_or_default(),
            kind: FunctionKind::Script {
                function_data,
                environment,
            },
            is_constructor: true,
            object_base: ObjectBase::new(prototype),
        }
    }

    pub fn new_builtin_function(
        name: impl Into<String>,
        function: BuiltInFn,
        prototype: Option<JsObjectType>,
    ) -> Self {
        FunctionObject {
            name: name.into(),
            kind: FunctionKind::BuiltIn(function),
            is_constructor: false,
            object_base: ObjectBase::new(prototype),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "(anonymous)"
        } else {
            &self.name
        }
    }

    pub fn kind(&self) -> &FunctionKind {
        &self.kind
    }

    pub fn is_constructor(&self) -> bool {
        self.is_constructor
    }

    pub fn is_script_function(&self) -> bool {
        matches!(self.kind, FunctionKind::Script { .. })
    }
}
impl JsObject for FunctionObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object_base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }

    fn class_name(&self) -> &'static str {
        "Function"
    }
}

pub fn function_create(function: FunctionObject) -> JsObjectType {
    Rc::new(RefCell::new(ObjectType::Function(function)))
}
