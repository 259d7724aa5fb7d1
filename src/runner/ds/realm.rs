use uuid::Uuid;

use crate::runner::ds::function_object::{function_create, FunctionObject};
use crate::runner::ds::lex_env::JsLexEnvironmentType;
use crate::runner::ds::object::{array_create, object_create, JsObjectType};
use crate::runner::ds::operations::lex_env::new_global_environment;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::BuiltInFn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownIntrinsics {
    ObjectPrototype,
    FunctionPrototype,
    ArrayPrototype,
}

/// One global object, its global scope and the intrinsic prototypes every
/// object created in this realm descends from.
pub struct CodeRealm {
    pub id: Uuid,
    pub global_object: JsObjectType,
    pub global_env: JsLexEnvironmentType,
    object_prototype: JsObjectType,
    function_prototype: JsObjectType,
    array_prototype: JsObjectType,
}
impl CodeRealm {
    pub fn new(global_aliases: Vec<String>) -> Self {
        let object_prototype = object_create(None);
        let function_prototype = object_create(Some(object_prototype.clone()));
        let array_prototype = object_create(Some(object_prototype.clone()));
        let global_object = object_create(Some(object_prototype.clone()));
        let global_env = new_global_environment(global_object.clone(), global_aliases);
        let id = Uuid::new_v4();
        log::debug!("Created realm {}", id.to_hyphenated());
        CodeRealm {
            id,
            global_object,
            global_env,
            object_prototype,
            function_prototype,
            array_prototype,
        }
    }

    pub fn get_intrinsic(&self, intrinsic: WellKnownIntrinsics) -> JsObjectType {
        match intrinsic {
            WellKnownIntrinsics::ObjectPrototype => self.object_prototype.clone(),
            WellKnownIntrinsics::FunctionPrototype => self.function_prototype.clone(),
            WellKnownIntrinsics::ArrayPrototype => self.array_prototype.clone(),
        }
    }

    pub fn new_object(&self) -> JsObjectType {
        object_create(Some(self.object_prototype.clone()))
    }

    pub fn new_array(&self, elements: Vec<JsValue>) -> JsObjectType {
        array_create(Some(self.array_prototype.clone()), elements)
    }

    pub fn new_builtin_function(&self, name: &str, function: BuiltInFn) -> JsObjectType {
        function_create(FunctionObject::new_builtin_function(
            name,
            function,
            Some(self.function_prototype.clone()),
        ))
    }
}
