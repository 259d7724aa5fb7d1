use std::collections::HashMap;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::operations::object::{get_property, has_property, set_property};
use crate::runner::ds::value::JsValue;

pub trait EnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool;
    /// Creates `name` as `undefined` unless this record already binds it.
    fn create_mutable_binding(&mut self, name: String);
    fn set_mutable_binding(&mut self, name: String, value: JsValue) -> Result<(), JErrorType>;
    fn get_binding_value(&self, name: &str) -> Result<JsValue, JErrorType>;
    fn has_this_binding(&self) -> bool;
    fn get_all_bindings(&self) -> Vec<String>;
}

pub enum EnvironmentRecordType {
    Declarative(DeclarativeEnvironmentRecord),
    Function(FunctionEnvironmentRecord),
    Global(GlobalEnvironmentRecord),
}
impl EnvironmentRecordType {
    pub fn as_env_record(&self) -> &dyn EnvironmentRecord {
        match self {
            EnvironmentRecordType::Declarative(d) => d,
            EnvironmentRecordType::Function(d) => d,
            EnvironmentRecordType::Global(d) => d,
        }
    }

    pub fn as_env_record_mut(&mut self) -> &mut dyn EnvironmentRecord {
        match self {
            EnvironmentRecordType::Declarative(d) => d,
            EnvironmentRecordType::Function(d) => d,
            EnvironmentRecordType::Global(d) => d,
        }
    }

    /// Receiver bound by this record, if it is a function or global record.
    pub fn get_this_binding(&self) -> Option<JsValue> {
        match self {
            EnvironmentRecordType::Declarative(_) => None,
            EnvironmentRecordType::Function(f) => Some(f.get_this_binding().clone()),
            EnvironmentRecordType::Global(g) => Some(JsValue::Object(g.get_this_binding().clone())),
        }
    }
}

pub struct DeclarativeEnvironmentRecord {
    bindings: HashMap<String, JsValue>,
}
impl DeclarativeEnvironmentRecord {
    pub fn new() -> Self {
        DeclarativeEnvironmentRecord {
            bindings: HashMap::new(),
        }
    }
}
impl Default for DeclarativeEnvironmentRecord {
    fn default() -> Self {
        Self::new()
    }
}
impl EnvironmentRecord for DeclarativeEnvironmentRecord {
    fn has_binding(&self, id: &str) -> bool {
        self.bindings.contains_key(id)
    }

    fn create_mutable_binding(&mut self, id: String) {
        self.bindings.entry(id).or_insert(JsValue::Undefined);
    }

    fn set_mutable_binding(&mut self, id: String, value: JsValue) -> Result<(), JErrorType> {
        match self.bindings.get_mut(&id) {
            Some(v) => {
                *v = value;
                Ok(())
            }
            None => Err(JErrorType::UnboundName(id)),
        }
    }

    fn get_binding_value(&self, id: &str) -> Result<JsValue, JErrorType> {
        match self.bindings.get(id) {
            None => Err(JErrorType::UnboundName(id.to_string())),
            Some(v) => Ok(v.clone()),
        }
    }

    fn has_this_binding(&self) -> bool {
        false
    }

    fn get_all_bindings(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.keys().cloned().collect();
        names.sort();
        names
    }
}

pub struct FunctionEnvironmentRecord {
    base_env: DeclarativeEnvironmentRecord,
    this_value: JsValue,
    function_object: JsObjectType,
}
impl FunctionEnvironmentRecord {
    pub fn new(f: JsObjectType, this_value: JsValue) -> Self {
        FunctionEnvironmentRecord {
            base_env: DeclarativeEnvironmentRecord::new(),
            this_value,
            function_object: f,
        }
    }

    pub fn get_this_binding(&self) -> &JsValue {
        &self.this_value
    }

    pub fn get_function_object(&self) -> &JsObjectType {
        &self.function_object
    }
}
impl EnvironmentRecord for FunctionEnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool {
        self.base_env.has_binding(name)
    }

    fn create_mutable_binding(&mut self, name: String) {
        self.base_env.create_mutable_binding(name)
    }

    fn set_mutable_binding(&mut self, name: String, value: JsValue) -> Result<(), JErrorType> {
        self.base_env.set_mutable_binding(name, value)
    }

    fn get_binding_value(&self, name: &str) -> Result<JsValue, JErrorType> {
        self.base_env.get_binding_value(name)
    }

    fn has_this_binding(&self) -> bool {
        true
    }

    fn get_all_bindings(&self) -> Vec<String> {
        self.base_env.get_all_bindings()
    }
}

/// Bindings are properties of the global object. Alias names resolve to the
/// global object itself unless a real property of the same name exists.
pub struct GlobalEnvironmentRecord {
    global_object: JsObjectType,
    aliases: Vec<String>,
}
impl GlobalEnvironmentRecord {
    pub fn new(global_object: JsObjectType, aliases: Vec<String>) -> Self {
        GlobalEnvironmentRecord {
            global_object,
            aliases,
        }
    }

    pub fn get_this_binding(&self) -> &JsObjectType {
        &self.global_object
    }

    fn is_alias(&self, name: &str) -> bool {
        self.aliases.iter().any(|a| a == name)
    }
}
impl EnvironmentRecord for GlobalEnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool {
        has_property(&self.global_object, name) || self.is_alias(name)
    }

    fn create_mutable_binding(&mut self, name: String) {
        if !self.global_object.borrow().as_js_object().has_own_property(&name) {
            set_property(&self.global_object, name, JsValue::Undefined);
        }
    }

    fn set_mutable_binding(&mut self, name: String, value: JsValue) -> Result<(), JErrorType> {
        if has_property(&self.global_object, &name) {
            set_property(&self.global_object, name, value);
            Ok(())
        } else if self.is_alias(&name) {
            // Aliases are read-only views of the global object.
            Ok(())
        } else {
            Err(JErrorType::UnboundName(name))
        }
    }

    fn get_binding_value(&self, name: &str) -> Result<JsValue, JErrorType> {
        match get_property(&self.global_object, name) {
            Some(v) => Ok(v),
            None if self.is_alias(name) => Ok(JsValue::Object(self.global_object.clone())),
            None => Err(JErrorType::UnboundName(name.to_string())),
        }
    }

    fn has_this_binding(&self) -> bool {
        true
    }

    fn get_all_bindings(&self) -> Vec<String> {
        let mut names = self.global_object.borrow().as_js_object().own_keys();
        for alias in &self.aliases {
            if !names.contains(alias) {
                names.push(alias.clone());
            }
        }
        names
    }
}
