//! Built-in registry for managing built-in objects and plugins.

use super::types::{BuiltInObject, BuiltInPlugin, BuiltInTarget, EvalContext, PluginInfo};
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::{CONSTRUCTOR_PROPERTY, PROTOTYPE_PROPERTY};
use crate::runner::ds::operations::object::set_property;
use crate::runner::ds::value::JsValue;
use crate::runner::std_lib::register_core_builtins;

/// Registry for built-in objects.
/// Holds built-in definitions until they are installed into a realm, so the
/// same registry can populate any number of fresh contexts.
pub struct BuiltInRegistry {
    /// All registered built-in objects, in installation order.
    objects: Vec<BuiltInObject>,

    /// Loaded plugins.
    plugins: Vec<PluginInfo>,
}

impl BuiltInRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        BuiltInRegistry {
            objects: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Create a registry with core built-ins (Object, Function, global values).
    pub fn with_core() -> Self {
        let mut registry = Self::new();

        register_core_builtins(&mut registry);

        registry.plugins.push(PluginInfo::new("core", "0.1.0").with_provides(vec![
            "Object".to_string(),
            "Function".to_string(),
            "undefined".to_string(),
            "NaN".to_string(),
            "Infinity".to_string(),
        ]));

        registry
    }

    /// Register a built-in object (programmatic API).
    pub fn register_object(&mut self, obj: BuiltInObject) {
        self.objects.push(obj);
    }

    pub fn register_plugin(&mut self, plugin: &dyn BuiltInPlugin) {
        plugin.register(self);
        self.plugins.push(plugin.info());
    }

    /// Is an object bound to this global name registered?
    pub fn has_object(&self, name: &str) -> bool {
        self.objects
            .iter()
            .any(|o| o.target == BuiltInTarget::Global(name.to_string()))
    }

    pub fn object_names(&self) -> Vec<String> {
        self.objects.iter().map(|o| o.name()).collect()
    }

    pub fn plugins(&self) -> &[PluginInfo] {
        &self.plugins
    }

    /// Materialise every registered object in `ctx`'s realm.
    pub fn install(&self, ctx: &mut EvalContext) {
        for obj in &self.objects {
            install_object(obj, ctx);
        }
        log::debug!(
            "Installed {} built-in objects into realm {}",
            self.objects.len(),
            ctx.realm.id.to_hyphenated()
        );
    }
}

impl Default for BuiltInRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn install_object(obj: &BuiltInObject, ctx: &mut EvalContext) {
    let target: JsObjectType = match &obj.target {
        BuiltInTarget::Global(name) => {
            let o = match &obj.constructor {
                Some(c) => ctx.realm.new_builtin_function(name, c.clone()),
                None => ctx.realm.new_object(),
            };
            if let Some(intrinsic) = obj.prototype_object {
                let proto = ctx.intrinsic(intrinsic);
                set_property(&o, PROTOTYPE_PROPERTY.to_string(), JsValue::Object(proto.clone()));
                set_property(&proto, CONSTRUCTOR_PROPERTY.to_string(), JsValue::Object(o.clone()));
            }
            set_property(&ctx.global_object(), name.clone(), JsValue::Object(o.clone()));
            o
        }
        BuiltInTarget::GlobalObject => ctx.global_object(),
        BuiltInTarget::Intrinsic(intrinsic) => ctx.intrinsic(*intrinsic),
    };
    for (name, f) in &obj.methods {
        let func = ctx.realm.new_builtin_function(name, f.clone());
        set_property(&target, name.clone(), JsValue::Object(func));
    }
    for (name, value) in &obj.properties {
        set_property(&target, name.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_registry_provides_object() {
        let registry = BuiltInRegistry::with_core();
        assert!(registry.has_object("Object"));
        assert!(registry.has_object("Function"));
        assert!(!registry.has_object("Math"));
        assert_eq!(registry.plugins()[0].name, "core");
    }

    #[test]
    fn test_empty_registry_installs_nothing() {
        let registry = BuiltInRegistry::new();
        assert!(registry.object_names().is_empty());
    }
}
