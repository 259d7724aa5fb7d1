//! Core types for the plugin architecture.

use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::execution_context::{ExecutionContext, ExecutionContextStack};
use crate::runner::ds::lex_env::JsLexEnvironmentType;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::operations::lex_env::{declare, resolve};
use crate::runner::ds::realm::{CodeRealm, WellKnownIntrinsics};
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::config::RunnerConfig;
use crate::runner::plugin::registry::BuiltInRegistry;

/// Everything an evaluation needs: its realm, the call frames and the
/// configuration the realm was built with.
pub struct EvalContext {
    pub realm: CodeRealm,
    pub ctx_stack: ExecutionContextStack,
    pub config: RunnerConfig,
}

impl EvalContext {
    /// Fresh realm with the core built-ins installed.
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        let realm = CodeRealm::new(config.global_aliases.clone());
        let mut ctx_stack = ExecutionContextStack::new();
        ctx_stack.push_execution_ctx(ExecutionContext {
            function: None,
            lex_env: realm.global_env.clone(),
            this_value: JsValue::Object(realm.global_object.clone()),
            arguments: Vec::new(),
        });
        let mut ctx = EvalContext {
            realm,
            ctx_stack,
            config,
        };
        ctx.install_builtins(&BuiltInRegistry::with_core());
        ctx
    }

    /// Install every object held by `registry` into this realm.
    pub fn install_builtins(&mut self, registry: &BuiltInRegistry) {
        registry.install(self);
    }

    /// Scope of the running frame.
    pub fn current_env(&self) -> JsLexEnvironmentType {
        match self.ctx_stack.get_running_execution_ctx() {
            Some(frame) => frame.lex_env.clone(),
            None => self.realm.global_env.clone(),
        }
    }

    pub fn get_binding(&self, name: &str) -> Result<JsValue, JErrorType> {
        resolve(&self.current_env(), name)
    }

    /// Bind `name` in the running frame's scope.
    pub fn set_binding(&mut self, name: &str, value: JsValue) -> Result<(), JErrorType> {
        declare(&self.current_env(), name, value)
    }

    pub fn global_object(&self) -> JsObjectType {
        self.realm.global_object.clone()
    }

    pub fn intrinsic(&self, intrinsic: WellKnownIntrinsics) -> JsObjectType {
        self.realm.get_intrinsic(intrinsic)
    }

    /// Number of function frames above the global frame.
    pub fn call_depth(&self) -> usize {
        self.ctx_stack.len().saturating_sub(1)
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Function signature for built-in methods.
/// Native functions receive the evaluation context, `this` value, and arguments.
pub type NativeFn =
    fn(ctx: &mut EvalContext, this: JsValue, args: Vec<JsValue>) -> Result<JsValue, JErrorType>;

/// Closure form used by plugins that need to capture state.
pub type PluginFn = Rc<dyn Fn(&mut EvalContext, JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType>>;

/// Built-in function - either compiled-in or plugin-provided.
#[derive(Clone)]
pub enum BuiltInFn {
    /// Direct function pointer.
    Native(NativeFn),

    /// Plugin-provided closure.
    Plugin(PluginFn),
}

impl BuiltInFn {
    /// Execute this built-in function.
    pub fn call(
        &self,
        ctx: &mut EvalContext,
        this: JsValue,
        args: Vec<JsValue>,
    ) -> Result<JsValue, JErrorType> {
        match self {
            BuiltInFn::Native(f) => f(ctx, this, args),
            BuiltInFn::Plugin(f) => f(ctx, this, args),
        }
    }
}

/// Where a built-in object's members are installed.
#[derive(Debug, Clone, PartialEq)]
pub enum BuiltInTarget {
    /// A new global binding with this name.
    Global(String),
    /// Directly onto the global object.
    GlobalObject,
    /// Onto one of the realm's intrinsic prototypes.
    Intrinsic(WellKnownIntrinsics),
}

/// Built-in object definition.
pub struct BuiltInObject {
    pub target: BuiltInTarget,

    /// Methods in installation order.
    pub methods: Vec<(String, BuiltInFn)>,

    /// Static properties.
    pub properties: Vec<(String, JsValue)>,

    /// Makes a `Global` target a function object instead of a plain one.
    pub constructor: Option<BuiltInFn>,

    /// Exposed as `prototype` on a `Global` target, with a `constructor`
    /// back-reference.
    pub prototype_object: Option<WellKnownIntrinsics>,
}

impl BuiltInObject {
    /// A built-in bound to a global name.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_target(BuiltInTarget::Global(name.into()))
    }

    pub fn for_global_object() -> Self {
        Self::with_target(BuiltInTarget::GlobalObject)
    }

    pub fn for_intrinsic(intrinsic: WellKnownIntrinsics) -> Self {
        Self::with_target(BuiltInTarget::Intrinsic(intrinsic))
    }

    fn with_target(target: BuiltInTarget) -> Self {
        BuiltInObject {
            target,
            methods: Vec::new(),
            properties: Vec::new(),
            constructor: None,
            prototype_object: None,
        }
    }

    /// Add a native method.
    pub fn add_method(mut self, name: impl Into<String>, func: NativeFn) -> Self {
        self.methods.push((name.into(), BuiltInFn::Native(func)));
        self
    }

    /// Add a closure-backed method.
    pub fn add_plugin_method(mut self, name: impl Into<String>, func: PluginFn) -> Self {
        self.methods.push((name.into(), BuiltInFn::Plugin(func)));
        self
    }

    /// Add a property.
    pub fn add_property(mut self, name: impl Into<String>, value: JsValue) -> Self {
        self.properties.push((name.into(), value));
        self
    }

    /// Set the constructor function.
    pub fn with_constructor(mut self, constructor: NativeFn) -> Self {
        self.constructor = Some(BuiltInFn::Native(constructor));
        self
    }

    pub fn with_prototype_object(mut self, intrinsic: WellKnownIntrinsics) -> Self {
        self.prototype_object = Some(intrinsic);
        self
    }

    pub fn name(&self) -> String {
        match &self.target {
            BuiltInTarget::Global(name) => name.clone(),
            BuiltInTarget::GlobalObject => "(global)".to_string(),
            BuiltInTarget::Intrinsic(i) => format!("{:?}", i),
        }
    }
}

/// Plugin metadata.
#[derive(Debug, Clone)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    /// Names this plugin provides.
    pub provides: Vec<String>,
}

impl PluginInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        PluginInfo {
            name: name.into(),
            version: version.into(),
            provides: Vec::new(),
        }
    }

    pub fn with_provides(mut self, provides: Vec<String>) -> Self {
        self.provides = provides;
        self
    }
}

/// A bundle of built-ins that can be added to a registry.
pub trait BuiltInPlugin {
    fn info(&self) -> PluginInfo;

    fn register(&self, registry: &mut BuiltInRegistry);
}
