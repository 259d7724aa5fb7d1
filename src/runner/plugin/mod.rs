//! Plugin architecture for built-in objects.
//!
//! Built-ins are described declaratively as [`BuiltInObject`]s collected in
//! a [`BuiltInRegistry`]. Installing a registry into an
//! [`EvalContext`](types::EvalContext) materialises each description as real
//! objects and function values in that context's realm:
//!
//! ```text
//! BuiltInObject target        installed as
//! Global("Object")            global binding `Object`
//! GlobalObject                properties of the global object itself
//! Intrinsic(ObjectPrototype)  properties of Object.prototype
//! ```
//!
//! Because descriptions are plain data, one registry can populate any number
//! of fresh realms. Plugins implementing [`BuiltInPlugin`] add their own
//! objects; the spec harness uses this to provide `describe`, `it` and
//! `expect`.
//!
//! ## Example: Custom Plugin
//!
//! ```
//! use protoscope::runner::plugin::registry::BuiltInRegistry;
//! use protoscope::runner::plugin::types::{BuiltInObject, EvalContext};
//! use protoscope::runner::ds::value::{JsNumberType, JsValue};
//! use protoscope::runner::api::run_script;
//!
//! let mut registry = BuiltInRegistry::new();
//! registry.register_object(BuiltInObject::new("Utils").add_method("double", |_ctx, _this, args| {
//!     let n = match args.first() {
//!         Some(JsValue::Number(JsNumberType::Integer(n))) => *n,
//!         _ => 0,
//!     };
//!     Ok(JsValue::Number(JsNumberType::Integer(n * 2)))
//! }));
//!
//! let mut ctx = EvalContext::new();
//! ctx.install_builtins(&registry);
//! let result = run_script("Utils.double(21)", &mut ctx).unwrap();
//! assert_eq!(result, JsValue::Number(JsNumberType::Integer(42)));
//! ```

pub mod config;
pub mod registry;
pub mod types;

pub use config::{ConfigError, RunnerConfig};
pub use registry::BuiltInRegistry;
pub use types::{BuiltInFn, BuiltInObject, BuiltInPlugin, BuiltInTarget, NativeFn, PluginInfo};
