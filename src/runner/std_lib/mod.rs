//! Standard library built-in objects.
//!
//! Only the reflection surface the scope, receiver and prototype models need:
//! `Object`, `Function.prototype.call`/`apply` and the global value properties.

pub mod core;
pub mod function;
pub mod global;
pub mod object;

pub use self::core::register_core_builtins;
