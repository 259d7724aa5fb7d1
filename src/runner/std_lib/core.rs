//! Core built-ins registration.

use crate::runner::plugin::registry::BuiltInRegistry;

use super::function;
use super::global;
use super::object;

/// Register all core built-in objects with the registry.
pub fn register_core_builtins(registry: &mut BuiltInRegistry) {
    // Prototype methods first so constructors link to populated prototypes.
    object::register(registry);
    function::register(registry);
    global::register(registry);
}
