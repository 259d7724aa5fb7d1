//! Tree-walking evaluation of parsed scripts.

pub mod expression;
pub mod function;
pub mod statement;
pub mod types;

/// Remaining native stack below which recursion continues on a freshly
/// allocated segment, so script depth is bounded by `max_call_depth` alone.
pub(crate) const STACK_RED_ZONE: usize = 128 * 1024;
pub(crate) const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

pub use function::{call_value, construct, invoke, invoke_with};
pub use types::{Completion, CompletionType, Reference, ReferenceBase};
