//! Conformance harness.
//!
//! Spec scripts declare suites with `describe`/`it` and check values with
//! `expect`. Native Rust examples plug into the same [`Suite`] tree, which
//! is how the built-in [`conformance`] catalogue is written. A
//! [`SpecRunner`] executes a tree and produces a [`SpecReport`].

pub mod conformance;
pub mod expect;
pub mod globals;
pub mod report;
pub mod runner;
pub mod suite;

pub use self::expect::{expect, Expectation, Matcher};
pub use self::report::{ExampleOutcome, ExampleResult, SpecReport};
pub use self::runner::SpecRunner;
pub use self::suite::{Example, ExampleBody, Suite, SuiteNode};
