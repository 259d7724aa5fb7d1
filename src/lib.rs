//! # protoscope - executable specs for JavaScript's object model
//!
//! A small interpreter for a JavaScript subset, built to make three pieces of
//! the language observable and testable:
//! - **Scope chains**: lexical resolution, function-level scope, hoisting
//! - **Function values**: first-class functions whose receiver is bound per call
//! - **Prototype resolution**: own properties, parent links, `new`
//!
//! On top of it sits a conformance harness: scripts declare suites with
//! `describe`/`it`, check values with `expect(...)` matchers and the runner
//! reports each example as passed, failed or skipped.
//!
//! ## Quick Start
//!
//! ### Running a script
//!
//! ```
//! use protoscope::runner::api::run_script;
//! use protoscope::runner::ds::value::JsValue;
//! use protoscope::runner::plugin::types::EvalContext;
//!
//! let mut ctx = EvalContext::new();
//! let result = run_script(
//!     "var person = { name: 'Iqram', hi: function () { return 'Hi ' + this.name; } };
//!      person.hi();",
//!     &mut ctx,
//! )
//! .unwrap();
//! assert_eq!(result, JsValue::String("Hi Iqram".to_string()));
//! ```
//!
//! ### Running a spec script
//!
//! ```
//! use protoscope::harness::SpecRunner;
//!
//! let report = SpecRunner::default().run_script(
//!     "inline",
//!     "describe('functions', function () {
//!          it('have their own scope', function () {
//!              var x = 'outer';
//!              function f() { var x = 'inner'; }
//!              f();
//!              expect(x).toBe('outer');
//!          });
//!          xit('is skipped', function () {});
//!      });",
//! );
//! assert_eq!(report.summary(), "2 examples, 0 failures, 1 skipped");
//! ```
//!
//! ## Architecture
//!
//! - **[`parser`]** - PEG grammar, AST and hoisting collection
//! - **[`runner`]** - The object model and the evaluator
//!   - **[`runner::ds`]** - Values, objects, scopes and realms
//!   - **[`runner::eval`]** - Tree-walking evaluation, invocation and `new`
//!   - **[`runner::plugin`]** - Built-in registry and configuration
//!   - **[`runner::std_lib`]** - `Object`, `Function` and global values
//! - **[`harness`]** - Suites, matchers, the spec runner and its report

#[macro_use]
extern crate lazy_static;

pub mod harness;
pub mod parser;
pub mod runner;
