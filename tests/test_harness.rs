//! Tests for the conformance harness: suite collection from scripts,
//! matchers, skipping, filtering, fail-fast and the report.

extern crate protoscope;

use protoscope::harness::conformance::conformance_suite;
use protoscope::harness::expect::{check_expectation, Matcher};
use protoscope::harness::{ExampleOutcome, SpecReport, SpecRunner, Suite};
use protoscope::runner::ds::error::JErrorType;
use protoscope::runner::ds::value::JsValue;
use protoscope::runner::plugin::config::RunnerConfig;
use protoscope::runner::plugin::types::EvalContext;

fn run(source: &str) -> SpecReport {
    SpecRunner::default().run_script("test", source)
}

fn run_with(config: RunnerConfig, source: &str) -> SpecReport {
    SpecRunner::new(config).run_script("test", source)
}

fn outcomes(report: &SpecReport) -> Vec<(String, &ExampleOutcome)> {
    report
        .results
        .iter()
        .map(|r| (r.full_name(), &r.outcome))
        .collect()
}

// ============================================================================
// Collection
// ============================================================================

#[test]
fn test_nested_suites_are_collected_in_order() {
    let runner = SpecRunner::default();
    let (suite, _ctx) = runner
        .load_script(
            "file.js",
            "describe('outer', function () {
                 it('one', function () {});
                 describe('inner', function () {
                     it('two', function () {});
                 });
                 it('three', function () {});
             });",
        )
        .unwrap();
    assert_eq!(suite.label, "file.js");
    assert_eq!(suite.count_examples(), 3);

    let report = runner.run_script(
        "file.js",
        "describe('outer', function () {
             it('one', function () {});
             describe('inner', function () { it('two', function () {}); });
             it('three', function () {});
         });",
    );
    let names: Vec<String> = report.results.iter().map(|r| r.full_name()).collect();
    assert_eq!(
        names,
        vec![
            "file.js outer one",
            "file.js outer inner two",
            "file.js outer three"
        ]
    );
}

#[test]
fn test_examples_share_the_script_realm() {
    let report = run(
        "var counter = 0;
         describe('shared', function () {
             it('increments', function () { counter = counter + 1; });
             it('sees the increment', function () { expect(counter).toBe(1); });
         });",
    );
    assert_eq!(report.failures(), 0, "{}", report.render());
    assert_eq!(report.passed(), 2);
}

#[test]
fn test_suite_body_error_is_load_error() {
    let report = run("describe('broken', function () { undefinedThing(); });");
    assert_eq!(report.examples(), 0);
    assert_eq!(report.load_errors.len(), 1);
    assert_eq!(
        report.load_errors[0].1,
        JErrorType::UnboundName("undefinedThing".to_string())
    );
    assert!(!report.is_success());
}

#[test]
fn test_it_requires_a_function() {
    let report = run("it('no body');");
    assert_eq!(report.load_errors.len(), 1);
    assert!(matches!(report.load_errors[0].1, JErrorType::TypeError(_)));
}

#[test]
fn test_registering_inside_a_running_example_fails() {
    let report = run(
        "it('adds late', function () { it('late', function () {}); });
         it('nests late', function () { describe('late', function () {}); });",
    );
    let outcomes = outcomes(&report);
    assert_eq!(outcomes.len(), 2);
    assert!(matches!(
        outcomes[0].1,
        ExampleOutcome::Failed(JErrorType::TypeError(_))
    ));
    assert!(matches!(
        outcomes[1].1,
        ExampleOutcome::Failed(JErrorType::TypeError(_))
    ));
}

// ============================================================================
// Matchers
// ============================================================================

#[test]
fn test_passing_matchers() {
    let report = run(
        "it('all pass', function () {
             var o = {};
             expect(1).toBe(1);
             expect(o).toBe(o);
             expect({ a: [1] }).toEqual({ a: [1] });
             expect('x').toBeTruthy();
             expect('').toBeFalsy();
             expect(undefined).toBeUndefined();
             expect(null).toBeDefined();
             expect({}).not.toBe({});
             expect(1).not.toEqual(2);
         });",
    );
    assert!(report.is_success(), "{}", report.render());
}

#[test]
fn test_failing_matcher_reports_values() {
    let report = run("it('fails', function () { expect('a').toBe('b'); });");
    assert_eq!(report.failures(), 1);
    match &report.results[0].outcome {
        ExampleOutcome::Failed(JErrorType::AssertionMismatch {
            matcher,
            expected,
            actual,
            negated,
        }) => {
            assert_eq!(matcher, "toBe");
            assert_eq!(expected, &Some(JsValue::String("b".to_string())));
            assert_eq!(actual, &JsValue::String("a".to_string()));
            assert!(!negated);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_to_be_is_identity_for_objects() {
    let report = run("it('identity', function () { expect({}).toBe({}); });");
    assert_eq!(report.failures(), 1);
}

#[test]
fn test_check_expectation_negation() {
    assert!(check_expectation(Matcher::ToBeTruthy, &JsValue::Boolean(false), &JsValue::Undefined, true).is_ok());
    let err = check_expectation(Matcher::ToBeUndefined, &JsValue::Null, &JsValue::Undefined, false)
        .unwrap_err();
    assert!(err.is_assertion_mismatch());
    assert_eq!(err.to_string(), "Expected null to be undefined.");
}

// ============================================================================
// Running
// ============================================================================

#[test]
fn test_skipped_examples_never_run() {
    let report = run(
        "var ran = false;
         xit('skipped', function () { ran = true; });
         xdescribe('skipped suite', function () {
             it('inside', function () { ran = true; });
         });
         it('checks', function () { expect(ran).toBe(false); });",
    );
    assert_eq!(report.skipped(), 2);
    assert_eq!(report.passed(), 1);
    assert_eq!(report.summary(), "3 examples, 0 failures, 2 skipped");
}

#[test]
fn test_failure_does_not_stop_later_examples() {
    let report = run(
        "it('first fails', function () { expect(1).toBe(2); });
         it('second throws', function () { missing(); });
         it('third passes', function () { expect(true).toBeTruthy(); });",
    );
    let outcomes = outcomes(&report);
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].1.is_failure());
    assert_eq!(
        outcomes[1].1,
        &ExampleOutcome::Failed(JErrorType::UnboundName("missing".to_string()))
    );
    assert_eq!(outcomes[2].1, &ExampleOutcome::Passed);
}

#[test]
fn test_fail_fast_stops_after_first_failure() {
    let config = RunnerConfig {
        fail_fast: true,
        ..RunnerConfig::default()
    };
    let report = run_with(
        config,
        "it('passes', function () {});
         it('fails', function () { expect(1).toBe(2); });
         it('never reported', function () {});",
    );
    assert_eq!(report.examples(), 2);
    assert_eq!(report.failures(), 1);
}

#[test]
fn test_filter_selects_by_full_name() {
    let config = RunnerConfig {
        filter: Some("scope".to_string()),
        ..RunnerConfig::default()
    };
    let report = run_with(
        config,
        "describe('scope', function () { it('a', function () {}); });
         describe('prototype', function () { it('b', function () {}); });",
    );
    assert_eq!(report.examples(), 1);
    assert_eq!(report.results[0].label, "a");
}

#[test]
fn test_render_contains_failure_details() {
    let report = run(
        "describe('Cats', function () {
             it('purr', function () { expect('meow').toBe('purr'); });
         });",
    );
    let rendered = report.render();
    assert!(rendered.contains("Cats\n"));
    assert!(rendered.contains("purr ... FAILED"));
    assert!(rendered.contains("Failures:"));
    assert!(rendered.contains("Expected \"meow\" to be \"purr\"."));
    assert!(rendered.ends_with("1 examples, 1 failures, 0 skipped\n"));
}

// ============================================================================
// Native suites
// ============================================================================

fn passes(_ctx: &mut EvalContext) -> Result<(), JErrorType> {
    Ok(())
}

fn pollutes(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    ctx.set_binding("polluted", JsValue::Boolean(true))
}

fn sees_clean_realm(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    match ctx.get_binding("polluted") {
        Err(JErrorType::UnboundName(_)) => Ok(()),
        _ => Err(JErrorType::TypeError("realm was shared".to_string())),
    }
}

#[test]
fn test_native_examples_get_fresh_contexts() {
    let suite = Suite::new("native")
        .example("pollutes", pollutes)
        .example("sees a clean realm", sees_clean_realm)
        .skipped_example("skipped", passes);
    let report = SpecRunner::default().run(&suite);
    assert_eq!(report.passed(), 2, "{}", report.render());
    assert_eq!(report.skipped(), 1);
}

#[test]
fn test_conformance_catalogue_passes() {
    let suite = conformance_suite();
    let report = SpecRunner::default().run(&suite);
    assert!(report.examples() >= 16);
    assert!(report.is_success(), "{}", report.render());
}
