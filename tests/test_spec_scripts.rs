//! End-to-end runs of the spec scripts shipped in `specs/`.

extern crate protoscope;

use protoscope::harness::{SpecReport, SpecRunner};
use std::path::PathBuf;

fn spec_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("specs").join(name)
}

fn run_spec(name: &str) -> SpecReport {
    SpecRunner::default().run_file(&spec_path(name))
}

#[test]
fn test_functions_spec() {
    let report = run_spec("functions.js");
    assert!(report.is_success(), "{}", report.render());
    assert_eq!(report.examples(), 12);
    assert_eq!(report.skipped(), 1);
}

#[test]
fn test_prototypes_spec() {
    let report = run_spec("prototypes.js");
    assert!(report.is_success(), "{}", report.render());
    assert_eq!(report.examples(), 9);
    assert_eq!(report.skipped(), 2);
}

#[test]
fn test_function_values_spec() {
    let report = run_spec("function_values.js");
    assert!(report.is_success(), "{}", report.render());
    assert_eq!(report.examples(), 13);
    assert_eq!(report.skipped(), 0);
}

#[test]
fn test_prototypal_inheritance_spec() {
    let report = run_spec("prototypal_inheritance.js");
    assert!(report.is_success(), "{}", report.render());
    assert_eq!(report.examples(), 10);
    assert_eq!(report.skipped(), 3);
}

#[test]
fn test_missing_spec_file_is_load_error() {
    let report = run_spec("does-not-exist.js");
    assert_eq!(report.examples(), 0);
    assert_eq!(report.load_errors.len(), 1);
    assert!(!report.is_success());
}

#[test]
fn test_reports_merge() {
    let mut report = run_spec("functions.js");
    report.merge(run_spec("prototypes.js"));
    assert_eq!(report.summary(), "21 examples, 0 failures, 3 skipped");
}

#[test]
fn test_scenario_scripts_merge() {
    let mut report = run_spec("function_values.js");
    report.merge(run_spec("prototypal_inheritance.js"));
    assert_eq!(report.summary(), "23 examples, 0 failures, 3 skipped");
}
