//! Example outcomes and their textual report.

use std::fmt;
use std::fmt::{Display, Formatter};

use crate::runner::ds::error::JErrorType;

#[derive(Debug, Clone, PartialEq)]
pub enum ExampleOutcome {
    Passed,
    Failed(JErrorType),
    Skipped,
}

impl ExampleOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ExampleOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExampleResult {
    /// Labels of the enclosing suites, outermost first.
    pub suite_path: Vec<String>,
    pub label: String,
    pub outcome: ExampleOutcome,
}

impl ExampleResult {
    /// Suite labels and the example label joined by spaces.
    pub fn full_name(&self) -> String {
        full_name(&self.suite_path, &self.label)
    }
}

pub(crate) fn full_name(suite_path: &[String], label: &str) -> String {
    suite_path
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(label))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Results of one or more runs, in execution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecReport {
    pub results: Vec<ExampleResult>,
    /// Scripts that failed before any example could run.
    pub load_errors: Vec<(String, JErrorType)>,
}

impl SpecReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: ExampleResult) {
        self.results.push(result);
    }

    pub fn push_load_error(&mut self, source: impl Into<String>, error: JErrorType) {
        self.load_errors.push((source.into(), error));
    }

    pub fn merge(&mut self, other: SpecReport) {
        self.results.extend(other.results);
        self.load_errors.extend(other.load_errors);
    }

    pub fn examples(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, ExampleOutcome::Passed))
    }

    pub fn failures(&self) -> usize {
        self.count(ExampleOutcome::is_failure)
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ExampleOutcome::Skipped))
    }

    fn count(&self, pred: impl Fn(&ExampleOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn failed_results(&self) -> impl Iterator<Item = &ExampleResult> {
        self.results.iter().filter(|r| r.outcome.is_failure())
    }

    pub fn is_success(&self) -> bool {
        self.failures() == 0 && self.load_errors.is_empty()
    }

    /// `"N examples, F failures, S skipped"`
    pub fn summary(&self) -> String {
        format!(
            "{} examples, {} failures, {} skipped",
            self.examples(),
            self.failures(),
            self.skipped()
        )
    }

    /// Nested listing of every example, then failure details, then the summary.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut open: Vec<String> = Vec::new();
        for result in &self.results {
            let shared = open
                .iter()
                .zip(result.suite_path.iter())
                .take_while(|(a, b)| a == b)
                .count();
            open.truncate(shared);
            for label in &result.suite_path[shared..] {
                out.push_str(&format!("{}{}\n", indent(open.len()), label));
                open.push(label.clone());
            }
            let marker = match &result.outcome {
                ExampleOutcome::Passed => "ok",
                ExampleOutcome::Failed(_) => "FAILED",
                ExampleOutcome::Skipped => "skipped",
            };
            out.push_str(&format!(
                "{}{} ... {}\n",
                indent(open.len()),
                result.label,
                marker
            ));
        }

        if !self.load_errors.is_empty() {
            out.push_str("\nErrors:\n");
            for (source, error) in &self.load_errors {
                out.push_str(&format!("  {}: {}\n", source, error));
            }
        }

        let failed: Vec<_> = self.failed_results().collect();
        if !failed.is_empty() {
            out.push_str("\nFailures:\n");
            for (i, result) in failed.iter().enumerate() {
                out.push_str(&format!("  {}) {}\n", i + 1, result.full_name()));
                if let ExampleOutcome::Failed(error) = &result.outcome {
                    out.push_str(&format!("     {}\n", error));
                }
            }
        }

        out.push('\n');
        out.push_str(&self.summary());
        out.push('\n');
        out
    }
}

fn indent(level: usize) -> String {
    "  ".repeat(level)
}

impl Display for SpecReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
