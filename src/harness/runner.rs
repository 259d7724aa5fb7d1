//! Runs suites and records one result per example.

use std::path::Path;

use crate::runner::api::{read_script, run_script};
use crate::runner::ds::error::JErrorType;
use crate::runner::eval::function::call_value;
use crate::runner::plugin::config::RunnerConfig;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::EvalContext;

use super::globals::{HarnessPlugin, SharedCollector, SuiteCollector};
use super::report::{full_name, ExampleOutcome, ExampleResult, SpecReport};
use super::suite::{Example, ExampleBody, Suite, SuiteNode};

pub struct SpecRunner {
    config: RunnerConfig,
}

impl SpecRunner {
    pub fn new(config: RunnerConfig) -> Self {
        SpecRunner { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// A realm with the core built-ins and the harness globals, plus the
    /// collector its `describe`/`it` calls feed.
    pub fn harness_context(&self, label: &str) -> (EvalContext, SharedCollector) {
        let collector = SuiteCollector::shared(label);
        let mut registry = BuiltInRegistry::new();
        registry.register_plugin(&HarnessPlugin::new(collector.clone()));
        let mut ctx = EvalContext::with_config(self.config.clone());
        ctx.install_builtins(&registry);
        (ctx, collector)
    }

    /// Evaluate a spec script and return the suite tree it registered along
    /// with the realm its examples must run in.
    pub fn load_script(&self, label: &str, source: &str) -> Result<(Suite, EvalContext), JErrorType> {
        let (mut ctx, collector) = self.harness_context(label);
        run_script(source, &mut ctx)?;
        let suite = collector.borrow_mut().finish();
        Ok((suite, ctx))
    }

    /// Load and run a spec script. A script that fails while loading is
    /// recorded as a load error rather than as example results.
    pub fn run_script(&self, label: &str, source: &str) -> SpecReport {
        match self.load_script(label, source) {
            Ok((suite, mut ctx)) => self.run_in(&suite, &mut ctx),
            Err(error) => {
                log::warn!("{} failed to load: {}", label, error);
                let mut report = SpecReport::new();
                report.push_load_error(label, error);
                report
            }
        }
    }

    pub fn run_file(&self, path: &Path) -> SpecReport {
        let label = path.display().to_string();
        match read_script(path) {
            Ok(source) => self.run_script(&label, &source),
            Err(error) => {
                let mut report = SpecReport::new();
                report.push_load_error(label, error);
                report
            }
        }
    }

    /// Run a suite of native examples; each gets a fresh realm.
    pub fn run(&self, suite: &Suite) -> SpecReport {
        let mut ctx = EvalContext::with_config(self.config.clone());
        self.run_in(suite, &mut ctx)
    }

    /// Run a suite, invoking script examples in `ctx`.
    pub fn run_in(&self, suite: &Suite, ctx: &mut EvalContext) -> SpecReport {
        let mut report = SpecReport::new();
        let mut path = Vec::new();
        self.walk(suite, &mut path, false, ctx, &mut report);
        log::info!("{}", report.summary());
        report
    }

    /// Returns `true` once fail-fast has stopped the run.
    fn walk(
        &self,
        suite: &Suite,
        path: &mut Vec<String>,
        inherited_skip: bool,
        ctx: &mut EvalContext,
        report: &mut SpecReport,
    ) -> bool {
        let skipped = inherited_skip || suite.skipped;
        let labelled = !suite.label.is_empty();
        if labelled {
            path.push(suite.label.clone());
        }
        let mut stopped = false;
        for child in &suite.children {
            stopped = match child {
                SuiteNode::Suite(nested) => self.walk(nested, path, skipped, ctx, report),
                SuiteNode::Example(example) => self.run_example(example, path, skipped, ctx, report),
            };
            if stopped {
                break;
            }
        }
        if labelled {
            path.pop();
        }
        stopped
    }

    fn run_example(
        &self,
        example: &Example,
        path: &[String],
        inherited_skip: bool,
        ctx: &mut EvalContext,
        report: &mut SpecReport,
    ) -> bool {
        let name = full_name(path, &example.label);
        if let Some(filter) = &self.config.filter {
            if !name.contains(filter.as_str()) {
                return false;
            }
        }

        let outcome = if inherited_skip || example.skipped {
            log::debug!("Skipping \"{}\"", name);
            ExampleOutcome::Skipped
        } else {
            log::debug!("Running \"{}\"", name);
            match self.execute(&example.body, ctx) {
                Ok(()) => ExampleOutcome::Passed,
                Err(error) => {
                    log::warn!("\"{}\" failed: {}", name, error);
                    ExampleOutcome::Failed(error)
                }
            }
        };
        let failed = outcome.is_failure();
        report.push(ExampleResult {
            suite_path: path.to_vec(),
            label: example.label.clone(),
            outcome,
        });
        failed && self.config.fail_fast
    }

    fn execute(&self, body: &ExampleBody, ctx: &mut EvalContext) -> Result<(), JErrorType> {
        match body {
            ExampleBody::Script(f) => call_value(ctx, f, None, Vec::new()).map(|_| ()),
            ExampleBody::Native(f) => {
                let mut fresh = EvalContext::with_config(self.config.clone());
                f(&mut fresh)
            }
        }
    }
}

impl Default for SpecRunner {
    fn default() -> Self {
        Self::new(RunnerConfig::default())
    }
}
