//! Suites and examples.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::EvalContext;

/// A Rust-side example body. It receives a freshly constructed context.
pub type NativeExample = fn(&mut EvalContext) -> Result<(), JErrorType>;

#[derive(Clone)]
pub enum ExampleBody {
    /// A script function registered with `it`; runs in its script's realm.
    Script(JsValue),
    Native(NativeExample),
}

#[derive(Clone)]
pub struct Example {
    pub label: String,
    pub body: ExampleBody,
    pub skipped: bool,
}

#[derive(Clone)]
pub enum SuiteNode {
    Example(Example),
    Suite(Suite),
}

/// A labelled, ordered group of examples and nested suites.
#[derive(Clone)]
pub struct Suite {
    pub label: String,
    pub children: Vec<SuiteNode>,
    pub skipped: bool,
}

impl Suite {
    pub fn new(label: impl Into<String>) -> Self {
        Suite {
            label: label.into(),
            children: Vec::new(),
            skipped: false,
        }
    }

    /// A suite whose examples are all reported as skipped.
    pub fn skipped(label: impl Into<String>) -> Self {
        Suite {
            skipped: true,
            ..Suite::new(label)
        }
    }

    pub fn add_example(&mut self, example: Example) {
        self.children.push(SuiteNode::Example(example));
    }

    pub fn add_suite(&mut self, suite: Suite) {
        self.children.push(SuiteNode::Suite(suite));
    }

    /// Builder form of [`add_example`](Self::add_example) for native bodies.
    pub fn example(mut self, label: impl Into<String>, body: NativeExample) -> Self {
        self.add_example(Example {
            label: label.into(),
            body: ExampleBody::Native(body),
            skipped: false,
        });
        self
    }

    pub fn skipped_example(mut self, label: impl Into<String>, body: NativeExample) -> Self {
        self.add_example(Example {
            label: label.into(),
            body: ExampleBody::Native(body),
            skipped: true,
        });
        self
    }

    pub fn suite(mut self, suite: Suite) -> Self {
        self.add_suite(suite);
        self
    }

    /// Examples in this suite and every nested suite.
    pub fn count_examples(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                SuiteNode::Example(_) => 1,
                SuiteNode::Suite(s) => s.count_examples(),
            })
            .sum()
    }
}
