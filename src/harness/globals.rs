//! `describe`, `it`, their skipped forms and `expect`, as script globals.
//!
//! Suite bodies run as soon as `describe` is called; each `it` only records
//! its function, which the runner invokes later.

use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::to_string;
use crate::runner::ds::value::JsValue;
use crate::runner::eval::function::call_value;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, BuiltInPlugin, EvalContext, PluginInfo};

use super::expect::create_expectation_object;
use super::suite::{Example, ExampleBody, Suite};

/// Accumulates the suite tree while a script registers it.
pub struct SuiteCollector {
    root: Suite,
    /// Suites whose `describe` body is still running, innermost last.
    open: Vec<Suite>,
    /// Set once the tree has been handed to the runner.
    finished: bool,
}

pub type SharedCollector = Rc<RefCell<SuiteCollector>>;

impl SuiteCollector {
    pub fn new(label: impl Into<String>) -> Self {
        SuiteCollector {
            root: Suite::new(label),
            open: Vec::new(),
            finished: false,
        }
    }

    pub fn shared(label: impl Into<String>) -> SharedCollector {
        Rc::new(RefCell::new(Self::new(label)))
    }

    fn current(&mut self) -> &mut Suite {
        match self.open.last_mut() {
            Some(suite) => suite,
            None => &mut self.root,
        }
    }

    pub fn open_suite(&mut self, suite: Suite) {
        self.open.push(suite);
    }

    /// Attach the innermost open suite to its parent.
    pub fn close_suite(&mut self) {
        if let Some(suite) = self.open.pop() {
            self.current().add_suite(suite);
        }
    }

    pub fn add_example(&mut self, example: Example) {
        self.current().add_example(example);
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Hand over the collected tree, closing suites left open by a failed
    /// body. Later registrations are rejected.
    pub fn finish(&mut self) -> Suite {
        while !self.open.is_empty() {
            self.close_suite();
        }
        self.finished = true;
        let empty = Suite::new(self.root.label.clone());
        std::mem::replace(&mut self.root, empty)
    }
}

/// Installs the harness globals onto the global object of a realm.
pub struct HarnessPlugin {
    collector: SharedCollector,
}

impl HarnessPlugin {
    pub fn new(collector: SharedCollector) -> Self {
        HarnessPlugin { collector }
    }
}

impl BuiltInPlugin for HarnessPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo::new("harness", env!("CARGO_PKG_VERSION")).with_provides(vec![
            "describe".to_string(),
            "xdescribe".to_string(),
            "it".to_string(),
            "xit".to_string(),
            "expect".to_string(),
        ])
    }

    fn register(&self, registry: &mut BuiltInRegistry) {
        let describe = {
            let collector = self.collector.clone();
            Rc::new(
                move |ctx: &mut EvalContext, _this: JsValue, args: Vec<JsValue>| {
                    register_suite(&collector, ctx, &args, "describe", false)
                },
            )
        };
        let xdescribe = {
            let collector = self.collector.clone();
            Rc::new(
                move |ctx: &mut EvalContext, _this: JsValue, args: Vec<JsValue>| {
                    register_suite(&collector, ctx, &args, "xdescribe", true)
                },
            )
        };
        let it = {
            let collector = self.collector.clone();
            Rc::new(
                move |_ctx: &mut EvalContext, _this: JsValue, args: Vec<JsValue>| {
                    register_example(&collector, &args, "it", false)
                },
            )
        };
        let xit = {
            let collector = self.collector.clone();
            Rc::new(
                move |_ctx: &mut EvalContext, _this: JsValue, args: Vec<JsValue>| {
                    register_example(&collector, &args, "xit", true)
                },
            )
        };

        registry.register_object(
            BuiltInObject::for_global_object()
                .add_plugin_method("describe", describe)
                .add_plugin_method("xdescribe", xdescribe)
                .add_plugin_method("it", it)
                .add_plugin_method("xit", xit)
                .add_method("expect", expect_global),
        );
    }
}

fn label_and_body(
    args: &[JsValue],
    global: &str,
    body_required: bool,
) -> Result<(String, JsValue), JErrorType> {
    let label = match args.first() {
        Some(v) => to_string(v),
        None => {
            return Err(JErrorType::TypeError(format!(
                "{} expects a description",
                global
            )))
        }
    };
    let body = args.get(1).cloned().unwrap_or(JsValue::Undefined);
    if !body.is_callable() && (body_required || !body.is_undefined()) {
        return Err(JErrorType::TypeError(format!(
            "{} \"{}\" expects a function",
            global, label
        )));
    }
    Ok((label, body))
}

/// Examples run after the tree is collected, so they cannot extend it.
fn ensure_collecting(collector: &SharedCollector, global: &str) -> Result<(), JErrorType> {
    if collector.borrow().is_finished() {
        Err(JErrorType::TypeError(format!(
            "{} cannot be called while examples are running",
            global
        )))
    } else {
        Ok(())
    }
}

fn register_suite(
    collector: &SharedCollector,
    ctx: &mut EvalContext,
    args: &[JsValue],
    global: &str,
    skipped: bool,
) -> Result<JsValue, JErrorType> {
    ensure_collecting(collector, global)?;
    let (label, body) = label_and_body(args, global, true)?;
    log::debug!("Collecting suite \"{}\"", label);
    let suite = if skipped {
        Suite::skipped(label)
    } else {
        Suite::new(label)
    };
    collector.borrow_mut().open_suite(suite);
    // The collector must not stay borrowed while the body registers children.
    let result = call_value(ctx, &body, None, Vec::new());
    collector.borrow_mut().close_suite();
    result.map(|_| JsValue::Undefined)
}

fn register_example(
    collector: &SharedCollector,
    args: &[JsValue],
    global: &str,
    skipped: bool,
) -> Result<JsValue, JErrorType> {
    ensure_collecting(collector, global)?;
    let (label, body) = label_and_body(args, global, !skipped)?;
    collector.borrow_mut().add_example(Example {
        label,
        body: ExampleBody::Script(body),
        skipped,
    });
    Ok(JsValue::Undefined)
}

fn expect_global(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let actual = args.into_iter().next().unwrap_or(JsValue::Undefined);
    Ok(JsValue::Object(create_expectation_object(ctx, actual)))
}
