//! Built-in conformance catalogue.
//!
//! One native example per observable property of the scope, function and
//! prototype models. Every example receives its own fresh context.

use crate::runner::api::run_script;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{object_create, JsObjectType};
use crate::runner::ds::operations::lex_env::{declare, new_declarative_environment, resolve};
use crate::runner::ds::operations::object::{
    get, get_property, get_prototype, has_own, set_parent, set_property,
};
use crate::runner::ds::value::JsValue;
use crate::runner::eval::function::{construct, invoke, invoke_with};
use crate::runner::plugin::config::RunnerConfig;
use crate::runner::plugin::types::EvalContext;

use super::expect::{expect, expect_error};
use super::runner::SpecRunner;
use super::suite::Suite;

pub fn conformance_suite() -> Suite {
    Suite::new("conformance")
        .suite(
            Suite::new("scope chain")
                .example("resolves the nearest binding", nearest_binding)
                .example("reports names bound nowhere", unbound_name)
                .example("inner declarations shadow outer ones", shadowing)
                .example("closures see their defining scope", lexical_closure)
                .example("loops share the function scope", loop_variable)
                .example("redeclaring a hoisted name keeps its value", hoisted_redeclaration)
                .example("typeof an unbound name is undefined", typeof_unbound),
        )
        .suite(
            Suite::new("function values")
                .example("binds the receiver per call", receiver_per_call)
                .example("defaults the receiver to the global object", default_receiver)
                .example("call and apply force the receiver", forced_receiver)
                .example("limits the call depth", call_depth_limit),
        )
        .suite(
            Suite::new("prototype resolution")
                .example("finds inherited properties that are not own", inherited_not_own)
                .example("sees parent mutation through every level", multi_level_chain)
                .example("constructs instances of the prototype", constructed_instance)
                .example("rejects cyclic parents", cyclic_parent),
        )
        .suite(
            Suite::new("harness")
                .example("never runs skipped examples", skipped_never_run)
                .example("keeps running after a failure", failure_isolation),
        )
}

fn string(s: &str) -> JsValue {
    JsValue::String(s.to_string())
}

fn object_of(value: JsValue) -> Result<JsObjectType, JErrorType> {
    match value {
        JsValue::Object(o) => Ok(o),
        other => Err(JErrorType::TypeError(format!("{} is not an object", other))),
    }
}

// ===== Scope chain =====

fn nearest_binding(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    let outer = new_declarative_environment(Some(ctx.current_env()));
    let inner = new_declarative_environment(Some(outer.clone()));
    declare(&outer, "x", string("outer"))?;
    expect(resolve(&inner, "x")?).to_be(string("outer"))?;
    declare(&inner, "x", string("inner"))?;
    expect(resolve(&inner, "x")?).to_be(string("inner"))?;
    expect(resolve(&outer, "x")?).to_be(string("outer"))
}

fn unbound_name(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    expect_error(run_script("nowhere", ctx), |e| {
        *e == JErrorType::UnboundName("nowhere".to_string())
    })
}

fn shadowing(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    let inner = run_script(
        "var name = 'outer';
         function shadow() { var name = 'inner'; return name; }
         shadow();",
        ctx,
    )?;
    expect(inner).to_be(string("inner"))?;
    expect(ctx.get_binding("name")?).to_be(string("outer"))
}

fn lexical_closure(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    let seen = run_script(
        "var msg = 'before';
         function make() { return function () { return msg; }; }
         var read = make();
         msg = 'after';
         function caller() { var msg = 'caller'; return read(); }
         caller();",
        ctx,
    )?;
    expect(seen).to_be(string("after"))
}

fn loop_variable(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    let i = run_script(
        "function count() {
             var i = 'msg';
             for (var i = 0; i < 6; i++) {}
             return i;
         }
         count();",
        ctx,
    )?;
    expect(i).to_be(JsValue::from_f64(6.0))
}

fn hoisted_redeclaration(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    let x = run_script(
        "function early() { x = 5; var x; return x; }
         early();",
        ctx,
    )?;
    expect(x).to_be(JsValue::from_f64(5.0))
}

fn typeof_unbound(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    expect(run_script("typeof nowhere", ctx)?).to_be(string("undefined"))
}

// ===== Function values =====

fn receiver_per_call(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    run_script(
        "function sayHi() { return 'Hi! My name is ' + this.name + '!'; }
         var iqram = { name: 'Iqram', sayHi: sayHi };
         var kortina = { name: 'Kortina', sayHi: sayHi };",
        ctx,
    )?;
    expect(run_script("iqram.sayHi()", ctx)?).to_be(string("Hi! My name is Iqram!"))?;
    expect(run_script("kortina.sayHi()", ctx)?).to_be(string("Hi! My name is Kortina!"))
}

fn default_receiver(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    let f = object_of(run_script("function whoAmI() { return this; } whoAmI", ctx)?)?;
    let global = JsValue::Object(ctx.global_object());
    expect(invoke(ctx, &f, None, Vec::new())?).to_be(global.clone())?;
    expect(run_script("whoAmI()", ctx)?).to_be(global.clone())?;
    expect(run_script("whoAmI() === window", ctx)?).to_be_truthy()?;

    let o = run_script("var o = { whoAmI: whoAmI }; o", ctx)?;
    expect(run_script("o.whoAmI()", ctx)?).to_be(o.clone())?;
    expect(invoke_with(ctx, &f, o.clone(), Vec::new())?).to_be(o)
}

fn forced_receiver(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    run_script(
        "function greet(greeting) { return greeting + ', ' + this.name; }
         var alan = { name: 'Alan' };",
        ctx,
    )?;
    expect(run_script("greet.call(alan, 'Hello')", ctx)?).to_be(string("Hello, Alan"))?;
    expect(run_script("greet.apply(alan, ['Howdy'])", ctx)?).to_be(string("Howdy, Alan"))
}

fn call_depth_limit(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    ctx.config.max_call_depth = 16;
    expect_error(
        run_script("function forever() { return forever(); } forever();", ctx),
        |e| matches!(e, JErrorType::RangeError(_)),
    )?;
    // The failed call leaves only the global frame behind.
    expect(JsValue::from_f64(ctx.call_depth() as f64)).to_be(JsValue::from_f64(0.0))
}

// ===== Prototype resolution =====

fn inherited_not_own(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    let parent = ctx.realm.new_object();
    set_property(&parent, "name".to_string(), string("parent"));
    let child = object_create(Some(parent));
    expect(JsValue::Boolean(has_own(&child, "name"))).to_be_falsy()?;
    expect(get_property(&child, "name").unwrap_or(JsValue::Undefined)).to_be(string("parent"))?;
    expect(get_property(&child, "missing").unwrap_or(JsValue::Undefined)).to_be_undefined()
}

fn multi_level_chain(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    let greeting = run_script(
        "var grandParent = {};
         var parent = {};
         var child = {};
         parent.__proto__ = grandParent;
         child.__proto__ = parent;
         grandParent.name = 'Alan';
         grandParent.sayHi = function () { return 'Hi! My name is ' + this.name + '!'; };
         child.sayHi();",
        ctx,
    )?;
    expect(greeting).to_be(string("Hi! My name is Alan!"))?;
    expect(run_script("child.hasOwnProperty('sayHi')", ctx)?).to_be_falsy()?;
    run_script("parent.name = 'Bob'", ctx)?;
    expect(run_script("child.sayHi()", ctx)?).to_be(string("Hi! My name is Bob!"))
}

fn constructed_instance(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    let cat = run_script(
        "function Cat(name) { this.name = name; }
         Cat.prototype.enjoysCatFood = true;
         Cat",
        ctx,
    )?;
    let biscuit = object_of(construct(ctx, &cat, vec![string("Biscuit")])?)?;
    let prototype = get(&object_of(cat)?, "prototype");
    let parent = get_prototype(&biscuit).map(JsValue::Object).unwrap_or(JsValue::Null);
    expect(parent).to_be(prototype)?;
    expect(JsValue::Boolean(has_own(&biscuit, "name"))).to_be_truthy()?;
    expect(get(&biscuit, "name")).to_be(string("Biscuit"))?;
    expect(JsValue::Boolean(has_own(&biscuit, "enjoysCatFood"))).to_be_falsy()?;
    expect(get(&biscuit, "enjoysCatFood")).to_be(JsValue::Boolean(true))
}

fn cyclic_parent(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    let a = ctx.realm.new_object();
    let b = object_create(Some(a.clone()));
    expect_error(set_parent(&a, Some(b)).map(|_| JsValue::Undefined), |e| {
        matches!(e, JErrorType::TypeError(_))
    })?;
    expect_error(set_parent(&a, Some(a.clone())).map(|_| JsValue::Undefined), |e| {
        matches!(e, JErrorType::TypeError(_))
    })?;
    expect_error(run_script("var p = {}; var q = {}; q.__proto__ = p; p.__proto__ = q;", ctx), |e| {
        matches!(e, JErrorType::TypeError(_))
    })
}

// ===== Harness =====

fn always_fails(_ctx: &mut EvalContext) -> Result<(), JErrorType> {
    Err(JErrorType::TypeError("this example must not run".to_string()))
}

fn always_passes(_ctx: &mut EvalContext) -> Result<(), JErrorType> {
    Ok(())
}

fn nested_runner(ctx: &EvalContext) -> SpecRunner {
    SpecRunner::new(RunnerConfig {
        filter: None,
        fail_fast: false,
        ..ctx.config.clone()
    })
}

fn skipped_never_run(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    let suite = Suite::new("inner")
        .skipped_example("skipped", always_fails)
        .suite(Suite::skipped("skipped suite").example("nested", always_fails));
    let report = nested_runner(ctx).run(&suite);
    expect(JsValue::from_f64(report.skipped() as f64)).to_be(JsValue::from_f64(2.0))?;
    expect(JsValue::from_f64(report.failures() as f64)).to_be(JsValue::from_f64(0.0))
}

fn failure_isolation(ctx: &mut EvalContext) -> Result<(), JErrorType> {
    let suite = Suite::new("inner")
        .example("fails", always_fails)
        .example("passes", always_passes);
    let report = nested_runner(ctx).run(&suite);
    expect(JsValue::from_f64(report.failures() as f64)).to_be(JsValue::from_f64(1.0))?;
    expect(JsValue::from_f64(report.passed() as f64)).to_be(JsValue::from_f64(1.0))?;
    let last = report.results.last().map(|r| string(&r.label));
    expect(last.unwrap_or(JsValue::Undefined)).to_be(string("passes"))
}
