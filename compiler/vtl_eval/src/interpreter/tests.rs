#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use vtl_ir::{Location, Node, NodeKind};

use super::{Interpreter, MAX_RANGE_LEN};
use crate::errors::{EvalError, EvalErrorKind, EvalResult};
use crate::{EvaluationContext, Value};

fn parse(text: &str) -> Node {
    vtl_parse::parse(text, "test.vm")
        .unwrap_or_else(|err| panic!("parse failed for {text:?}: {err}"))
        .root
}

/// Render `text` and hand back the context it left behind.
fn run<K, V>(text: &str, vars: impl IntoIterator<Item = (K, V)>) -> (EvalResult<String>, EvaluationContext)
where
    K: Into<String>,
    V: Into<Value>,
{
    let root = parse(text);
    let mut interpreter = Interpreter::new(EvaluationContext::with_variables(vars));
    let mut out = String::new();
    let result = interpreter.render(&root, &mut out).map(|()| out);
    (result, interpreter.context)
}

fn render_with<K, V>(text: &str, vars: impl IntoIterator<Item = (K, V)>) -> EvalResult<String>
where
    K: Into<String>,
    V: Into<Value>,
{
    run(text, vars).0
}

fn render(text: &str) -> String {
    render_with(text, no_vars()).unwrap()
}

fn no_vars() -> Vec<(&'static str, Value)> {
    Vec::new()
}

fn render_err(text: &str, vars: Vec<(&'static str, Value)>) -> EvalError {
    match render_with(text, vars) {
        Ok(out) => panic!("expected an evaluation error for {text:?}, got {out:?}"),
        Err(err) => err,
    }
}

// Expressions

#[test]
fn test_precedence() {
    assert_eq!(render("#set($r = 1 + 2 * 3)$r"), "7");
    assert_eq!(render("#set($r = (1 + 2) * 3)$r"), "9");
    assert_eq!(render("#set($r = 10 - 4 - 3)$r"), "3");
    assert_eq!(render("#set($r = 7 % 4 + 8 / 2)$r"), "7");
}

#[test]
fn test_and_short_circuits() {
    let template = "#if ($a && $b.size())yes#{else}no#end";
    let vars = || vec![("a", Value::Bool(false)), ("b", Value::Int(1))];
    assert_eq!(render_with(template, vars()).unwrap(), "no");

    // With `$a` true the right operand is reached and fails.
    let err = render_err(template, vec![("a", Value::Bool(true)), ("b", Value::Int(1))]);
    assert!(matches!(err.kind, EvalErrorKind::NoSuchMethod { .. }));
}

#[test]
fn test_or_short_circuits() {
    let template = "#if ($a || $b.size())yes#{else}no#end";
    let vars = vec![("a", Value::Bool(true)), ("b", Value::Int(1))];
    assert_eq!(render_with(template, vars).unwrap(), "yes");
}

#[test]
fn test_not_and_undefined_condition() {
    assert_eq!(render("#if (!$undefined)yes#end"), "yes");
    assert_eq!(render("#if ($undefined)yes#{else}no#end"), "no");
}

#[test]
fn test_equality_across_variants() {
    let vars = vec![("n", Value::Int(5)), ("s", Value::from("5"))];
    assert_eq!(render_with("#if ($n == $s)eq#end", vars).unwrap(), "eq");

    let vars = vec![("a", Value::Null), ("b", Value::Null)];
    assert_eq!(render_with("#if ($a == $b)eq#end", vars).unwrap(), "eq");

    let vars = vec![("a", Value::Null), ("b", Value::Int(0))];
    assert_eq!(render_with("#if ($a != $b)ne#end", vars).unwrap(), "ne");
}

#[test]
fn test_arithmetic_errors() {
    let err = render_err("#set($x = $s + 1)", vec![("s", Value::from("a"))]);
    assert_eq!(
        err.to_string(),
        "test.vm:1: operator `+` requires integers, found string"
    );

    let err = render_err("\n#set($x = 1 / 0)", no_vars());
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    assert_eq!(err.location.map(|l| l.line()), Some(2));
}

#[test]
fn test_range_length_is_bounded() {
    let err = render_err("#set($r = [0..9223372036854775807])x", no_vars());
    assert_eq!(
        err.kind,
        EvalErrorKind::RangeTooLarge {
            len: 9_223_372_036_854_775_808,
            max: MAX_RANGE_LEN,
        }
    );
    assert_eq!(err.location.map(|l| l.line()), Some(1));

    let vars = vec![("lo", Value::Int(i64::MIN)), ("hi", Value::Int(i64::MAX))];
    let err = render_err("#foreach ($i in [$hi..$lo])$i#end", vars);
    assert_eq!(
        err.to_string(),
        format!(
            "test.vm:1: range of 18446744073709551616 elements exceeds the limit of {MAX_RANGE_LEN}"
        )
    );
}

#[test]
fn test_range_at_the_limit() {
    let last = MAX_RANGE_LEN - 1;
    let out = render(&format!("#set($r = [0..{last}])$r.size()"));
    assert_eq!(out, MAX_RANGE_LEN.to_string());

    let err = render_err(&format!("#set($r = [{last}..-1])"), no_vars());
    assert!(matches!(err.kind, EvalErrorKind::RangeTooLarge { .. }));
}

// Conditionals

#[test]
fn test_if_elseif_else_renders_one_branch() {
    let template = "#if ($x)A#elseif ($y)B#{else}C#end";
    let case = |x: bool, y: bool| {
        render_with(template, [("x", Value::Bool(x)), ("y", Value::Bool(y))]).unwrap()
    };
    assert_eq!(case(true, true), "A");
    assert_eq!(case(true, false), "A");
    assert_eq!(case(false, true), "B");
    assert_eq!(case(false, false), "C");
    assert_eq!(render(template), "C");
}

#[test]
fn test_truthiness_of_empty_values() {
    let vars = vec![("s", Value::from("")), ("l", Value::list(Vec::<Value>::new()))];
    assert_eq!(
        render_with("#if ($s)1#end#if ($l)2#end", vars).unwrap(),
        "12"
    );
}

// Loops

#[test]
fn test_foreach_renders_each_element() {
    assert_eq!(render("#foreach ($i in [1, 2, 3])$i#end"), "123");
    assert_eq!(render("#foreach ($i in [3..1])$i#end"), "321");
}

#[test]
fn test_foreach_leaves_undefined_variable_undefined() {
    let (result, context) = run("#foreach ($i in [1, 2])$i#end", no_vars());
    assert_eq!(result.unwrap(), "12");
    assert_eq!(context.get("i"), None);
    assert_eq!(context.get("foreach"), None);
}

#[test]
fn test_foreach_restores_previous_value() {
    let (result, context) = run("$i#foreach ($i in [1..2])$i#end$i", [("i", "before")]);
    assert_eq!(result.unwrap(), "before12before");
    assert_eq!(context.get("i"), Some(&Value::from("before")));
}

#[test]
fn test_foreach_restores_after_error() {
    let (result, context) = run(
        "#foreach ($i in [1, 0])#set($x = 6 / $i)#end",
        [("i", "outer")],
    );
    assert_eq!(result.unwrap_err().kind, EvalErrorKind::DivisionByZero);
    assert_eq!(context.get("i"), Some(&Value::from("outer")));
    assert_eq!(context.get("foreach"), None);
    // `#set` is not undone.
    assert_eq!(context.get("x"), Some(&Value::Int(6)));
}

#[test]
fn test_foreach_over_map_uses_key_order() {
    let map: Value = [("b", 2), ("a", 1)].into_iter().collect();
    assert_eq!(
        render_with("#foreach ($v in $m)$v#end", [("m", map)]).unwrap(),
        "12"
    );
}

#[test]
fn test_foreach_over_null_renders_nothing() {
    assert_eq!(render("#foreach ($v in $!nothing)x#end"), "");
}

#[test]
fn test_foreach_over_scalar_is_an_error() {
    let err = render_err("#foreach ($v in $n)#end", vec![("n", Value::Int(3))]);
    assert_eq!(
        err.kind,
        EvalErrorKind::NotIterable {
            type_name: "integer"
        }
    );
}

#[test]
fn test_foreach_metadata() {
    let template = "#foreach ($x in $items)$foreach.count:$x#if ($foreach.hasNext),#end#end";
    let vars = [("items", Value::list(["a", "b", "c"]))];
    assert_eq!(render_with(template, vars).unwrap(), "1:a,2:b,3:c");

    let template = "#foreach ($x in [1..3])#if ($foreach.first)[#end$x#if ($foreach.last)]#end#end";
    assert_eq!(render(template), "[123]");
}

#[test]
fn test_nested_foreach_metadata() {
    let template =
        "#foreach ($a in [1..2])#foreach ($b in [1..2])$foreach.index#end$foreach.index;#end";
    assert_eq!(render(template), "010;011;");
}

// References

#[test]
fn test_silent_undefined_renders_nothing() {
    assert_eq!(render("[$!undefinedVar]"), "[]");
    assert_eq!(render("[$!{undefinedVar}]"), "[]");
    assert_eq!(render("[$!undefinedVar.x.y]"), "[]");
}

#[test]
fn test_undefined_reference_is_an_error() {
    let err = render_err("line one\n$undefinedVar", no_vars());
    assert_eq!(
        err.to_string(),
        "test.vm:2: undefined reference $undefinedVar"
    );
}

#[test]
fn test_null_value_in_text() {
    let err = render_err("$v", vec![("v", Value::Null)]);
    assert_eq!(err.to_string(), "test.vm:1: null value for $v");
    assert_eq!(render_with("$!v", [("v", Value::Null)]).unwrap(), "");
}

#[test]
fn test_member_and_index() {
    let m: Value = [("key", "v")].into_iter().collect();
    let vars = [("m", m), ("list", Value::list([10, 20]))];
    assert_eq!(render_with("$m.key/$list[1]", vars.clone()).unwrap(), "v/20");
    assert_eq!(render_with("[$!m.missing]", vars.clone()).unwrap(), "[]");

    let err = render_with("$m.missing", vars).unwrap_err();
    assert_eq!(err.to_string(), "test.vm:1: null value for $m.missing");
}

#[test]
fn test_method_calls() {
    let vars = [("name", Value::from("ada"))];
    assert_eq!(
        render_with("$name.toUpperCase() has $name.length() chars", vars).unwrap(),
        "ADA has 3 chars"
    );

    let vars = [("list", Value::list([Value::Null, Value::Int(1)]))];
    assert_eq!(
        render_with("$list.contains(null) $list.size()", vars).unwrap(),
        "true 2"
    );
}

#[test]
fn test_method_errors_are_located() {
    let err = render_err("\n\n$n.size()", vec![("n", Value::Int(1))]);
    assert_eq!(err.to_string(), "test.vm:3: no method size() on integer");
}

// Text and directives

#[test]
fn test_text_renders_verbatim() {
    assert_eq!(render("plain text, 100% literal\n"), "plain text, 100% literal\n");
}

#[test]
fn test_quoted_block_is_inert() {
    assert_eq!(render("#[[ $x #if ]]#"), " $x #if ");
}

#[test]
fn test_comments_render_nothing() {
    assert_eq!(render("a## line comment\nb#* block *#c"), "abc");
}

#[test]
fn test_set_on_its_own_line_leaves_no_blank_line() {
    assert_eq!(render("#set($a = 1)\n  #set($b = 2)\n$a$b"), "12");
}

#[test]
fn test_set_binds_null() {
    let (result, context) = run("#set($x = $!nothing)#if ($x)y#{else}n#end", no_vars());
    assert_eq!(result.unwrap(), "n");
    assert_eq!(context.get("x"), Some(&Value::Null));
}

#[test]
fn test_macro_call_node_is_unsupported() {
    let location = Location::new(Arc::from("t.vm"), 4);
    let node = Node::new(
        NodeKind::MacroCall {
            name: "greet".into(),
            args: Vec::new(),
        },
        location,
    );
    let mut interpreter = Interpreter::new(EvaluationContext::new());
    let err = interpreter.render(&node, &mut String::new()).unwrap_err();
    assert_eq!(err.to_string(), "t.vm:4: macro call #greet is not supported");
}

#[test]
fn test_rendering_twice_is_identical() {
    let root = parse("#set($x = 2)#foreach ($i in [1..$x])$i#end");
    let first = {
        let mut interpreter = Interpreter::new(EvaluationContext::new());
        let mut out = String::new();
        interpreter.render(&root, &mut out).unwrap();
        out
    };
    let mut interpreter = Interpreter::new(EvaluationContext::new());
    let mut second = String::new();
    interpreter.render(&root, &mut second).unwrap();
    assert_eq!(first, "12");
    assert_eq!(first, second);
}
