#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::{call_method, index, member, Method};
use crate::errors::EvalErrorKind;
use crate::Value;

fn sample_map() -> Value {
    [("name", Value::from("Ada")), ("age", Value::Int(36))]
        .into_iter()
        .collect()
}

#[test]
fn test_member_on_map() {
    assert_eq!(member(&sample_map(), "name"), Ok(Value::from("Ada")));
    assert_eq!(member(&sample_map(), "missing"), Ok(Value::Null));
}

#[test]
fn test_member_on_non_map() {
    assert_eq!(
        member(&Value::Int(1), "x"),
        Err(EvalErrorKind::NoSuchMember {
            member: "x".into(),
            type_name: "integer"
        })
    );
}

#[test]
fn test_list_index() {
    let list = Value::list(["a", "b"]);
    assert_eq!(index(&list, &Value::Int(1)), Ok(Value::from("b")));
    assert_eq!(
        index(&list, &Value::Int(2)),
        Err(EvalErrorKind::IndexOutOfBounds { index: 2, len: 2 })
    );
    assert_eq!(
        index(&list, &Value::Int(-1)),
        Err(EvalErrorKind::IndexOutOfBounds { index: -1, len: 2 })
    );
    assert!(matches!(
        index(&list, &Value::from("0")),
        Err(EvalErrorKind::NotAnInteger { .. })
    ));
}

#[test]
fn test_map_index_uses_string_form() {
    let map: Value = [("1", "one")].into_iter().collect();
    assert_eq!(index(&map, &Value::Int(1)), Ok(Value::from("one")));
    assert_eq!(index(&map, &Value::Int(2)), Ok(Value::Null));
}

#[test]
fn test_index_on_scalar() {
    assert_eq!(
        index(&Value::Bool(true), &Value::Int(0)),
        Err(EvalErrorKind::NotIndexable {
            type_name: "boolean"
        })
    );
}

#[test]
fn test_container_methods() {
    let list = Value::list([1, 2, 3]);
    assert_eq!(call_method(&list, "size", &[]), Ok(Value::Int(3)));
    assert_eq!(call_method(&list, "isEmpty", &[]), Ok(Value::Bool(false)));
    assert_eq!(call_method(&list, "get", &[Value::Int(0)]), Ok(Value::Int(1)));
    assert_eq!(
        call_method(&list, "contains", &[Value::from("2")]),
        Ok(Value::Bool(true))
    );

    let map = sample_map();
    assert_eq!(call_method(&map, "size", &[]), Ok(Value::Int(2)));
    assert_eq!(
        call_method(&map, "containsKey", &[Value::from("age")]),
        Ok(Value::Bool(true))
    );
    assert_eq!(
        call_method(&map, "keySet", &[]),
        Ok(Value::list(["age", "name"]))
    );
    assert_eq!(
        call_method(&map, "values", &[]),
        Ok(Value::list([Value::Int(36), Value::from("Ada")]))
    );
    assert_eq!(call_method(&map, "get", &[Value::from("zzz")]), Ok(Value::Null));
}

#[test]
fn test_string_methods() {
    let s = Value::from("  Héllo ");
    assert_eq!(call_method(&s, "length", &[]), Ok(Value::Int(8)));
    assert_eq!(call_method(&s, "trim", &[]), Ok(Value::from("Héllo")));
    assert_eq!(
        call_method(&s, "toUpperCase", &[]),
        Ok(Value::from("  HÉLLO "))
    );
    assert_eq!(
        call_method(&s, "toLowerCase", &[]),
        Ok(Value::from("  héllo "))
    );
    assert_eq!(call_method(&Value::from(""), "isEmpty", &[]), Ok(Value::Bool(true)));
}

#[test]
fn test_to_string() {
    assert_eq!(
        call_method(&Value::Int(42), "toString", &[]),
        Ok(Value::from("42"))
    );
    assert_eq!(
        call_method(&Value::list([1, 2]), "toString", &[]),
        Ok(Value::from("[1, 2]"))
    );
    assert_eq!(Method::lookup(&Value::Null, "toString"), None);
}

#[test]
fn test_unknown_method() {
    assert_eq!(
        call_method(&Value::Int(1), "size", &[]),
        Err(EvalErrorKind::NoSuchMethod {
            method: "size".into(),
            type_name: "integer"
        })
    );
    let err = call_method(&Value::from("x"), "reverse", &[]).unwrap_err();
    assert_eq!(err.to_string(), "no method reverse() on string");
}

#[test]
fn test_wrong_arg_count() {
    let err = call_method(&Value::list([1]), "get", &[]).unwrap_err();
    assert_eq!(
        err,
        EvalErrorKind::WrongArgCount {
            method: "get",
            expected: 1,
            got: 0
        }
    );
    assert_eq!(err.to_string(), "get() expects 1 argument, got 0");

    let err = call_method(&Value::from("x"), "trim", &[Value::Int(1)]).unwrap_err();
    assert_eq!(err.to_string(), "trim() expects 0 arguments, got 1");
}
