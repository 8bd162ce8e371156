//! Member, index and built-in method access on values.
//!
//! The only callable surface is the value model's own: container and string
//! methods. Lookup resolves a [`Method`] for the receiver's variant first,
//! so calling a known method on the wrong variant is `NoSuchMethod`, and
//! only a resolved method reports a wrong argument count.

use crate::errors::{no_such_member, no_such_method, not_an_integer, EvalErrorKind};
use crate::operators::values_equal;
use crate::Value;

/// `target.member`: the map entry, or `Null` when the key is missing.
pub fn member(target: &Value, member: &str) -> Result<Value, EvalErrorKind> {
    match target {
        Value::Map(entries) => Ok(entries.get(member).cloned().unwrap_or_default()),
        other => Err(no_such_member(member, other.type_name())),
    }
}

/// `target[index]`.
///
/// Lists need an integer index within bounds. Maps are looked up by the
/// index's string form; a missing key is `Null`.
pub fn index(target: &Value, index: &Value) -> Result<Value, EvalErrorKind> {
    match target {
        Value::List(items) => {
            let Value::Int(i) = index else {
                return Err(not_an_integer("list index", index.type_name()));
            };
            usize::try_from(*i)
                .ok()
                .and_then(|at| items.get(at))
                .cloned()
                .ok_or(EvalErrorKind::IndexOutOfBounds {
                    index: *i,
                    len: items.len(),
                })
        }
        Value::Map(entries) => Ok(entries
            .get(&index.to_string())
            .cloned()
            .unwrap_or_default()),
        other => Err(EvalErrorKind::NotIndexable {
            type_name: other.type_name(),
        }),
    }
}

/// A built-in method, resolved against its receiver.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Method {
    // Containers
    Size,
    IsEmpty,
    Get,
    // Lists
    Contains,
    // Maps
    ContainsKey,
    KeySet,
    Values,
    // Strings
    Length,
    ToUpperCase,
    ToLowerCase,
    Trim,
    // Any non-null value
    ToString,
}

impl Method {
    /// Resolve `name` for `receiver`, or `None` if the variant has no such
    /// method.
    pub fn lookup(receiver: &Value, name: &str) -> Option<Method> {
        let method = match (receiver, name) {
            (Value::List(_) | Value::Map(_), "size") => Method::Size,
            (Value::List(_) | Value::Map(_) | Value::Str(_), "isEmpty") => Method::IsEmpty,
            (Value::List(_) | Value::Map(_), "get") => Method::Get,
            (Value::List(_), "contains") => Method::Contains,
            (Value::Map(_), "containsKey") => Method::ContainsKey,
            (Value::Map(_), "keySet") => Method::KeySet,
            (Value::Map(_), "values") => Method::Values,
            (Value::Str(_), "length") => Method::Length,
            (Value::Str(_), "toUpperCase") => Method::ToUpperCase,
            (Value::Str(_), "toLowerCase") => Method::ToLowerCase,
            (Value::Str(_), "trim") => Method::Trim,
            (Value::Null, _) => return None,
            (_, "toString") => Method::ToString,
            _ => return None,
        };
        Some(method)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Method::Size => "size",
            Method::IsEmpty => "isEmpty",
            Method::Get => "get",
            Method::Contains => "contains",
            Method::ContainsKey => "containsKey",
            Method::KeySet => "keySet",
            Method::Values => "values",
            Method::Length => "length",
            Method::ToUpperCase => "toUpperCase",
            Method::ToLowerCase => "toLowerCase",
            Method::Trim => "trim",
            Method::ToString => "toString",
        }
    }

    pub const fn arity(self) -> usize {
        match self {
            Method::Get | Method::Contains | Method::ContainsKey => 1,
            _ => 0,
        }
    }
}

/// Call `name` on `receiver` with already evaluated arguments.
pub fn call_method(receiver: &Value, name: &str, args: &[Value]) -> Result<Value, EvalErrorKind> {
    let method =
        Method::lookup(receiver, name).ok_or_else(|| no_such_method(name, receiver.type_name()))?;
    if args.len() != method.arity() {
        return Err(EvalErrorKind::WrongArgCount {
            method: method.name(),
            expected: method.arity(),
            got: args.len(),
        });
    }

    let value = match (method, receiver) {
        (Method::Size, Value::List(items)) => len_value(items.len()),
        (Method::Size, Value::Map(entries)) => len_value(entries.len()),
        (Method::IsEmpty, Value::List(items)) => Value::Bool(items.is_empty()),
        (Method::IsEmpty, Value::Map(entries)) => Value::Bool(entries.is_empty()),
        (Method::IsEmpty, Value::Str(s)) => Value::Bool(s.is_empty()),
        (Method::Get, _) => index(receiver, &args[0])?,
        (Method::Contains, Value::List(items)) => {
            Value::Bool(items.iter().any(|item| values_equal(item, &args[0])))
        }
        (Method::ContainsKey, Value::Map(entries)) => {
            Value::Bool(entries.contains_key(&args[0].to_string()))
        }
        (Method::KeySet, Value::Map(entries)) => Value::list(entries.keys().map(String::as_str)),
        (Method::Values, Value::Map(entries)) => Value::List(entries.values().cloned().collect()),
        (Method::Length, Value::Str(s)) => len_value(s.chars().count()),
        (Method::ToUpperCase, Value::Str(s)) => Value::Str(s.to_uppercase()),
        (Method::ToLowerCase, Value::Str(s)) => Value::Str(s.to_lowercase()),
        (Method::Trim, Value::Str(s)) => Value::Str(s.trim().to_owned()),
        (Method::ToString, other) => Value::Str(other.to_string()),
        _ => return Err(no_such_method(name, receiver.type_name())),
    };
    Ok(value)
}

fn len_value(len: usize) -> Value {
    Value::Int(i64::try_from(len).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests;
