//! Variable bindings from outside a template: JSON objects and `name=value`
//! pairs.

use std::collections::BTreeMap;

use crate::Value;

#[derive(Debug, thiserror::Error)]
pub enum VariableError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("variables must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("{path}: numbers must be integers, found {number}")]
    NotAnInteger { path: String, number: String },
    #[error("expected name=value, found `{arg}`")]
    MissingEquals { arg: String },
    #[error("invalid variable name `{name}`")]
    InvalidName { name: String },
}

/// Bindings from the text of a JSON object.
pub fn from_json(text: &str) -> Result<BTreeMap<String, Value>, VariableError> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    let serde_json::Value::Object(object) = json else {
        return Err(VariableError::NotAnObject {
            found: json_type_name(&json),
        });
    };
    object
        .into_iter()
        .map(|(name, value)| {
            let value = json_to_value(value, &name)?;
            Ok((name, value))
        })
        .collect()
}

/// Map a JSON value onto [`Value`]. `path` names it in errors.
pub fn json_to_value(json: serde_json::Value, path: &str) -> Result<Value, VariableError> {
    use serde_json::Value as Json;

    match json {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::Bool(b)),
        Json::Number(number) => number
            .as_i64()
            .map(Value::Int)
            .ok_or_else(|| VariableError::NotAnInteger {
                path: path.to_owned(),
                number: number.to_string(),
            }),
        Json::String(s) => Ok(Value::Str(s)),
        Json::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| json_to_value(item, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        Json::Object(entries) => entries
            .into_iter()
            .map(|(key, value)| {
                let value = json_to_value(value, &format!("{path}.{key}"))?;
                Ok((key, value))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(Value::Map),
    }
}

fn json_type_name(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Parse a `name=value` command-line binding.
///
/// Integers and `true`/`false` are typed; anything else is a string.
pub fn parse_assignment(arg: &str) -> Result<(String, Value), VariableError> {
    let Some((name, raw)) = arg.split_once('=') else {
        return Err(VariableError::MissingEquals {
            arg: arg.to_owned(),
        });
    };
    if !is_valid_name(name) {
        return Err(VariableError::InvalidName {
            name: name.to_owned(),
        });
    }

    let value = match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => raw
            .parse::<i64>()
            .map_or_else(|_| Value::from(raw), Value::Int),
    };
    Ok((name.to_owned(), value))
}

/// Same rule as template identifiers.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
