//! Adapts helper table entries into Tera filters.

use std::collections::HashMap;

use regen_core::domain::{Attribute, Helper};
use tera::{Result, Value};

/// Signature Tera expects from a filter.
pub(crate) type Filter = Box<dyn Fn(&Value, &HashMap<String, Value>) -> Result<Value> + Send + Sync>;

/// Wrap `helper` so templates can call it as `{{ value | name }}`.
pub(crate) fn from_helper(name: &'static str, helper: Helper) -> Filter {
    match helper {
        Helper::Text(f) => Box::new(move |value: &Value, _args: &HashMap<String, Value>| {
            let s = value
                .as_str()
                .ok_or_else(|| tera::Error::msg(format!("{name} filter expects a string")))?;
            Ok(Value::String(f(s)))
        }),
        Helper::Path(f) => Box::new(move |value: &Value, _args: &HashMap<String, Value>| {
            let segments: Vec<String> = serde_json::from_value(value.clone()).map_err(|e| {
                tera::Error::msg(format!("{name} filter expects a list of strings: {e}"))
            })?;
            Ok(Value::String(f(&segments)))
        }),
        Helper::Predicate(f) => Box::new(move |value: &Value, _args: &HashMap<String, Value>| {
            let attributes: Vec<Attribute> = serde_json::from_value(value.clone()).map_err(|e| {
                tera::Error::msg(format!("{name} filter expects a list of attributes: {e}"))
            })?;
            Ok(Value::Bool(f(&attributes)))
        }),
    }
}
