//! Structured filling from environment variables
//!
//! Flattens prefixed variables into a mapping of scalars, arrays and maps.
//! A field's shape comes from the names of the variables that feed it; see
//! [`Classifier`] for the naming convention.

mod classify;

pub use classify::{Classifier, ClassifierBuilder, VarName, filter_prefix};

use crate::env::Env;
use serde::Serialize;
use std::collections::HashMap;

/// Output of a fill pass, keyed by field name
pub type Values = HashMap<String, Value>;

/// Value accumulated for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A plain string
    String(String),

    /// An ordered sequence; gaps are empty strings
    Array(Vec<String>),

    /// A keyed mapping
    Map(HashMap<String, String>),
}

impl Value {
    /// The string, if this is a scalar
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The elements, if this is an array
    #[must_use]
    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The entries, if this is a map
    #[must_use]
    pub fn as_map(&self) -> Option<&HashMap<String, String>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::Array(items.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Value {
    fn from(entries: [(&str, &str); N]) -> Self {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::Array(items)
    }
}

impl From<HashMap<String, String>> for Value {
    fn from(entries: HashMap<String, String>) -> Self {
        Value::Map(entries)
    }
}

/// Container a variable can accumulate into
pub(crate) trait Slot: Default + Into<Value> {
    /// Take the container out of `value`, or give `value` back if it has another shape
    fn take(value: Value) -> Result<Self, Value>;
}

impl Slot for Vec<String> {
    fn take(value: Value) -> Result<Self, Value> {
        match value {
            Value::Array(items) => Ok(items),
            other => Err(other),
        }
    }
}

impl Slot for HashMap<String, String> {
    fn take(value: Value) -> Result<Self, Value> {
        match value {
            Value::Map(entries) => Ok(entries),
            other => Err(other),
        }
    }
}

/// Remove `field` from `values` as a container of shape `T`.
///
/// An existing value of the same shape is returned as-is. A missing value, or
/// one of a different shape, gives an empty container; the old value is
/// dropped. Callers insert the container back once they have updated it.
pub(crate) fn coerce_or_reset<T: Slot>(values: &mut Values, field: &str) -> T {
    match values.remove(field).map(T::take) {
        Some(Ok(kept)) => kept,
        Some(Err(old)) => {
            log::debug!(
                "Field '{field}' changed shape from {}, discarding previous value",
                old.kind()
            );
            T::default()
        }
        None => T::default(),
    }
}

/// Collect every variable of `env` that `classify` accepts into a [`Values`] map
///
/// Variables are processed in `env.environ()` order. When two variables give
/// the same field different shapes, the later one wins and the earlier value
/// is discarded. Array indices are not bounded: `APP_LIST_1000000` allocates a
/// million-element array.
///
/// # Example
/// ```rust
/// use envfill::{fill_map, filter_prefix, MapEnv, Value};
///
/// let env = MapEnv::from_map([("APP_USERS_0", "ann"), ("APP_USERS_2", "bob")]);
/// let values = fill_map(&env, filter_prefix("APP_", Vec::<String>::new()));
/// assert_eq!(values["users"], Value::from(vec!["ann", "", "bob"]));
/// ```
pub fn fill_map<F>(env: &dyn Env, classify: F) -> Values
where
    F: Fn(&str) -> VarName,
{
    let mut values = Values::new();
    let mut matched = 0usize;

    for entry in env.environ() {
        let (name, value) = entry.split_once('=').unwrap_or((entry.as_str(), ""));
        let var = classify(name);
        log::trace!("Classified '{name}' as {var:?}");

        match var {
            VarName::Unmatched => continue,
            VarName::Scalar { name } => {
                values.insert(name, Value::String(value.to_string()));
            }
            VarName::Array { name, index } => {
                let mut items: Vec<String> = coerce_or_reset(&mut values, &name);
                // An index with no room for `index + 1` elements counts as out of range
                let index = if index == usize::MAX { 0 } else { index };
                if items.len() <= index {
                    items.resize(index + 1, String::new());
                }
                items[index] = value.to_string();
                values.insert(name, items.into());
            }
            VarName::Map { name, key } => {
                let mut entries: HashMap<String, String> = coerce_or_reset(&mut values, &name);
                entries.insert(key, value.to_string());
                values.insert(name, entries.into());
            }
        }
        matched += 1;
    }

    log::debug!(
        "Filled {} fields from {matched} environment variables",
        values.len()
    );
    values
}

/// Serialize filled values into a JSON object
///
/// Scalars become strings, arrays become string arrays and maps become
/// objects, ready for `serde_json::from_value` into a typed struct.
///
/// # Errors
///
/// Only if serialization itself fails, which string-only values never do.
pub fn to_json(values: &Values) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(values)
}

impl Classifier {
    /// Fill a [`Values`] map from `env` using this classifier
    pub fn fill(&self, env: &dyn Env) -> Values {
        fill_map(env, |name| self.classify(name))
    }
}

// =============================================================================
// Tests
// =============================================================================
