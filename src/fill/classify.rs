//! Environment variable name classification
//!
//! Decides from a variable's name whether it carries a scalar, one element of
//! an array, or one entry of a map:
//!
//! | Name (prefix `APP_`, map field `addr`) | Result |
//! |-----------------------------------------|--------|
//! | `APP_CONFIG`                            | `Scalar { name: "config" }` |
//! | `APP_USERS_2`                           | `Array { name: "users", index: 2 }` |
//! | `APP_ADDR_DEFAULT`                      | `Map { name: "addr", key: "default" }` |
//! | `OTHER_KEY`                             | `Unmatched` |

use regex::Regex;
use std::sync::LazyLock;

static ARRAY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_[0-9]*$").expect("array suffix pattern is valid"));

/// Classification of one environment variable name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VarName {
    /// The name does not carry the configured prefix
    Unmatched,

    /// A plain value stored under `name`
    Scalar { name: String },

    /// Element `index` of the sequence stored under `name`
    Array { name: String, index: usize },

    /// Entry `key` of the mapping stored under `name`
    Map { name: String, key: String },
}

impl VarName {
    /// Field name this variable contributes to, if it matched
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            VarName::Unmatched => None,
            VarName::Scalar { name } | VarName::Array { name, .. } | VarName::Map { name, .. } => {
                Some(name.as_str())
            }
        }
    }
}

/// Classifies variable names for a fixed prefix and set of map fields
///
/// Build once, then call [`Classifier::classify`] for every variable. A built
/// classifier is immutable and can be shared between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    prefix: String,
    map_fields: Vec<String>,
}

impl Classifier {
    /// Classifier for `prefix` with no map fields
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::builder(prefix).build()
    }

    /// Create a builder for a classifier matching `prefix`
    ///
    /// # Example
    /// ```rust
    /// use envfill::{Classifier, VarName};
    ///
    /// let classifier = Classifier::builder("APP_").map_field("addr").build();
    /// assert_eq!(
    ///     classifier.classify("APP_ADDR_DEFAULT"),
    ///     VarName::Map { name: "addr".into(), key: "default".into() }
    /// );
    /// ```
    pub fn builder(prefix: impl Into<String>) -> ClassifierBuilder {
        ClassifierBuilder {
            prefix: prefix.into(),
            map_fields: Vec::new(),
        }
    }

    /// The required name prefix
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Recognized map fields, lower-cased, sorted and deduplicated
    #[must_use]
    pub fn map_fields(&self) -> &[String] {
        &self.map_fields
    }

    /// Classify one variable name
    #[must_use]
    pub fn classify(&self, raw: &str) -> VarName {
        let Some(rest) = raw.strip_prefix(self.prefix.as_str()) else {
            return VarName::Unmatched;
        };
        let body = rest.to_lowercase();

        for field in &self.map_fields {
            if let Some(key) = body
                .strip_prefix(field.as_str())
                .and_then(|s| s.strip_prefix('_'))
            {
                return VarName::Map {
                    name: field.clone(),
                    key: key.to_string(),
                };
            }
        }

        if ARRAY_SUFFIX.is_match(&body) {
            if let Some((name, digits)) = body.rsplit_once('_') {
                return VarName::Array {
                    name: name.to_string(),
                    // Empty, oversized or otherwise unparsable suffixes mean index 0
                    index: digits
                        .parse()
                        .ok()
                        .filter(|&index: &usize| index < usize::MAX)
                        .unwrap_or(0),
                };
            }
        }

        VarName::Scalar { name: body }
    }
}

/// Builder for [`Classifier`]
#[derive(Debug, Clone)]
pub struct ClassifierBuilder {
    prefix: String,
    map_fields: Vec<String>,
}

impl ClassifierBuilder {
    /// Declare `field` as map-shaped (matched case-insensitively)
    pub fn map_field(mut self, field: impl Into<String>) -> Self {
        self.map_fields.push(field.into());
        self
    }

    /// Declare several map-shaped fields
    pub fn map_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.map_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Normalize the map fields and build the classifier
    pub fn build(self) -> Classifier {
        let mut map_fields: Vec<String> = self
            .map_fields
            .into_iter()
            .map(|f| f.to_lowercase())
            .collect();
        map_fields.sort();
        map_fields.dedup();

        Classifier {
            prefix: self.prefix,
            map_fields,
        }
    }
}

/// Build a reusable classification closure for `prefix` and `map_fields`
///
/// Equivalent to building a [`Classifier`] and calling
/// [`Classifier::classify`]; useful where a plain function is expected, such
/// as [`fill_map`](crate::fill_map).
pub fn filter_prefix<I, S>(
    prefix: &str,
    map_fields: I,
) -> impl Fn(&str) -> VarName + Send + Sync + use<I, S>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let classifier = Classifier::builder(prefix).map_fields(map_fields).build();
    move |name: &str| classifier.classify(name)
}
