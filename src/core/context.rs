//! Request-scoped context passed to context-aware log calls
//!
//! A `Context` is an immutable bag of key-value fields. Deriving a new
//! context with [`Context::with_value`] leaves the original untouched, so a
//! context can be cloned freely across tasks and threads. The cloud transport
//! reads a single well-known key, [`CLOUD_TRACE_CONTEXT`], for trace
//! correlation; all other keys are ignored by this crate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Key under which the trace resource name is stored.
pub const CLOUD_TRACE_CONTEXT: &str = "X-Cloud-Trace-Context";

/// Value type for context fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Borrow the value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Request-scoped, immutable key-value context
///
/// # Example
///
/// ```
/// use ctx_logger::core::{Context, CLOUD_TRACE_CONTEXT};
///
/// let ctx = Context::background()
///     .with_value(CLOUD_TRACE_CONTEXT, "projects/proj/traces/abc123");
///
/// assert_eq!(ctx.trace(), Some("projects/proj/traces/abc123"));
/// assert_eq!(Context::background().trace(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    fields: Arc<HashMap<String, FieldValue>>,
}

impl Context {
    /// Empty context carrying no values.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context with `key` set to `value`.
    #[must_use]
    pub fn with_value<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut fields = (*self.fields).clone();
        fields.insert(key.into(), value.into());
        Self {
            fields: Arc::new(fields),
        }
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Trace token stored under [`CLOUD_TRACE_CONTEXT`].
    ///
    /// A missing key or a non-string value yields `None`.
    pub fn trace(&self) -> Option<&str> {
        self.value(CLOUD_TRACE_CONTEXT).and_then(FieldValue::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}
