// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Request payload model.
//!
//! A [`Payload`] is the explicit argument every bind operation receives in
//! place of ambient request state. It wraps one request's input as a JSON
//! object and is transient: it exists for the duration of a single bind.
//!
//! Both transport shapes are carried by the same type:
//!
//! | Shape | Example |
//! |-------|---------|
//! | Flat form keys | `{"user_first_name": "Johnny"}` |
//! | Flat dotted keys | `{"user.first_name": "Johnny"}` |
//! | Nested (AJAX) | `{"user": {"first_name": "Johnny"}}` |

use serde_json::{Map, Value};

/// One request's input, keyed by string.
///
/// Values may be scalars, arrays of scalars (columnar batches), or arrays of
/// objects (nested batches and has-many relation payloads).
///
/// # Example
///
/// ```rust
/// use record_core::Payload;
/// use serde_json::json;
///
/// let payload = Payload::from_pairs([
///     ("user.first_name", json!("Johnny")),
///     ("user.last_name", json!("Doe"))
/// ]);
/// assert_eq!(payload.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    inner: Map<String, Value>
}

impl Payload {
    /// Create an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a payload from a JSON value.
    ///
    /// # Returns
    ///
    /// `Some(Payload)` when `value` is a JSON object, `None` otherwise.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(inner) => Some(Self {
                inner
            }),
            _ => None
        }
    }

    /// Create a payload from key/value pairs.
    ///
    /// Later pairs overwrite earlier ones with the same key.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>
    {
        let inner = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        Self {
            inner
        }
    }

    /// Insert a key/value pair, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.inner.insert(key.into(), value);
    }

    /// Look up a key exactly.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Look up a key ignoring ASCII case.
    ///
    /// An exact match wins over a case-insensitive one.
    #[must_use]
    pub fn get_ignore_case(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.inner.get(key) {
            return Some(value);
        }
        self.inner
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    }

    /// Iterate over all key/value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.inner.iter()
    }

    /// Number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check whether the payload has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Borrow the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.inner
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(inner: Map<String, Value>) -> Self {
        Self {
            inner
        }
    }
}
