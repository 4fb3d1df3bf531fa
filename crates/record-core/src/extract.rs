// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Key-path extraction.
//!
//! Turns one request's [`Payload`] into the slice of input that belongs to a
//! single entity. Two conventions are recognized:
//!
//! - **Nested**: a top-level key equal to the entity name (ASCII
//!   case-insensitive) whose value is an object (one record) or an array
//!   (a batch). This is the shape AJAX clients send.
//! - **Flat**: keys of the form `<entity>_<field>` or `<entity>.<field>`.
//!   The prefix match is case-insensitive on the entity name; per key the
//!   underscore form is tried first and the first matching form wins. Keys
//!   matching neither convention are dropped.
//!
//! Both flat prefix forms extract identically; extraction never fails, it
//! only narrows.

use serde_json::{Map, Value};

use crate::payload::Payload;

/// Per-entity input produced by [`for_entity`].
///
/// The variant records which transport convention produced the mapping,
/// because shape detection treats them differently: only the flat form is
/// subject to the columnar-batch heuristic.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    /// Field map assembled from `<entity>_<field>` / `<entity>.<field>` keys.
    Flat(Map<String, Value>),

    /// Raw value found under the entity key; an object or an array.
    Nested(Value)
}

/// Extract the input intended for `entity` from a payload.
///
/// The nested convention is checked first; when the payload carries no
/// nested entry, the flat form is assembled (possibly empty when nothing
/// matches).
///
/// # Example
///
/// ```rust
/// use record_core::extract::{Extracted, for_entity};
/// use record_core::Payload;
/// use serde_json::json;
///
/// let payload = Payload::from_pairs([("user.first_name", json!("Johnny"))]);
/// let Extracted::Flat(fields) = for_entity(&payload, "user") else {
///     panic!("expected flat extraction");
/// };
/// assert_eq!(fields.get("first_name"), Some(&json!("Johnny")));
/// ```
#[must_use]
pub fn for_entity(payload: &Payload, entity: &str) -> Extracted {
    if let Some(value) = payload.get_ignore_case(entity)
        && (value.is_object() || value.is_array())
    {
        return Extracted::Nested(value.clone());
    }

    let mut fields = Map::new();
    for (key, value) in payload.iter() {
        if let Some(field) = strip_entity_prefix(key, entity) {
            fields.insert(field.to_owned(), value.clone());
        }
    }
    Extracted::Flat(fields)
}

/// Strip an entity prefix from a flat key.
///
/// Returns the field name for keys following `<entity>_<field>` or
/// `<entity>.<field>`, `None` for keys matching neither convention. The
/// entity comparison ignores ASCII case; the separator must be followed by
/// at least one character.
#[must_use]
pub fn strip_entity_prefix<'key>(key: &'key str, entity: &str) -> Option<&'key str> {
    let head = key.get(..entity.len())?;
    if !head.eq_ignore_ascii_case(entity) {
        return None;
    }
    let rest = &key[entity.len()..];
    let mut chars = rest.chars();
    match chars.next() {
        Some('_') | Some('.') => {
            let field = chars.as_str();
            if field.is_empty() { None } else { Some(field) }
        }
        _ => None
    }
}
