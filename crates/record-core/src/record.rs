// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The record metadata trait and attribute population.
//!
//! [`Record`] is the contract between generated code and the runtime: it
//! names the entity, the fillable allow-list, the declared rules and
//! relations, and gives uniform access to the record's attributes through a
//! serde round trip. `#[derive(Record)]` implements it; manual
//! implementations only need the metadata items, the defaults cover the
//! rest.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{
    error::AttributeError,
    relation::RelationDef,
    rule::FieldRules
};

/// A persistent record type that payloads bind onto.
///
/// # Contract
///
/// - `ENTITY` is the payload-facing name (`"user"` matches `user_first_name`,
///   `user.first_name`, and a nested `"user"` entry).
/// - [`fillable`](Record::fillable) is the mass-assignment allow-list;
///   population never writes any other attribute.
/// - The id field is not fillable; it is assigned by
///   [`ensure_id`](Record::ensure_id) at first insert or supplied explicitly
///   in update payloads.
pub trait Record: Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Primary key type.
    type Id: Clone
        + PartialEq
        + Default
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    /// Payload-facing entity name.
    const ENTITY: &'static str;

    /// Name of the primary key field.
    const ID_FIELD: &'static str;

    /// Attribute names that may be mass-assigned from payloads.
    fn fillable() -> &'static [&'static str];

    /// Declared validation rules.
    fn rules() -> &'static [FieldRules] {
        &[]
    }

    /// Declared relations.
    fn relations() -> &'static [RelationDef] {
        &[]
    }

    /// Current primary key value.
    fn id(&self) -> Self::Id;

    /// Overwrite the primary key value.
    fn set_id(&mut self, id: Self::Id);

    /// Assign a fresh primary key if none is set yet.
    ///
    /// Generated impls fill UUID ids here; records whose ids the backend
    /// assigns leave this a no-op.
    fn ensure_id(&mut self) {}

    /// Check whether the record has never been persisted.
    ///
    /// True while the id still holds its default value.
    fn is_new(&self) -> bool {
        self.id() == Self::Id::default()
    }

    /// Current attributes as a JSON map.
    ///
    /// This is the attribute set rules are evaluated against and the row
    /// representation stores receive.
    fn attributes(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new()
        }
    }

    /// Write one attribute through a serde round trip.
    ///
    /// # Errors
    ///
    /// [`AttributeError`] when the value does not deserialize into the
    /// field's type.
    fn set_attribute(&mut self, field: &str, value: &Value) -> Result<(), AttributeError> {
        let mut attrs = self.attributes();
        attrs.insert(field.to_owned(), value.clone());
        *self = serde_json::from_value(Value::Object(attrs)).map_err(|source| AttributeError {
            field: field.to_owned(),
            source
        })?;
        Ok(())
    }
}

/// Copy fillable attributes from an extracted map onto a record.
///
/// Only keys present in the record's fillable allow-list are written;
/// unknown and non-fillable keys are silently dropped. Mutates in place,
/// never persists.
///
/// # Errors
///
/// [`AttributeError`] when a fillable value does not fit its field's type.
pub fn populate<R: Record>(
    record: &mut R,
    attrs: &Map<String, Value>
) -> Result<(), AttributeError> {
    for field in R::fillable() {
        if let Some(value) = attrs.get(*field) {
            record.set_attribute(field, value)?;
        }
    }
    Ok(())
}
