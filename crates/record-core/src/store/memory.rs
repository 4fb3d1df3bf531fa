// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-memory storage backend.
//!
//! Rows live as serialized attribute maps keyed by entity name, which keeps
//! the backend generic over every record type without any registration
//! step. Used by the test suites and the demos; real deployments implement
//! [`RecordStore`](crate::store::RecordStore) against their database.

use std::{collections::HashMap, fmt, sync::RwLock};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{
    record::Record,
    store::{RecordStore, Store}
};

/// In-memory record store.
///
/// # Example
///
/// ```rust,ignore
/// let store = MemStore::new();
/// User::create_from_payload(&payload, &store).await?;
/// assert_eq!(store.rows("user").len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemStore {
    tables: RwLock<HashMap<&'static str, Vec<Map<String, Value>>>>
}

impl MemStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the rows currently held for an entity.
    ///
    /// Returns an empty vector for unknown entities (and when the table
    /// lock is poisoned, which only happens after a panicking test).
    #[must_use]
    pub fn rows(&self, entity: &str) -> Vec<Map<String, Value>> {
        self.tables
            .read()
            .map(|tables| tables.get(entity).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Count the rows currently held for an entity.
    #[must_use]
    pub fn count(&self, entity: &str) -> usize {
        self.rows(entity).len()
    }

    /// Check whether any row for the entity contains all given pairs.
    #[must_use]
    pub fn has_row(&self, entity: &str, pairs: &[(&str, Value)]) -> bool {
        self.rows(entity).iter().any(|row| {
            pairs
                .iter()
                .all(|(field, value)| row.get(*field) == Some(value))
        })
    }
}

/// Error type for [`MemStore`] operations.
#[derive(Debug)]
pub enum MemStoreError {
    /// The table lock was poisoned by a panicking writer.
    Poisoned,

    /// A stored row no longer deserializes into its record type.
    Corrupt {
        /// Entity whose row failed to decode.
        entity: &'static str,
        /// Decoder diagnostics.
        detail: String
    }
}

impl fmt::Display for MemStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poisoned => write!(f, "memory store lock poisoned"),
            Self::Corrupt {
                entity,
                detail
            } => write!(f, "stored `{entity}` row is corrupt: {detail}")
        }
    }
}

impl std::error::Error for MemStoreError {}

impl Store for MemStore {
    type Error = MemStoreError;
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemStore {
    async fn insert(&self, record: &R) -> Result<(), Self::Error> {
        let mut tables = self.tables.write().map_err(|_| MemStoreError::Poisoned)?;
        tables
            .entry(R::ENTITY)
            .or_default()
            .push(record.attributes());
        Ok(())
    }

    async fn update(&self, record: &R) -> Result<(), Self::Error> {
        let id = id_value(record);
        let mut tables = self.tables.write().map_err(|_| MemStoreError::Poisoned)?;
        let rows = tables.entry(R::ENTITY).or_default();
        match rows.iter_mut().find(|row| row.get(R::ID_FIELD) == Some(&id)) {
            Some(row) => *row = record.attributes(),
            None => rows.push(record.attributes())
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &R::Id) -> Result<Option<R>, Self::Error> {
        let id = serde_json::to_value(id).unwrap_or(Value::Null);
        let tables = self.tables.read().map_err(|_| MemStoreError::Poisoned)?;
        let Some(rows) = tables.get(R::ENTITY) else {
            return Ok(None);
        };
        rows.iter()
            .find(|row| row.get(R::ID_FIELD) == Some(&id))
            .map(|row| decode::<R>(row))
            .transpose()
    }

    async fn list(&self) -> Result<Vec<R>, Self::Error> {
        let tables = self.tables.read().map_err(|_| MemStoreError::Poisoned)?;
        tables
            .get(R::ENTITY)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|row| decode::<R>(row))
            .collect()
    }
}

/// Serialize a record's id for row matching.
fn id_value<R: Record>(record: &R) -> Value {
    serde_json::to_value(record.id()).unwrap_or(Value::Null)
}

/// Decode a stored row back into its record type.
fn decode<R: Record>(row: &Map<String, Value>) -> Result<R, MemStoreError> {
    serde_json::from_value(Value::Object(row.clone())).map_err(|err| MemStoreError::Corrupt {
        entity: R::ENTITY,
        detail: err.to_string()
    })
}
