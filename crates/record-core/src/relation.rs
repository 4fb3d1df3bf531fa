// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Relation declarations.
//!
//! Relation kinds are a closed set resolved at declaration time by the
//! derive macro; the bind pipeline never inspects types at run time to
//! discover how two records relate. Each declaration carries the payload
//! key it answers to and the foreign key that links the two rows.
//!
//! # Conventions
//!
//! | Declaration | Payload key | Foreign key |
//! |-------------|-------------|-------------|
//! | `#[belongs_to(Author)]` on `author_id` | `author` | `author_id` (own field) |
//! | `#[has_one(Profile)]` | `profile` | `<entity>_id` on `Profile` |
//! | `#[has_many(Post)]` | `posts` | `<entity>_id` on `Post` |
//!
//! Both the key and the foreign key can be overridden at the declaration
//! site (`name = "..."`, `foreign_key = "..."`).

use serde_json::{Map, Value};

use crate::record::Record;

/// Cardinality of a declared relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// This record holds the foreign key of the related record.
    BelongsTo,

    /// One related record holds this record's key.
    HasOne,

    /// Many related records hold this record's key.
    HasMany
}

impl RelationKind {
    /// Check whether the relation resolves before the owning record saves.
    ///
    /// Belongs-to must: the foreign key lives on the owning record and has
    /// to be in place when the row is written.
    #[must_use]
    pub const fn resolves_before_save(&self) -> bool {
        matches!(self, Self::BelongsTo)
    }

    /// Check whether the relation payload is a list of records.
    #[must_use]
    pub const fn is_to_many(&self) -> bool {
        matches!(self, Self::HasMany)
    }
}

/// One declared relation, resolved at derive time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationDef {
    /// Payload key this relation answers to.
    pub name: &'static str,

    /// Declared cardinality.
    pub kind: RelationKind,

    /// Related record's entity name, for diagnostics.
    pub related: &'static str,

    /// Linking field: on the owning record for belongs-to, on the related
    /// record otherwise.
    pub foreign_key: &'static str
}

/// Split an extracted field map into plain attributes and relation payloads.
///
/// Keys matching a declared relation name move into the relation map; all
/// remaining keys stay attributes. Must run on flat input before cardinality
/// detection so array-valued relation payloads never read as columnar
/// batches.
#[must_use]
pub fn split<R: Record>(
    map: Map<String, Value>
) -> (Map<String, Value>, Map<String, Value>) {
    let mut attrs = Map::new();
    let mut relations = Map::new();

    for (key, value) in map {
        if R::relations().iter().any(|def| def.name == key) {
            relations.insert(key, value);
        } else {
            attrs.insert(key, value);
        }
    }
    (attrs, relations)
}
