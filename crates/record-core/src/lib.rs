// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core payload, validation, and persistence traits for record-derive.
//!
//! This crate provides the runtime half of the record-derive ecosystem: the
//! payload model, key-path extraction, shape detection, rule evaluation, and
//! the bind → validate → persist pipeline that generated code drives.
//!
//! # Overview
//!
//! - [`Payload`] — owned JSON-object wrapper around one request's input
//! - [`Record`] — metadata trait implemented by `#[derive(Record)]`
//! - [`BindFromPayload`] — the bind operations, generated per record type
//! - [`Store`] / [`RecordStore`] — the persistence seam
//! - [`MemStore`] — in-memory backend for tests and demos
//! - [`prelude`] — convenient re-exports
//!
//! # Pipeline
//!
//! Every bind operation runs the same explicit stages, with no ambient
//! request state and no lifecycle hooks:
//!
//! ```text
//! Payload ──extract──▶ per-entity map ──split──▶ attributes + relations
//!                                          │
//!                                       shape (one | many)
//!                                          │
//!                              populate (fillable only)
//!                                          │
//!                                 validate (rule set)
//!                                          │
//!                          belongs-to ─▶ insert ─▶ has-one / has-many
//! ```
//!
//! # Usage
//!
//! Most users should use `record-derive` directly, which re-exports this
//! crate. For manual implementations:
//!
//! ```rust,ignore
//! use record_core::prelude::*;
//!
//! impl Record for Invoice {
//!     type Id = Uuid;
//!     const ENTITY: &'static str = "invoice";
//!     const ID_FIELD: &'static str = "id";
//!     // ...
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bind;
pub mod error;
pub mod extract;
pub mod payload;
pub mod prelude;
pub mod record;
pub mod relation;
pub mod rule;
pub mod shape;
pub mod store;
pub mod validate;

/// Re-export async_trait for generated code.
pub use async_trait::async_trait;
pub use bind::{BindFromPayload, Bound, Prepared, PreparedSet};
pub use error::{AttributeError, BindError, ShapeError, ValidationFailure};
pub use payload::Payload;
pub use record::{Record, populate};
pub use relation::{RelationDef, RelationKind};
pub use rule::{FieldRules, Rule, RuleSpec};
/// Re-export serde_json for generated code.
pub use serde_json;
pub use shape::Shape;
pub use store::{RecordStore, Store, memory::MemStore};
/// Re-export uuid for generated code.
pub use uuid;

#[cfg(test)]
pub(crate) mod testing;
