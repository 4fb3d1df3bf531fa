// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for the Record derive macro.
//!
//! Parsing is layered the same way the attributes are:
//!
//! - [`record`] — record-level `#[record(...)]` via darling, combined with
//!   everything below into [`RecordDef`]
//! - [`field`] — field flags (`#[id]`, `#[auto]`, `#[field(fillable)]`)
//! - [`rule`] — `#[rule(...)]` constraint declarations
//! - [`relation`] — `#[belongs_to]` / `#[has_one]` / `#[has_many]`
//! - [`uuid_version`] — id generation configuration

mod field;
mod record;
mod relation;
mod rule;
mod uuid_version;

pub use field::FieldDef;
pub use record::RecordDef;
pub use relation::{RelationDecl, RelationKindDecl, ResolvedRelation};
pub use rule::{RuleDef, RuleKind};
pub use uuid_version::UuidVersion;
