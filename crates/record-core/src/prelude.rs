// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use record_core::prelude::*;
//! ```

pub use crate::{
    BindError, BindFromPayload, Bound, Payload, Record, RecordStore, ShapeError, Store,
    ValidationFailure, async_trait,
    record::populate,
    relation::{RelationDef, RelationKind},
    rule::{FieldRules, Rule, RuleSpec},
    store::memory::MemStore
};
