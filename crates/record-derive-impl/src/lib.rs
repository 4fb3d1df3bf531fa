// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! Internal proc-macro implementation for record-derive.
//!
//! Use `record-derive` instead; it re-exports the macro together with the
//! runtime types generated code depends on.
//!
//! # Attribute Quick Reference
//!
//! ## Record-Level `#[record(...)]`
//!
//! ```rust,ignore
//! #[derive(Record)]
//! #[record(
//!     entity = "user", // Optional: payload entity name (default: snake_case type name)
//!     uuid = "v7"      // Optional: "v7" | "v4" id generation (default: "v7")
//! )]
//! #[has_many(Post)]                         // One-to-many relation
//! #[has_one(Profile, foreign_key = "owner_id")] // One-to-one relation
//! pub struct User { /* ... */ }
//! ```
//!
//! ## Field-Level Attributes
//!
//! ```rust,ignore
//! pub struct Post {
//!     #[id]                        // Primary key; never fillable
//!     pub id: Uuid,
//!
//!     #[field(fillable)]           // Mass-assignable from payloads
//!     #[rule(required)]
//!     #[rule(length(min = 1, max = 255))]
//!     pub title: String,
//!
//!     #[belongs_to(User)]          // Foreign key relation
//!     pub user_id: Uuid,
//!
//!     #[auto]                      // Backend-assigned; never fillable
//!     pub created_at: Option<String>,
//! }
//! ```
//!
//! # Generated Code Overview
//!
//! For a `User` record, the macro generates:
//!
//! | Generated impl | Description |
//! |----------------|-------------|
//! | `impl Record for User` | Entity name, fillable list, rules, relations, id access |
//! | `impl BindFromPayload<S> for User` | `create_from_payload`, `update_from_payload`, `save_from_payload` with typed relation arms |
//!
//! The `BindFromPayload` impl bounds its store with `RecordStore<T>` for the
//! record and every related type, so relation dispatch is resolved entirely
//! at compile time.

mod record;

use proc_macro::TokenStream;

/// Derive macro binding request payloads onto a record type.
#[proc_macro_derive(
    Record,
    attributes(record, field, id, auto, rule, belongs_to, has_one, has_many)
)]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive(input)
}
