// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # record-derive
//!
//! One crate, all features. Re-exports:
//! - [`Record`](macro@Record) derive macro from `record-derive-impl`
//! - All types from `record-core` ([`Payload`], [`Bound`], [`MemStore`],
//!   [`BindFromPayload`])
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use record_derive::{BindFromPayload, MemStore, Payload, Record};
//! use serde::{Deserialize, Serialize};
//! use uuid::Uuid;
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize, Record)]
//! pub struct User {
//!     #[id]
//!     pub id: Uuid,
//!
//!     #[field(fillable)]
//!     #[rule(required)]
//!     pub first_name: String,
//!
//!     #[field(fillable)]
//!     pub last_name: String,
//! }
//!
//! let store = MemStore::new();
//! let payload = Payload::from_pairs([
//!     ("user.first_name", "Johnny".into()),
//!     ("user.last_name", "Doe".into())
//! ]);
//! let user = User::create_from_payload(&payload, &store).await?;
//! ```

// Re-export all core types
pub use record_core::*;
// Re-export derive macro
pub use record_derive_impl::Record;
