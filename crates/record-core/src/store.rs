// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The persistence seam.
//!
//! Connection handling, transactions, and query building are explicitly out
//! of scope here; backends supply them behind [`RecordStore`]. The bind
//! pipeline only ever drives these four operations, sequentially, one
//! record at a time.

use async_trait::async_trait;

use crate::record::Record;

pub mod memory;

/// Anchor trait for a storage backend.
///
/// Exists so one backend can serve many record types with a single error
/// type; every [`RecordStore`] implementation shares its `Error`.
pub trait Store: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;
}

/// Persistence operations for one record type.
///
/// # Example
///
/// Generated bind impls bound a backend per related record type:
///
/// ```rust,ignore
/// async fn handler<S>(payload: &Payload, store: &S) -> Result<(), BindError<S::Error>>
/// where
///     S: RecordStore<User> + RecordStore<Post>
/// {
///     User::create_from_payload(payload, store).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait RecordStore<R: Record>: Store {
    /// Insert a new row from the record's current attributes.
    async fn insert(&self, record: &R) -> Result<(), Self::Error>;

    /// Overwrite the row with the record's id.
    async fn update(&self, record: &R) -> Result<(), Self::Error>;

    /// Fetch a record by primary key.
    async fn find_by_id(&self, id: &R::Id) -> Result<Option<R>, Self::Error>;

    /// Fetch all records of this type, in insertion order.
    async fn list(&self) -> Result<Vec<R>, Self::Error>;
}
