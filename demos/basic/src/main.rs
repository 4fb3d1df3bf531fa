// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Basic binding example with record-derive
//!
//! Demonstrates the explicit payload pipeline:
//! - single-record binds from flat and nested payloads
//! - columnar batch binds
//! - validation failures with field-scoped messages

use record_derive::{BindError, BindFromPayload, MemStore, Payload, Record};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

// ============================================================================
// Record Definition
// ============================================================================

/// User record bound from request payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Record)]
pub struct User {
    /// Unique identifier (UUID v7).
    #[id]
    pub id: Uuid,

    /// Required display name.
    #[field(fillable)]
    #[rule(required)]
    pub first_name: String,

    #[field(fillable)]
    pub last_name: String,

    /// Contact address, validated when present.
    #[field(fillable)]
    #[rule(email)]
    pub email: Option<String>,
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("demo_basic=info,record_core=debug")
        .init();

    let store = MemStore::new();

    // Flat form keys, one record
    let payload = Payload::from_pairs([
        ("user.first_name", json!("Johnny")),
        ("user.last_name", json!("Doe")),
        ("user.email", json!("johnny@example.com"))
    ]);
    let user = User::create_from_payload(&payload, &store)
        .await
        .expect("valid payload")
        .into_one()
        .expect("single record");
    tracing::info!(id = %user.id, "created {} {}", user.first_name, user.last_name);

    // Columnar batch: parallel equal-length arrays, one per field
    let payload = Payload::from_pairs([
        ("user_first_name", json!(["Johnnie", "Tommie"])),
        ("user_last_name", json!(["Doe", "Moe"]))
    ]);
    let batch = User::create_from_payload(&payload, &store)
        .await
        .expect("valid batch");
    tracing::info!("batch created {} records", batch.len());

    // Nested (AJAX) shape
    let payload = Payload::from_pairs([(
        "user",
        json!({"first_name": "Frankie", "last_name": "Roe"})
    )]);
    User::create_from_payload(&payload, &store)
        .await
        .expect("valid nested payload");

    // Validation failure: required field missing, nothing written
    let payload = Payload::from_pairs([("user.last_name", json!("Nameless"))]);
    match User::create_from_payload(&payload, &store).await {
        Err(BindError::Validation(failure)) => {
            for field in failure.fields() {
                tracing::warn!(field, messages = ?failure.messages(field), "rejected");
            }
        }
        other => panic!("expected a validation failure, got {other:?}")
    }

    tracing::info!("store now holds {} users", store.count("user"));
}
