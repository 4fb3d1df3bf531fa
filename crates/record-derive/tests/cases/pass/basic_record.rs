// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Basic `#[derive(Record)]` usage: id, fillable fields, entity default.

use record_derive::Record;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Record)]
pub struct User {
    #[id]
    pub id: Uuid,

    #[field(fillable)]
    pub first_name: String,

    #[field(fillable)]
    pub last_name: String,

    #[auto]
    pub created_at: Option<String>,
}

fn main() {
    assert_eq!(User::ENTITY, "user");
    assert_eq!(User::ID_FIELD, "id");
    assert_eq!(User::fillable(), &["first_name", "last_name"]);

    let mut user = User::default();
    assert!(user.is_new());
    user.ensure_id();
    assert!(!user.is_new());
    assert!(user.attributes().contains_key("created_at"));
}
