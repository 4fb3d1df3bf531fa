// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Rule declarations: constraints, custom messages, entity override.

use record_derive::{Record, Rule};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Record)]
#[record(entity = "member", uuid = "v4")]
pub struct Member {
    #[id]
    pub id: Uuid,

    #[field(fillable)]
    #[rule(required, message = "You have got to choose a first name!")]
    #[rule(length(min = 2, max = 64))]
    pub first_name: String,

    #[field(fillable)]
    #[rule(email)]
    pub email: String,

    #[field(fillable)]
    #[rule(range(min = 0, max = 120))]
    pub age: Option<u8>,

    #[field(fillable)]
    #[rule(pattern = "^[a-z-]+$")]
    pub slug: String,
}

fn main() {
    assert_eq!(Member::ENTITY, "member");

    let rules = Member::rules();
    assert_eq!(rules.len(), 4);
    assert_eq!(rules[0].field, "first_name");
    assert_eq!(rules[0].rules.len(), 2);
    assert_eq!(rules[0].rules[0].rule, Rule::Required);
    assert_eq!(
        rules[0].rules[0].message,
        Some("You have got to choose a first name!")
    );
    assert_eq!(
        rules[0].rules[1].rule,
        Rule::Length {
            min: Some(2),
            max: Some(64)
        }
    );
    assert!(rules[0].rules[1].message.is_none());
    assert_eq!(rules[1].rules[0].rule, Rule::Email);
    assert_eq!(rules[3].rules[0].rule, Rule::Pattern("^[a-z-]+$"));
}
