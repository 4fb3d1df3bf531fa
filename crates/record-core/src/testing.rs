// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Hand-written record fixtures shared across unit tests.
//!
//! These implement [`Record`] manually, the way a crate without the derive
//! would, and double as a check that the trait surface is implementable by
//! hand.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    record::Record,
    relation::{RelationDef, RelationKind},
    rule::{FieldRules, Rule, RuleSpec}
};

/// Unwrap a JSON object literal in tests.
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object")
    }
}

/// Plain record with a required first name, no relations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String
}

const PERSON_RULES: &[FieldRules] = &[FieldRules {
    field: "first_name",
    rules: &[RuleSpec {
        rule:    Rule::Required,
        message: None
    }]
}];

impl Record for Person {
    type Id = Uuid;

    const ENTITY: &'static str = "person";
    const ID_FIELD: &'static str = "id";

    fn fillable() -> &'static [&'static str] {
        &["first_name", "last_name"]
    }

    fn rules() -> &'static [FieldRules] {
        PERSON_RULES
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn ensure_id(&mut self) {
        if self.id.is_nil() {
            self.id = Uuid::now_v7();
        }
    }
}

/// Parent side of a has-many relation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub name: String
}

const AUTHOR_RELATIONS: &[RelationDef] = &[RelationDef {
    name: "posts",
    kind: RelationKind::HasMany,
    related: "post",
    foreign_key: "author_id"
}];

impl Record for Author {
    type Id = Uuid;

    const ENTITY: &'static str = "author";
    const ID_FIELD: &'static str = "id";

    fn fillable() -> &'static [&'static str] {
        &["name"]
    }

    fn relations() -> &'static [RelationDef] {
        AUTHOR_RELATIONS
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn ensure_id(&mut self) {
        if self.id.is_nil() {
            self.id = Uuid::now_v7();
        }
    }
}

/// Child side of the relation; holds the author's foreign key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String
}

const POST_RULES: &[FieldRules] = &[FieldRules {
    field: "title",
    rules: &[RuleSpec {
        rule:    Rule::Required,
        message: None
    }]
}];

impl Record for Post {
    type Id = Uuid;

    const ENTITY: &'static str = "post";
    const ID_FIELD: &'static str = "id";

    fn fillable() -> &'static [&'static str] {
        &["title"]
    }

    fn rules() -> &'static [FieldRules] {
        POST_RULES
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn ensure_id(&mut self) {
        if self.id.is_nil() {
            self.id = Uuid::now_v7();
        }
    }
}
