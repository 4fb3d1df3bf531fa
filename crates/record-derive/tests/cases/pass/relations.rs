// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Test for `#[belongs_to]`, `#[has_one]`, and `#[has_many]` relation
//! attributes and the store bounds of the generated bind impl.

use record_derive::{BindFromPayload, MemStore, Record, RelationKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Parent record with has-one and has-many relations
#[derive(Debug, Clone, Default, Serialize, Deserialize, Record)]
#[has_one(Profile)]
#[has_many(Post)]
pub struct Author {
    #[id]
    pub id: Uuid,

    #[field(fillable)]
    pub name: String,
}

// Child record with belongs-to relation
#[derive(Debug, Clone, Default, Serialize, Deserialize, Record)]
pub struct Post {
    #[id]
    pub id: Uuid,

    #[belongs_to(Author)]
    pub author_id: Uuid,

    #[field(fillable)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Record)]
pub struct Profile {
    #[id]
    pub id: Uuid,

    pub author_id: Uuid,

    #[field(fillable)]
    pub bio: String,
}

fn main() {
    let relations = Author::relations();
    assert_eq!(relations.len(), 2);
    assert_eq!(relations[0].name, "profile");
    assert_eq!(relations[0].kind, RelationKind::HasOne);
    assert_eq!(relations[0].foreign_key, "author_id");
    assert_eq!(relations[1].name, "posts");
    assert_eq!(relations[1].kind, RelationKind::HasMany);

    let belongs = Post::relations();
    assert_eq!(belongs[0].name, "author");
    assert_eq!(belongs[0].kind, RelationKind::BelongsTo);
    assert_eq!(belongs[0].foreign_key, "author_id");

    // The generated impls are usable against any store implementing
    // RecordStore for the record and its relations.
    fn _author_binds<S>()
    where
        Author: BindFromPayload<S>,
        S: record_core::Store + record_core::RecordStore<Author>,
    {
    }
    _author_binds::<MemStore>();

    fn _post_binds<S>()
    where
        Post: BindFromPayload<S>,
        S: record_core::Store + record_core::RecordStore<Post>,
    {
    }
    _post_binds::<MemStore>();
}
