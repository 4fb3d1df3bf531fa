// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Relations example with record-derive
//!
//! Demonstrates record relationships:
//! - `#[belongs_to(Record)]` for foreign keys
//! - `#[has_one(Record)]` for one-to-one
//! - `#[has_many(Record)]` for one-to-many

use record_derive::{BindFromPayload, MemStore, Payload, Record, RecordStore};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

// ============================================================================
// Record Definitions with Relations
// ============================================================================

/// Author record - has one profile, has many posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Record)]
#[has_one(Profile)]
#[has_many(Post)]
pub struct Author {
    #[id]
    pub id: Uuid,

    #[field(fillable)]
    #[rule(required)]
    pub name: String,

    #[field(fillable)]
    #[rule(email)]
    pub email: Option<String>,
}

/// Post record - belongs to author.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Record)]
pub struct Post {
    #[id]
    pub id: Uuid,

    /// Foreign key to author.
    #[belongs_to(Author)]
    pub author_id: Uuid,

    #[field(fillable)]
    #[rule(required)]
    pub title: String,

    #[field(fillable)]
    pub body: String,
}

/// Profile record - the has-one side of author.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Record)]
pub struct Profile {
    #[id]
    pub id: Uuid,

    /// Foreign key to author, written by the relation resolver.
    pub author_id: Uuid,

    #[field(fillable)]
    pub bio: String,
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("demo_relations=info,record_core=debug")
        .init();

    let store = MemStore::new();

    // One nested payload creates the author, its profile, and both posts,
    // all linked by foreign key.
    let payload = Payload::from_pairs([(
        "author",
        json!({
            "name": "Johnny Doe",
            "email": "johnny@example.com",
            "profile": {"bio": "writes about record binding"},
            "posts": [
                {"title": "Hello", "body": "first post"},
                {"title": "Again", "body": "second post"}
            ]
        })
    )]);

    let author = Author::create_from_payload(&payload, &store)
        .await
        .expect("valid nested payload")
        .into_one()
        .expect("single record");
    tracing::info!(id = %author.id, "created author {}", author.name);

    let posts: Vec<Post> = RecordStore::list(&store).await.expect("list posts");
    for post in &posts {
        assert_eq!(post.author_id, author.id);
        tracing::info!(title = %post.title, "post linked to author");
    }

    // A belongs-to payload on the child side: the related author is created
    // first, then the post saves with its foreign key in place.
    let payload = Payload::from_pairs([
        ("post.title", json!("Guest entry")),
        ("post.body", json!("by a brand new author")),
        ("post.author", json!({"name": "Tommie Moe"}))
    ]);
    let post = Post::create_from_payload(&payload, &store)
        .await
        .expect("valid payload")
        .into_one()
        .expect("single record");
    tracing::info!(author_id = %post.author_id, "guest post linked");

    tracing::info!(
        authors = store.count("author"),
        profiles = store.count("profile"),
        posts = store.count("post"),
        "done"
    );
}
