// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! End-to-end bind tests: payload in, validated rows out.

use record_derive::{BindError, BindFromPayload, Bound, MemStore, Payload, Record, ShapeError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Record)]
pub struct User {
    #[id]
    pub id: Uuid,

    #[field(fillable)]
    #[rule(required)]
    pub first_name: String,

    #[field(fillable)]
    pub last_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Record)]
pub struct Applicant {
    #[id]
    pub id: Uuid,

    #[field(fillable)]
    #[rule(required, message = "You have got to choose a first name!")]
    pub first_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Record)]
#[has_one(Profile)]
#[has_many(Post)]
pub struct Author {
    #[id]
    pub id: Uuid,

    #[field(fillable)]
    #[rule(required)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Record)]
pub struct Post {
    #[id]
    pub id: Uuid,

    #[belongs_to(Author)]
    pub author_id: Uuid,

    #[field(fillable)]
    #[rule(required)]
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

#[tokio::test]
async fn save_from_payload_persists_flat_input() {
    let store = MemStore::new();
    let payload = Payload::from_pairs([
        ("user.first_name", json!("Johnny")),
        ("user.last_name", json!("Doe"))
    ]);

    let mut user = User::default();
    user.save_from_payload(&payload, &store).await.unwrap();

    assert!(store.has_row(
        "user",
        &[("first_name", json!("Johnny")), ("last_name", json!("Doe"))]
    ));
}

#[tokio::test]
async fn underscore_and_dot_payloads_bind_identically() {
    let store = MemStore::new();
    let dotted = Payload::from_pairs([("user.first_name", json!("Johnny"))]);
    let underscored = Payload::from_pairs([("user_first_name", json!("Johnny"))]);

    let from_dotted = User::create_from_payload(&dotted, &store)
        .await
        .unwrap()
        .into_one()
        .unwrap();
    let from_underscored = User::create_from_payload(&underscored, &store)
        .await
        .unwrap()
        .into_one()
        .unwrap();

    assert_eq!(from_dotted.first_name, from_underscored.first_name);
    assert_eq!(store.count("user"), 2);
}

#[tokio::test]
async fn validation_failure_writes_nothing() {
    let store = MemStore::new();
    let payload = Payload::from_pairs([("user.last_name", json!("Doe"))]);

    let err = User::create_from_payload(&payload, &store).await.unwrap_err();
    match err {
        BindError::Validation(failure) => {
            assert!(failure.has("first_name"));
        }
        other => panic!("expected validation failure, got {other}")
    }
    assert_eq!(store.count("user"), 0);
}

#[tokio::test]
async fn custom_validation_message_surfaces() {
    let store = MemStore::new();
    let payload = Payload::new();

    let err = Applicant::create_from_payload(&payload, &store)
        .await
        .unwrap_err();
    let failure = err.validation().expect("expected validation failure");
    assert_eq!(
        failure.messages("first_name"),
        ["You have got to choose a first name!"]
    );
}

#[tokio::test]
async fn create_from_attrs_binds_explicit_attributes() {
    let store = MemStore::new();
    let attrs = match json!({"first_name": "Johnnie", "last_name": "Doe"}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!()
    };

    let user = User::create_from_attrs(attrs, &store).await.unwrap();
    assert_eq!(user.first_name, "Johnnie");
    assert!(store.has_row("user", &[("last_name", json!("Doe"))]));
}

#[tokio::test]
async fn create_from_payload_binds_one() {
    let store = MemStore::new();
    let payload = Payload::from_pairs([
        ("user.first_name", json!("Johnnie")),
        ("user.last_name", json!("Doe"))
    ]);

    let bound = User::create_from_payload(&payload, &store).await.unwrap();
    assert_eq!(bound.len(), 1);
    let user = bound.into_one().unwrap();
    assert!(!user.is_new());
    assert!(store.has_row("user", &[("first_name", json!("Johnnie"))]));
}

#[tokio::test]
async fn columnar_batch_creates_every_record() {
    let store = MemStore::new();
    let payload = Payload::from_pairs([
        ("user.first_name", json!(["Johnnie", "Tommie"])),
        ("user.last_name", json!(["Doe", "Moe"]))
    ]);

    let bound = User::create_from_payload(&payload, &store).await.unwrap();
    let Bound::Many(users) = bound else {
        panic!("expected a batch");
    };
    assert_eq!(users.len(), 2);
    assert!(store.has_row(
        "user",
        &[("first_name", json!("Johnnie")), ("last_name", json!("Doe"))]
    ));
    assert!(store.has_row(
        "user",
        &[("first_name", json!("Tommie")), ("last_name", json!("Moe"))]
    ));
}

#[tokio::test]
async fn ragged_columnar_batch_persists_nothing() {
    let store = MemStore::new();
    let payload = Payload::from_pairs([
        ("user.first_name", json!(["Johnnie", "Tommie"])),
        ("user.last_name", json!(["Doe"]))
    ]);

    let err = User::create_from_payload(&payload, &store).await.unwrap_err();
    assert!(matches!(
        err,
        BindError::Shape(ShapeError::RaggedColumns { .. })
    ));
    assert_eq!(store.count("user"), 0);
}

#[tokio::test]
async fn batch_validation_failure_persists_nothing() {
    let store = MemStore::new();
    let payload = Payload::from_pairs([
        ("user.first_name", json!(["Johnnie", ""])),
        ("user.last_name", json!(["Doe", "Moe"]))
    ]);

    let err = User::create_from_payload(&payload, &store).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(store.count("user"), 0);
}

#[tokio::test]
async fn nested_object_binds_one_record() {
    let store = MemStore::new();
    let payload = Payload::from_pairs([(
        "user",
        json!({"first_name": "Johnny", "last_name": "Doe"})
    )]);

    let bound = User::create_from_payload(&payload, &store).await.unwrap();
    assert_eq!(bound.len(), 1);
    assert!(store.has_row("user", &[("first_name", json!("Johnny"))]));
}

#[tokio::test]
async fn nested_array_binds_a_batch() {
    let store = MemStore::new();
    let payload = Payload::from_pairs([(
        "user",
        json!([
            {"first_name": "Johnny", "last_name": "Doe"},
            {"first_name": "Tommie", "last_name": "Moe"}
        ])
    )]);

    let bound = User::create_from_payload(&payload, &store).await.unwrap();
    assert_eq!(bound.len(), 2);
    assert_eq!(store.count("user"), 2);
}

#[tokio::test]
async fn non_fillable_keys_never_assign() {
    let store = MemStore::new();
    let forged = Uuid::now_v7();
    let payload = Payload::from_pairs([
        ("user.first_name", json!("Johnny")),
        ("user.id", json!(forged))
    ]);

    let user = User::create_from_payload(&payload, &store)
        .await
        .unwrap()
        .into_one()
        .unwrap();
    assert_ne!(user.id, forged);
}

#[tokio::test]
async fn belongs_to_payload_links_parent_before_save() {
    let store = MemStore::new();
    let payload = Payload::from_pairs([
        ("post.title", json!("Hello")),
        ("post.author", json!({"name": "Johnny"}))
    ]);

    let post = Post::create_from_payload(&payload, &store)
        .await
        .unwrap()
        .into_one()
        .unwrap();

    assert_eq!(store.count("author"), 1);
    let authors: Vec<Author> = record_core::RecordStore::list(&store).await.unwrap();
    assert_eq!(post.author_id, authors[0].id);
    assert!(store.has_row("post", &[("author_id", json!(authors[0].id))]));
}

#[tokio::test]
async fn has_one_and_has_many_payloads_link_children() {
    let store = MemStore::new();
    let payload = Payload::from_pairs([(
        "author",
        json!({
            "name": "Johnny",
            "profile": {"bio": "writes tests"},
            "posts": [{"title": "One"}, {"title": "Two"}]
        })
    )]);

    let author = Author::create_from_payload(&payload, &store)
        .await
        .unwrap()
        .into_one()
        .unwrap();

    assert_eq!(store.count("profile"), 1);
    assert_eq!(store.count("post"), 2);
    assert!(store.has_row("profile", &[("author_id", json!(author.id))]));
    let posts: Vec<Post> = record_core::RecordStore::list(&store).await.unwrap();
    assert!(posts.iter().all(|post| post.author_id == author.id));
}

#[tokio::test]
async fn relation_child_validation_aborts_child() {
    let store = MemStore::new();
    let payload = Payload::from_pairs([(
        "author",
        json!({"name": "Johnny", "posts": [{"title": ""}]})
    )]);

    let err = Author::create_from_payload(&payload, &store).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(store.count("post"), 0);
}

#[tokio::test]
async fn update_from_payload_selects_by_id() {
    let store = MemStore::new();
    let created = User::create_from_payload(
        &Payload::from_pairs([
            ("user.first_name", json!("Johnny")),
            ("user.last_name", json!("Doe"))
        ]),
        &store
    )
    .await
    .unwrap()
    .into_one()
    .unwrap();

    let payload = Payload::from_pairs([
        ("user.id", json!(created.id)),
        ("user.first_name", json!("Tommie"))
    ]);
    let updated = User::update_from_payload(&payload, &store)
        .await
        .unwrap()
        .into_one()
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.last_name, "Doe");
    assert_eq!(store.count("user"), 1);
    assert!(store.has_row("user", &[("first_name", json!("Tommie"))]));
}

#[tokio::test]
async fn update_without_id_is_a_shape_error() {
    let store = MemStore::new();
    let payload = Payload::from_pairs([("user.first_name", json!("Johnny"))]);

    let err = User::update_from_payload(&payload, &store).await.unwrap_err();
    assert!(matches!(err, BindError::Shape(ShapeError::MissingId { .. })));
}

#[tokio::test]
async fn update_with_unknown_id_misses() {
    let store = MemStore::new();
    let payload = Payload::from_pairs([
        ("user.id", json!(Uuid::now_v7())),
        ("user.first_name", json!("Johnny"))
    ]);

    let err = User::update_from_payload(&payload, &store).await.unwrap_err();
    assert!(matches!(err, BindError::NotFound { .. }));
}

#[tokio::test]
async fn update_upserts_has_many_children_by_id() {
    let store = MemStore::new();
    let author = Author::create_from_payload(
        &Payload::from_pairs([(
            "author",
            json!({"name": "Johnny", "posts": [{"title": "Old title"}]})
        )]),
        &store
    )
    .await
    .unwrap()
    .into_one()
    .unwrap();

    let posts: Vec<Post> = record_core::RecordStore::list(&store).await.unwrap();
    let existing = posts[0].id;

    let payload = Payload::from_pairs([(
        "author",
        json!({
            "id": author.id,
            "name": "Johnny",
            "posts": [
                {"id": existing, "title": "New title"},
                {"title": "Brand new"}
            ]
        })
    )]);
    Author::update_from_payload(&payload, &store).await.unwrap();

    assert_eq!(store.count("post"), 2);
    assert!(store.has_row("post", &[("title", json!("New title"))]));
    assert!(store.has_row("post", &[("title", json!("Brand new"))]));
    assert!(!store.has_row("post", &[("title", json!("Old title"))]));
}

#[tokio::test]
async fn batch_with_relations_is_rejected() {
    let store = MemStore::new();
    let payload = Payload::from_pairs([(
        "author",
        json!([
            {"name": "Johnny", "posts": [{"title": "Hello"}]},
            {"name": "Tommie"}
        ])
    )]);

    let err = Author::create_from_payload(&payload, &store).await.unwrap_err();
    assert!(matches!(
        err,
        BindError::Shape(ShapeError::RelationsInBatch { .. })
    ));
    assert_eq!(store.count("author"), 0);
}

#[tokio::test]
async fn save_from_payload_updates_existing_records() {
    let store = MemStore::new();
    let mut user = User::default();
    user.save_from_payload(
        &Payload::from_pairs([("user.first_name", json!("Johnny"))]),
        &store
    )
    .await
    .unwrap();

    user.save_from_payload(
        &Payload::from_pairs([("user.last_name", json!("Doe"))]),
        &store
    )
    .await
    .unwrap();

    assert_eq!(store.count("user"), 1);
    assert!(store.has_row(
        "user",
        &[("first_name", json!("Johnny")), ("last_name", json!("Doe"))]
    ));
}
