// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The bind → validate → persist pipeline.
//!
//! Every operation here takes an explicit [`Payload`] and an explicit store
//! reference; there is no ambient request state and no lifecycle hook
//! registration. The pipeline stages are fixed:
//!
//! 1. extract the entity's slice of the payload
//! 2. split declared relation keys away from plain attributes
//! 3. detect cardinality (one record or a batch)
//! 4. populate fillable attributes onto fresh or fetched records
//! 5. evaluate rules — every prospective record, before the first write
//! 6. persist, resolving belongs-to before and has-one/has-many after
//!
//! The front half (stages 1–5) lives in [`prepare_create`],
//! [`prepare_update`], and [`prepare_save`]; generated
//! [`BindFromPayload`] impls drive the persist half because only they know
//! the related record types behind each relation name.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{
    error::{AttributeError, BindError, ShapeError},
    extract::{self, Extracted},
    payload::Payload,
    record::{self, Record},
    relation,
    shape::{self, Shape},
    store::{RecordStore, Store},
    validate
};

/// Result of a bind operation: one record or a batch, made explicit.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound<R> {
    /// The payload held a single record.
    One(R),

    /// The payload held a batch, in payload order.
    Many(Vec<R>)
}

impl<R> Bound<R> {
    /// Number of records bound.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(records) => records.len()
        }
    }

    /// Check whether nothing was bound (an empty batch).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unwrap a single record, `None` for batches.
    #[must_use]
    pub fn into_one(self) -> Option<R> {
        match self {
            Self::One(record) => Some(record),
            Self::Many(_) => None
        }
    }

    /// Flatten into a vector regardless of cardinality.
    #[must_use]
    pub fn into_vec(self) -> Vec<R> {
        match self {
            Self::One(record) => vec![record],
            Self::Many(records) => records
        }
    }

    /// Reassemble a bound result from a cardinality flag and records.
    ///
    /// Used by generated code after the persist loop. A single-record flag
    /// with no records falls back to an empty batch rather than panicking;
    /// the prepare stage never produces that combination.
    #[must_use]
    pub fn from_parts(many: bool, mut records: Vec<R>) -> Self {
        if many {
            return Self::Many(records);
        }
        match records.pop() {
            Some(record) => Self::One(record),
            None => Self::Many(records)
        }
    }
}

/// One prospective record with its pending relation payloads.
#[derive(Debug)]
pub struct Prepared<R> {
    /// Populated, validated, not yet persisted record.
    pub record: R,

    /// Relation payloads keyed by declared relation name.
    pub relations: Map<String, Value>
}

/// Every prospective record of one bind operation.
#[derive(Debug)]
pub struct PreparedSet<R> {
    /// Records in payload order.
    pub records: Vec<Prepared<R>>,

    /// Whether the payload was a batch (controls the [`Bound`] variant).
    pub many: bool
}

/// Bind operations implemented per record type by `#[derive(Record)]`.
///
/// The generated impl bounds `S` with a [`RecordStore`] for the record type
/// itself and for every related type, which is what lets relation arms stay
/// fully typed without any runtime type inspection.
#[async_trait]
pub trait BindFromPayload<S>: Record
where
    S: Store + RecordStore<Self>
{
    /// Bind, validate, and insert records from a payload.
    async fn create_from_payload(
        payload: &Payload,
        store: &S
    ) -> Result<Bound<Self>, BindError<S::Error>>;

    /// Bind a payload onto existing rows selected by id and update them.
    async fn update_from_payload(
        payload: &Payload,
        store: &S
    ) -> Result<Bound<Self>, BindError<S::Error>>;

    /// Populate this instance from a single-record payload and save it.
    async fn save_from_payload(
        &mut self,
        payload: &Payload,
        store: &S
    ) -> Result<(), BindError<S::Error>>;

    /// Bind an already-extracted attribute map and insert one record.
    ///
    /// The explicit-attributes path: no extraction, no relations, fillable
    /// filtering and validation as usual.
    async fn create_from_attrs(
        attrs: Map<String, Value>,
        store: &S
    ) -> Result<Self, BindError<S::Error>> {
        let mut record = Self::default();
        record::populate(&mut record, &attrs)?;
        insert_record(&mut record, store).await?;
        Ok(record)
    }
}

/// Run the create front half: extract, split, shape, populate, validate.
///
/// Validates every prospective record before returning, so a failing batch
/// member aborts the whole operation with nothing written.
///
/// # Errors
///
/// Shape errors for malformed payloads, attribute errors for type
/// mismatches, the first record's [`ValidationFailure`](crate::ValidationFailure)
/// when rules reject.
pub fn prepare_create<R: Record, E>(payload: &Payload) -> Result<PreparedSet<R>, BindError<E>> {
    let (extracted, outer_relations) = split_flat::<R>(extract::for_entity(payload, R::ENTITY));

    match shape::detect(extracted, R::ENTITY)? {
        Shape::One(map) => {
            let (attrs, mut relations) = relation::split::<R>(map);
            for (key, value) in outer_relations {
                relations.insert(key, value);
            }
            let mut record = R::default();
            record::populate(&mut record, &attrs)?;
            validate::check(R::rules(), &record.attributes())?;
            tracing::debug!(entity = R::ENTITY, relations = relations.len(), "prepared one record");
            Ok(PreparedSet {
                records: vec![Prepared {
                    record,
                    relations
                }],
                many: false
            })
        }
        Shape::Many(rows) => {
            if !outer_relations.is_empty() {
                return Err(ShapeError::RelationsInBatch {
                    entity: R::ENTITY.to_owned()
                }
                .into());
            }
            let mut records = Vec::with_capacity(rows.len());
            for row in rows {
                let (attrs, relations) = relation::split::<R>(row);
                if !relations.is_empty() {
                    return Err(ShapeError::RelationsInBatch {
                        entity: R::ENTITY.to_owned()
                    }
                    .into());
                }
                let mut record = R::default();
                record::populate(&mut record, &attrs)?;
                records.push(Prepared {
                    record,
                    relations
                });
            }
            for prepared in &records {
                validate::check(R::rules(), &prepared.record.attributes())?;
            }
            tracing::debug!(entity = R::ENTITY, count = records.len(), "prepared batch");
            Ok(PreparedSet {
                records,
                many: true
            })
        }
    }
}

/// Run the update front half: like [`prepare_create`], but rows are fetched
/// by the id each payload row must carry, then populated on top of their
/// persisted attributes.
///
/// # Errors
///
/// Additionally [`ShapeError::MissingId`] when a row carries no id and
/// [`BindError::NotFound`] when the id misses.
pub async fn prepare_update<R, S>(
    payload: &Payload,
    store: &S
) -> Result<PreparedSet<R>, BindError<S::Error>>
where
    R: Record,
    S: RecordStore<R>
{
    let (extracted, outer_relations) = split_flat::<R>(extract::for_entity(payload, R::ENTITY));

    let (rows, many, relation_sets) = match shape::detect(extracted, R::ENTITY)? {
        Shape::One(map) => {
            let (attrs, mut relations) = relation::split::<R>(map);
            for (key, value) in outer_relations {
                relations.insert(key, value);
            }
            (vec![attrs], false, vec![relations])
        }
        Shape::Many(rows) => {
            if !outer_relations.is_empty() {
                return Err(ShapeError::RelationsInBatch {
                    entity: R::ENTITY.to_owned()
                }
                .into());
            }
            let mut attr_rows = Vec::with_capacity(rows.len());
            for row in rows {
                let (attrs, relations) = relation::split::<R>(row);
                if !relations.is_empty() {
                    return Err(ShapeError::RelationsInBatch {
                        entity: R::ENTITY.to_owned()
                    }
                    .into());
                }
                attr_rows.push(attrs);
            }
            let sets = vec![Map::new(); attr_rows.len()];
            (attr_rows, true, sets)
        }
    };

    let mut records = Vec::with_capacity(rows.len());
    for (attrs, relations) in rows.into_iter().zip(relation_sets) {
        let id = id_from_attrs::<R, S::Error>(&attrs)?;
        let mut record = store
            .find_by_id(&id)
            .await
            .map_err(BindError::Store)?
            .ok_or_else(|| BindError::NotFound {
                entity: R::ENTITY,
                id:     display_id(&id)
            })?;
        record::populate(&mut record, &attrs)?;
        records.push(Prepared {
            record,
            relations
        });
    }
    for prepared in &records {
        validate::check(R::rules(), &prepared.record.attributes())?;
    }
    tracing::debug!(entity = R::ENTITY, count = records.len(), "prepared update");
    Ok(PreparedSet {
        records,
        many
    })
}

/// Run the save front half for one existing instance: extract a
/// single-record payload and populate it on top of the instance's current
/// attributes. Returns the pending relation payloads.
///
/// Validation is deliberately left to [`save_record`], which runs on every
/// persistence attempt.
///
/// # Errors
///
/// [`ShapeError::ExpectedOne`] when the payload holds a batch.
pub fn prepare_save<R: Record, E>(
    record: &mut R,
    payload: &Payload
) -> Result<Map<String, Value>, BindError<E>> {
    let (extracted, outer_relations) = split_flat::<R>(extract::for_entity(payload, R::ENTITY));

    match shape::detect(extracted, R::ENTITY)? {
        Shape::One(map) => {
            let (attrs, mut relations) = relation::split::<R>(map);
            for (key, value) in outer_relations {
                relations.insert(key, value);
            }
            record::populate(record, &attrs)?;
            Ok(relations)
        }
        Shape::Many(_) => Err(ShapeError::ExpectedOne {
            entity: R::ENTITY.to_owned()
        }
        .into())
    }
}

/// Validate and insert a record.
///
/// Rules run against the record's current attributes on every persistence
/// attempt, whether it was populated from a payload or mutated directly.
///
/// # Errors
///
/// [`ValidationFailure`](crate::ValidationFailure) aborts before the store
/// sees the record; store errors propagate unchanged.
pub async fn insert_record<R, S>(record: &mut R, store: &S) -> Result<(), BindError<S::Error>>
where
    R: Record,
    S: RecordStore<R>
{
    validate::check(R::rules(), &record.attributes())?;
    record.ensure_id();
    store.insert(record).await.map_err(BindError::Store)
}

/// Validate and update a record in place.
///
/// # Errors
///
/// As [`insert_record`].
pub async fn update_record<R, S>(record: &R, store: &S) -> Result<(), BindError<S::Error>>
where
    R: Record,
    S: RecordStore<R>
{
    validate::check(R::rules(), &record.attributes())?;
    store.update(record).await.map_err(BindError::Store)
}

/// Validate, then insert or update depending on whether the row exists.
///
/// The explicit replacement for a before-save lifecycle hook: callers that
/// mutate records directly save through here and always get validated.
///
/// # Errors
///
/// As [`insert_record`].
pub async fn save_record<R, S>(record: &mut R, store: &S) -> Result<(), BindError<S::Error>>
where
    R: Record,
    S: RecordStore<R>
{
    validate::check(R::rules(), &record.attributes())?;
    if record.is_new() {
        record.ensure_id();
        return store.insert(record).await.map_err(BindError::Store);
    }
    let id = record.id();
    match store.find_by_id(&id).await.map_err(BindError::Store)? {
        Some(_) => store.update(record).await.map_err(BindError::Store),
        None => store.insert(record).await.map_err(BindError::Store)
    }
}

/// Create one related record from a relation payload element.
///
/// Populates fillable attributes (one level deep: the element's own
/// relation keys are dropped), writes the foreign key when given, validates,
/// inserts.
///
/// # Errors
///
/// [`ShapeError::RelationNotObject`] when the element is not an object,
/// otherwise as [`insert_record`].
pub async fn create_child<C, S>(
    relation: &str,
    value: &Value,
    foreign_key: Option<(&str, &Value)>,
    store: &S
) -> Result<C, BindError<S::Error>>
where
    C: Record,
    S: RecordStore<C>
{
    let map = value
        .as_object()
        .ok_or_else(|| ShapeError::RelationNotObject {
            relation: relation.to_owned()
        })?;
    let (attrs, _) = relation::split::<C>(map.clone());

    let mut child = C::default();
    record::populate(&mut child, &attrs)?;
    if let Some((field, fk)) = foreign_key {
        child.set_attribute(field, fk)?;
    }
    insert_record(&mut child, store).await?;
    Ok(child)
}

/// Create every related record of a has-many relation payload.
///
/// # Errors
///
/// [`ShapeError::RelationNotArray`] when the payload is not an array,
/// otherwise as [`create_child`].
pub async fn create_children<C, S>(
    relation: &str,
    value: &Value,
    foreign_key: (&str, &Value),
    store: &S
) -> Result<Vec<C>, BindError<S::Error>>
where
    C: Record,
    S: RecordStore<C>
{
    let items = value.as_array().ok_or_else(|| ShapeError::RelationNotArray {
        relation: relation.to_owned()
    })?;

    let mut children = Vec::with_capacity(items.len());
    for item in items {
        children.push(create_child(relation, item, Some(foreign_key), store).await?);
    }
    Ok(children)
}

/// Create or update one related record, selecting by the id the element
/// carries.
///
/// Update mode's relation semantics: an element with an id updates the
/// existing row, an element without one inserts a new row.
///
/// # Errors
///
/// As [`create_child`], plus [`BindError::NotFound`] for a present id that
/// misses.
pub async fn upsert_child<C, S>(
    relation: &str,
    value: &Value,
    foreign_key: Option<(&str, &Value)>,
    store: &S
) -> Result<C, BindError<S::Error>>
where
    C: Record,
    S: RecordStore<C>
{
    let map = value
        .as_object()
        .ok_or_else(|| ShapeError::RelationNotObject {
            relation: relation.to_owned()
        })?;

    let Some(id_value) = map.get(C::ID_FIELD).filter(|candidate| !candidate.is_null()) else {
        return create_child(relation, value, foreign_key, store).await;
    };

    let id: C::Id =
        serde_json::from_value(id_value.clone()).map_err(|source| AttributeError {
            field: C::ID_FIELD.to_owned(),
            source
        })?;
    let mut child = store
        .find_by_id(&id)
        .await
        .map_err(BindError::Store)?
        .ok_or_else(|| BindError::NotFound {
            entity: C::ENTITY,
            id:     display_id(&id)
        })?;

    let (attrs, _) = relation::split::<C>(map.clone());
    record::populate(&mut child, &attrs)?;
    if let Some((field, fk)) = foreign_key {
        child.set_attribute(field, fk)?;
    }
    update_record(&child, store).await?;
    Ok(child)
}

/// Create or update every related record of a has-many relation payload.
///
/// # Errors
///
/// As [`upsert_child`].
pub async fn upsert_children<C, S>(
    relation: &str,
    value: &Value,
    foreign_key: (&str, &Value),
    store: &S
) -> Result<Vec<C>, BindError<S::Error>>
where
    C: Record,
    S: RecordStore<C>
{
    let items = value.as_array().ok_or_else(|| ShapeError::RelationNotArray {
        relation: relation.to_owned()
    })?;

    let mut children = Vec::with_capacity(items.len());
    for item in items {
        children.push(upsert_child(relation, item, Some(foreign_key), store).await?);
    }
    Ok(children)
}

/// Strip declared relation keys from flat input before shape detection.
fn split_flat<R: Record>(extracted: Extracted) -> (Extracted, Map<String, Value>) {
    match extracted {
        Extracted::Flat(map) => {
            let (attrs, relations) = relation::split::<R>(map);
            (Extracted::Flat(attrs), relations)
        }
        nested => (nested, Map::new())
    }
}

/// Read and decode the id an update payload row must carry.
fn id_from_attrs<R: Record, E>(attrs: &Map<String, Value>) -> Result<R::Id, BindError<E>> {
    let value = attrs
        .get(R::ID_FIELD)
        .filter(|candidate| !candidate.is_null())
        .ok_or_else(|| ShapeError::MissingId {
            entity: R::ENTITY.to_owned()
        })?;
    serde_json::from_value(value.clone()).map_err(|source| {
        AttributeError {
            field: R::ID_FIELD.to_owned(),
            source
        }
        .into()
    })
}

/// Display form of an id for diagnostics.
fn display_id<I: serde::Serialize>(id: &I) -> String {
    serde_json::to_value(id)
        .map(|value| value.to_string())
        .unwrap_or_else(|_| "<unprintable>".to_owned())
}
