// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for bind operations.
//!
//! Two error kinds matter to callers:
//!
//! - [`ValidationFailure`] — expected, field-scoped, carries the complete
//!   field → messages map. Surfaces to HTTP layers as a 4xx-style error.
//! - [`ShapeError`] — an input-contract violation (ragged columnar arrays,
//!   non-object batch elements, a missing id in update mode). Not
//!   user-correctable; raised before anything persists.
//!
//! Both fold into [`BindError`], which additionally plumbs attribute decode
//! failures and backend errors. Store errors propagate unchanged; there are
//! no retries anywhere.

use std::{collections::BTreeMap, fmt};

/// Field-scoped validation failure.
///
/// Accumulates every failing rule across every field before surfacing, so a
/// caller always sees the full picture, never partial state.
///
/// # Example
///
/// ```rust
/// use record_core::ValidationFailure;
///
/// let mut failure = ValidationFailure::new();
/// failure.add("first_name", "first_name is required");
/// assert!(failure.has("first_name"));
/// assert_eq!(failure.messages("first_name"), ["first_name is required"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationFailure {
    errors: BTreeMap<String, Vec<String>>
}

impl ValidationFailure {
    /// Create an empty failure set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure message for a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Check whether a field has any failure.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Failure messages recorded for a field.
    #[must_use]
    pub fn messages(&self, field: &str) -> &[String] {
        self.errors.get(field).map_or(&[], Vec::as_slice)
    }

    /// Iterate over failing fields in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(
            f,
            "validation failed for {} field(s): {}",
            fields.len(),
            fields.join(", ")
        )
    }
}

impl std::error::Error for ValidationFailure {}

/// Input-contract violation in a payload's structure.
///
/// These are programmer or client-contract errors, not something the end
/// user can correct by retyping a value; every variant is raised before any
/// record persists.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// The nested entry for the entity is neither an object nor an array.
    NotAnObject {
        /// Entity name the payload was extracted for.
        entity: String
    },

    /// A nested batch element is not an object.
    ElementNotObject {
        /// Entity name the payload was extracted for.
        entity: String,
        /// Zero-based index of the offending element.
        index: usize
    },

    /// A columnar batch mixes array and scalar values.
    MixedColumns {
        /// The scalar-valued field.
        field: String
    },

    /// Columnar batch arrays disagree on length.
    RaggedColumns {
        /// The field whose column has the wrong length.
        field: String,
        /// Length of the first column.
        expected: usize,
        /// Length of the offending column.
        actual: usize
    },

    /// A batch payload carries relation keys.
    RelationsInBatch {
        /// Entity name the payload was extracted for.
        entity: String
    },

    /// A belongs-to or has-one relation payload is not an object.
    RelationNotObject {
        /// Relation name as declared.
        relation: String
    },

    /// A has-many relation payload is not an array.
    RelationNotArray {
        /// Relation name as declared.
        relation: String
    },

    /// An update payload row is missing the id field.
    MissingId {
        /// Entity name the payload was extracted for.
        entity: String
    },

    /// A single-record operation received a batch payload.
    ExpectedOne {
        /// Entity name the payload was extracted for.
        entity: String
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject {
                entity
            } => write!(f, "payload for `{entity}` is neither an object nor an array"),
            Self::ElementNotObject {
                entity,
                index
            } => write!(f, "batch element {index} for `{entity}` is not an object"),
            Self::MixedColumns {
                field
            } => write!(f, "columnar batch mixes arrays and scalars at `{field}`"),
            Self::RaggedColumns {
                field,
                expected,
                actual
            } => write!(
                f,
                "columnar batch is ragged: `{field}` has {actual} values, expected {expected}"
            ),
            Self::RelationsInBatch {
                entity
            } => write!(f, "batch payload for `{entity}` carries relation keys"),
            Self::RelationNotObject {
                relation
            } => write!(f, "relation `{relation}` payload is not an object"),
            Self::RelationNotArray {
                relation
            } => write!(f, "relation `{relation}` payload is not an array"),
            Self::MissingId {
                entity
            } => write!(f, "update payload for `{entity}` is missing an id"),
            Self::ExpectedOne {
                entity
            } => write!(f, "payload for `{entity}` holds a batch, expected one record")
        }
    }
}

impl std::error::Error for ShapeError {}

/// An extracted value did not deserialize into the record's field type.
#[derive(Debug)]
pub struct AttributeError {
    /// Field the value was written to.
    pub field: String,
    /// Underlying deserialization error.
    pub source: serde_json::Error
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot decode attribute `{}`: {}", self.field, self.source)
    }
}

impl std::error::Error for AttributeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Error type for bind operations over a store with error type `E`.
#[derive(Debug)]
pub enum BindError<E> {
    /// Declared rules rejected the populated attributes.
    Validation(ValidationFailure),

    /// The payload's structure violates the input contract.
    Shape(ShapeError),

    /// An extracted value did not fit the record's field type.
    Attribute(AttributeError),

    /// An update payload referenced a row that does not exist.
    NotFound {
        /// Entity name of the missing record.
        entity: &'static str,
        /// Display form of the id that missed.
        id: String
    },

    /// The backing store failed; propagated unchanged.
    Store(E)
}

impl<E> BindError<E> {
    /// Check if this is a validation failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a payload shape error.
    #[must_use]
    pub const fn is_shape(&self) -> bool {
        matches!(self, Self::Shape(_))
    }

    /// Borrow the validation failure, if that is what this error is.
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Validation(failure) => Some(failure),
            _ => None
        }
    }
}

impl<E: fmt::Display> fmt::Display for BindError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(failure) => write!(f, "{failure}"),
            Self::Shape(shape) => write!(f, "{shape}"),
            Self::Attribute(attribute) => write!(f, "{attribute}"),
            Self::NotFound {
                entity,
                id
            } => write!(f, "no `{entity}` record with id {id}"),
            Self::Store(store) => write!(f, "store error: {store}")
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for BindError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(failure) => Some(failure),
            Self::Shape(shape) => Some(shape),
            Self::Attribute(attribute) => Some(attribute),
            Self::NotFound {
                ..
            } => None,
            Self::Store(store) => Some(store)
        }
    }
}

impl<E> From<ValidationFailure> for BindError<E> {
    fn from(failure: ValidationFailure) -> Self {
        Self::Validation(failure)
    }
}

impl<E> From<ShapeError> for BindError<E> {
    fn from(shape: ShapeError) -> Self {
        Self::Shape(shape)
    }
}

impl<E> From<AttributeError> for BindError<E> {
    fn from(attribute: AttributeError) -> Self {
        Self::Attribute(attribute)
    }
}
