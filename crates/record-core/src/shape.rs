// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Cardinality detection.
//!
//! Decides whether extracted input represents one record or many, using the
//! structure of the payload rather than a single overloaded heuristic:
//!
//! | Source | Structure | Shape |
//! |--------|-----------|-------|
//! | Nested | object | one record |
//! | Nested | array of objects | batch of N |
//! | Flat | all scalar values | one record |
//! | Flat | any array value | columnar batch |
//!
//! A columnar batch represents N records as parallel arrays, one per field
//! (`{"first_name": ["Johnny", "Tommie"], "last_name": ["Doe", "Moe"]}`).
//! Every column must be an array and all columns must agree on length;
//! anything else is a [`ShapeError`], raised before any record persists.
//!
//! Relation keys must be split out of flat input *before* detection (see
//! [`crate::relation::split`]), so an array-valued relation payload is never
//! mistaken for a columnar batch.

use serde_json::{Map, Value};

use crate::{error::ShapeError, extract::Extracted};

/// Detected cardinality of extracted input.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A single record's field map.
    One(Map<String, Value>),

    /// A batch of record field maps, in payload order.
    Many(Vec<Map<String, Value>>)
}

impl Shape {
    /// Number of records this shape holds.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(rows) => rows.len()
        }
    }

    /// Check whether the shape holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Detect the cardinality of extracted input.
///
/// # Errors
///
/// - [`ShapeError::NotAnObject`] — nested entry is a scalar
/// - [`ShapeError::ElementNotObject`] — nested batch element is a scalar
/// - [`ShapeError::MixedColumns`] — flat input mixes arrays and scalars
/// - [`ShapeError::RaggedColumns`] — flat columns disagree on length
pub fn detect(extracted: Extracted, entity: &str) -> Result<Shape, ShapeError> {
    match extracted {
        Extracted::Nested(Value::Object(map)) => Ok(Shape::One(map)),
        Extracted::Nested(Value::Array(items)) => {
            let mut rows = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match item {
                    Value::Object(map) => rows.push(map),
                    _ => {
                        return Err(ShapeError::ElementNotObject {
                            entity: entity.to_owned(),
                            index
                        });
                    }
                }
            }
            Ok(Shape::Many(rows))
        }
        Extracted::Nested(_) => Err(ShapeError::NotAnObject {
            entity: entity.to_owned()
        }),
        Extracted::Flat(map) => detect_flat(map)
    }
}

/// Detect the cardinality of a flat field map.
///
/// All-scalar maps are a single record; any array value switches the whole
/// map into columnar-batch interpretation.
fn detect_flat(map: Map<String, Value>) -> Result<Shape, ShapeError> {
    if map.values().any(Value::is_array) {
        return Ok(Shape::Many(zip_columns(map)?));
    }
    Ok(Shape::One(map))
}

/// Zip equal-length columns into per-record field maps.
fn zip_columns(map: Map<String, Value>) -> Result<Vec<Map<String, Value>>, ShapeError> {
    let mut expected = None;
    let mut columns = Vec::with_capacity(map.len());

    for (field, value) in map {
        let Value::Array(column) = value else {
            return Err(ShapeError::MixedColumns {
                field
            });
        };
        let length = expected.get_or_insert(column.len());
        if column.len() != *length {
            return Err(ShapeError::RaggedColumns {
                expected: *length,
                actual: column.len(),
                field
            });
        }
        columns.push((field, column));
    }

    let count = expected.unwrap_or(0);
    let mut rows = vec![Map::new(); count];
    for (field, column) in columns {
        for (row, value) in rows.iter_mut().zip(column) {
            row.insert(field.clone(), value);
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn flat(value: Value) -> Extracted {
        match value {
            Value::Object(map) => Extracted::Flat(map),
            _ => panic!("expected object")
        }
    }

    #[test]
    fn scalar_map_is_one() {
        let shape = detect(
            flat(json!({"first_name": "Johnny", "last_name": "Doe"})),
            "user"
        )
        .unwrap();
        assert_eq!(shape.len(), 1);
        assert!(matches!(shape, Shape::One(_)));
    }

    #[test]
    fn columnar_arrays_zip_into_rows() {
        let shape = detect(
            flat(json!({
                "first_name": ["Johnny", "Tommie"],
                "last_name": ["Doe", "Moe"]
            })),
            "user"
        )
        .unwrap();

        let Shape::Many(rows) = shape else {
            panic!("expected a batch");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("first_name"), Some(&json!("Johnny")));
        assert_eq!(rows[0].get("last_name"), Some(&json!("Doe")));
        assert_eq!(rows[1].get("first_name"), Some(&json!("Tommie")));
        assert_eq!(rows[1].get("last_name"), Some(&json!("Moe")));
    }

    #[test]
    fn ragged_columns_fail() {
        let err = detect(
            flat(json!({
                "first_name": ["Johnny", "Tommie"],
                "last_name": ["Doe"]
            })),
            "user"
        )
        .unwrap_err();

        assert!(matches!(err, ShapeError::RaggedColumns { .. }));
    }

    #[test]
    fn mixed_columns_fail() {
        let err = detect(
            flat(json!({"first_name": ["Johnny"], "last_name": "Doe"})),
            "user"
        )
        .unwrap_err();

        assert_eq!(
            err,
            ShapeError::MixedColumns {
                field: "last_name".to_owned()
            }
        );
    }

    #[test]
    fn nested_object_is_one_even_with_array_values() {
        let shape = detect(
            Extracted::Nested(json!({"first_name": "Johnny", "tags": ["a", "b"]})),
            "user"
        )
        .unwrap();
        assert!(matches!(shape, Shape::One(_)));
    }

    #[test]
    fn nested_array_is_many() {
        let shape = detect(
            Extracted::Nested(json!([
                {"first_name": "Johnny"},
                {"first_name": "Tommie"}
            ])),
            "user"
        )
        .unwrap();
        assert_eq!(shape.len(), 2);
    }

    #[test]
    fn nested_array_rejects_scalar_elements() {
        let err = detect(Extracted::Nested(json!([{"a": 1}, 2])), "user").unwrap_err();
        assert_eq!(
            err,
            ShapeError::ElementNotObject {
                entity: "user".to_owned(),
                index:  1
            }
        );
    }

    #[test]
    fn nested_scalar_rejected() {
        let err = detect(Extracted::Nested(json!("oops")), "user").unwrap_err();
        assert!(matches!(err, ShapeError::NotAnObject { .. }));
    }

    #[test]
    fn empty_columns_zip_to_empty_batch() {
        let shape = detect(flat(json!({"first_name": []})), "user").unwrap();
        assert_eq!(shape.len(), 0);
        assert!(shape.is_empty());
    }
}
