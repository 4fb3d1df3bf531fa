// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! This module handles parsing of field attributes like `#[id]`, `#[auto]`,
//! `#[field(fillable)]`, `#[rule(...)]`, and `#[belongs_to(...)]`.
//!
//! # Attribute Flags
//!
//! | Field | Attribute | Effect |
//! |-------|-----------|--------|
//! | `is_id` | `#[id]` | Primary key; never fillable |
//! | `is_auto` | `#[auto]` | Backend-assigned; never fillable |
//! | `fillable` | `#[field(fillable)]` | Mass-assignable from payloads |
//! | `belongs_to` | `#[belongs_to(T)]` | Foreign-key relation |
//! | `rules` | `#[rule(...)]` | Validation constraints |

use syn::{Attribute, Field, Ident, Meta, Type};

use super::{
    relation::{self, RelationDecl},
    rule::{self, RuleDef}
};

/// Field definition with all parsed attributes.
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier (e.g., `id`, `first_name`).
    pub ident: Ident,

    /// Field type (e.g., `Uuid`, `Option<String>`).
    pub ty: Type,

    /// Whether this is the primary key field (`#[id]`).
    pub is_id: bool,

    /// Whether this field is backend-assigned (`#[auto]`).
    ///
    /// Auto fields are excluded from the fillable allow-list even when
    /// marked fillable.
    pub is_auto: bool,

    /// Whether payloads may mass-assign this field (`#[field(fillable)]`).
    pub fillable: bool,

    /// Belongs-to relation declared on this foreign-key field.
    pub belongs_to: Option<RelationDecl>,

    /// Validation rules in declaration order.
    pub rules: Vec<RuleDef>
}

impl FieldDef {
    /// Parse field definition from syn's `Field`.
    ///
    /// # Errors
    ///
    /// Malformed `#[belongs_to(...)]` argument lists.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "named field required"))?;
        let ty = field.ty.clone();

        let mut is_id = false;
        let mut is_auto = false;
        let mut fillable = false;

        for attr in &field.attrs {
            if attr.path().is_ident("id") {
                is_id = true;
            } else if attr.path().is_ident("auto") {
                is_auto = true;
            } else if attr.path().is_ident("field") {
                parse_field_attr(attr, &mut fillable);
            }
        }

        let belongs_to = relation::parse_belongs_to(&field.attrs)?;
        let rules = rule::parse_rule_attrs(&field.attrs);

        Ok(Self {
            ident,
            ty,
            is_id,
            is_auto,
            fillable,
            belongs_to,
            rules
        })
    }

    /// Get the field name as a string.
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Check whether payloads may write this field.
    ///
    /// Fillable, except for primary keys and auto fields.
    pub fn in_fillable(&self) -> bool {
        self.fillable && !self.is_id && !self.is_auto
    }
}

/// Parse `#[field(fillable)]` attribute flags.
///
/// Unknown identifiers are silently ignored for forward compatibility.
fn parse_field_attr(attr: &Attribute, fillable: &mut bool) {
    if let Meta::List(meta_list) = &attr.meta {
        let _ = meta_list.parse_nested_meta(|meta| {
            if meta.path.is_ident("fillable") {
                *fillable = true;
            }
            Ok(())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_field(input: &str) -> FieldDef {
        let item: syn::ItemStruct = syn::parse_str(input).unwrap();
        FieldDef::from_field(item.fields.iter().next().unwrap()).unwrap()
    }

    #[test]
    fn plain_field_has_no_flags() {
        let field = first_field("struct Foo { name: String }");
        assert!(!field.is_id);
        assert!(!field.is_auto);
        assert!(!field.fillable);
        assert!(field.belongs_to.is_none());
        assert!(field.rules.is_empty());
    }

    #[test]
    fn id_field() {
        let field = first_field(
            r#"
            struct Foo {
                #[id]
                id: u64,
            }
        "#
        );
        assert!(field.is_id);
        assert!(!field.in_fillable());
    }

    #[test]
    fn fillable_field() {
        let field = first_field(
            r#"
            struct Foo {
                #[field(fillable)]
                name: String,
            }
        "#
        );
        assert!(field.fillable);
        assert!(field.in_fillable());
    }

    #[test]
    fn auto_overrides_fillable() {
        let field = first_field(
            r#"
            struct Foo {
                #[field(fillable)]
                #[auto]
                created_at: String,
            }
        "#
        );
        assert!(field.fillable);
        assert!(!field.in_fillable());
    }

    #[test]
    fn belongs_to_and_rules_are_collected() {
        let field = first_field(
            r#"
            struct Post {
                #[belongs_to(User)]
                #[rule(required)]
                user_id: u64,
            }
        "#
        );
        assert!(field.belongs_to.is_some());
        assert_eq!(field.rules.len(), 1);
    }
}
