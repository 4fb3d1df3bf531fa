// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Record-level attribute parsing.
//!
//! This module handles parsing of record-level attributes using darling,
//! and provides the main [`RecordDef`] structure used by both code
//! generators.

use convert_case::{Case, Casing};
use darling::FromDeriveInput;
use syn::{DeriveInput, Ident};

use super::{
    field::FieldDef,
    relation::{self, RelationDecl, RelationKindDecl, ResolvedRelation},
    uuid_version::UuidVersion
};

/// Record-level attributes parsed from `#[record(...)]`.
///
/// This is an internal struct used by darling for parsing. The public API
/// uses [`RecordDef`], which combines these attributes with parsed field
/// definitions and relations.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(record), supports(struct_named))]
struct RecordAttrs {
    /// Struct identifier (e.g., `User`).
    ident: Ident,

    /// Payload-facing entity name.
    ///
    /// Defaults to the snake_case struct name.
    #[darling(default)]
    entity: Option<String>,

    /// UUID version for id generation.
    ///
    /// Defaults to [`UuidVersion::V7`].
    #[darling(default)]
    uuid: UuidVersion
}

/// Complete parsed record definition.
///
/// This is the main data structure passed to both code generators.
#[derive(Debug)]
pub struct RecordDef {
    /// Struct identifier (e.g., `User`).
    pub ident: Ident,

    /// Payload-facing entity name (e.g., `"user"`).
    pub entity: String,

    /// UUID version for id generation.
    pub uuid: UuidVersion,

    /// All field definitions from the struct.
    pub fields: Vec<FieldDef>,

    /// Struct-level relation declarations (has-one / has-many).
    pub struct_relations: Vec<RelationDecl>
}

impl RecordDef {
    /// Parse a record definition from syn's `DeriveInput`.
    ///
    /// # Errors
    ///
    /// - Applied to a non-struct or a tuple struct
    /// - Missing or duplicate `#[id]` field
    /// - Malformed relation or rule attributes
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        // Shape checks come first so their diagnostics stay ours, not
        // darling's.
        let fields = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => named
                    .named
                    .iter()
                    .map(|field| FieldDef::from_field(field).map_err(darling::Error::from))
                    .collect::<darling::Result<Vec<_>>>()?,
                _ => {
                    return Err(darling::Error::custom("Record requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(
                    darling::Error::custom("Record can only be derived for structs")
                        .with_span(&input.ident)
                );
            }
        };

        let attrs = RecordAttrs::from_derive_input(input)?;

        let id_fields = fields.iter().filter(|f| f.is_id).count();
        if id_fields == 0 {
            return Err(
                darling::Error::custom("Record requires a field marked with #[id]")
                    .with_span(&input.ident)
            );
        }
        if id_fields > 1 {
            return Err(
                darling::Error::custom("Record allows only one #[id] field")
                    .with_span(&input.ident)
            );
        }

        let struct_relations =
            relation::parse_struct_relations(&input.attrs).map_err(darling::Error::from)?;

        let entity = attrs
            .entity
            .unwrap_or_else(|| attrs.ident.to_string().to_case(Case::Snake));

        Ok(Self {
            ident: attrs.ident,
            entity,
            uuid: attrs.uuid,
            fields,
            struct_relations
        })
    }

    /// Get the record name as an identifier.
    pub fn name(&self) -> &Ident {
        &self.ident
    }

    /// Get the primary key field.
    ///
    /// Existence is validated in [`from_derive_input`](Self::from_derive_input).
    pub fn id_field(&self) -> &FieldDef {
        self.fields
            .iter()
            .find(|f| f.is_id)
            .expect("validated in from_derive_input")
    }

    /// Fields payloads may mass-assign, in declaration order.
    pub fn fillable_fields(&self) -> Vec<&FieldDef> {
        self.fields.iter().filter(|f| f.in_fillable()).collect()
    }

    /// Fields carrying at least one `#[rule(...)]`.
    pub fn ruled_fields(&self) -> Vec<&FieldDef> {
        self.fields.iter().filter(|f| !f.rules.is_empty()).collect()
    }

    /// All relations with conventions applied: field-level belongs-to
    /// first, then struct-level declarations, in declaration order.
    pub fn relations(&self) -> Vec<ResolvedRelation> {
        let mut resolved = Vec::new();
        for field in &self.fields {
            if let Some(decl) = &field.belongs_to {
                resolved.push(decl.resolve(&self.entity, Some(&field.ident)));
            }
        }
        for decl in &self.struct_relations {
            resolved.push(decl.resolve(&self.entity, None));
        }
        resolved
    }

    /// Related type idents for store bounds, deduplicated, self excluded.
    pub fn related_types(&self) -> Vec<Ident> {
        let mut seen = Vec::new();
        for relation in self.relations() {
            if relation.related == self.ident {
                continue;
            }
            if seen.iter().any(|known: &Ident| *known == relation.related) {
                continue;
            }
            seen.push(relation.related);
        }
        seen
    }

    /// Relations of one kind, in declaration order.
    pub fn relations_of(&self, kind: RelationKindDecl) -> Vec<ResolvedRelation> {
        self.relations()
            .into_iter()
            .filter(|relation| relation.kind == kind)
            .collect()
    }
}
