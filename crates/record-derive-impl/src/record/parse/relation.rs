// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Relation attribute parsing.
//!
//! Relations are declared in two places:
//!
//! - struct level: `#[has_one(Profile)]`, `#[has_many(Post)]`
//! - field level: `#[belongs_to(User)]` on the foreign-key field
//!
//! Each accepts optional overrides for the payload key and the foreign key:
//!
//! ```rust,ignore
//! #[has_many(Post, name = "articles", foreign_key = "writer_id")]
//! ```
//!
//! Defaults follow convention: the payload key is the related type's
//! snake_case name (pluralized with `s` for has-many), the foreign key is
//! `<owning entity>_id` on the related record; a belongs-to foreign key is
//! the annotated field itself.

use convert_case::{Case, Casing};
use syn::{Attribute, Ident, LitStr, Token, parse::ParseStream};

/// Declared cardinality, before convention resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKindDecl {
    /// `#[belongs_to(T)]` on a foreign-key field.
    BelongsTo,

    /// `#[has_one(T)]` on the struct.
    HasOne,

    /// `#[has_many(T)]` on the struct.
    HasMany
}

/// One relation as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationDecl {
    /// Related record type.
    pub related: Ident,

    /// Declared cardinality.
    pub kind: RelationKindDecl,

    /// Payload key override (`name = "..."`).
    pub name: Option<String>,

    /// Foreign key override (`foreign_key = "..."`).
    pub foreign_key: Option<String>
}

/// A relation with conventions applied, ready for code generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRelation {
    /// Related record type.
    pub related: Ident,

    /// Declared cardinality.
    pub kind: RelationKindDecl,

    /// Payload key this relation answers to.
    pub name: String,

    /// Linking field name.
    pub foreign_key: String
}

impl RelationDecl {
    /// Apply naming conventions given the owning record's entity name and,
    /// for belongs-to, the annotated field.
    pub fn resolve(&self, entity: &str, own_field: Option<&Ident>) -> ResolvedRelation {
        let related_snake = self.related.to_string().to_case(Case::Snake);
        let name = self.name.clone().unwrap_or_else(|| match self.kind {
            RelationKindDecl::HasMany => format!("{related_snake}s"),
            _ => related_snake.clone()
        });
        let foreign_key = self.foreign_key.clone().unwrap_or_else(|| match self.kind {
            RelationKindDecl::BelongsTo => own_field
                .map(ToString::to_string)
                .unwrap_or_else(|| format!("{related_snake}_id")),
            _ => format!("{entity}_id")
        });
        ResolvedRelation {
            related: self.related.clone(),
            kind: self.kind,
            name,
            foreign_key
        }
    }
}

/// Parse `#[has_one(T, ...)]` and `#[has_many(T, ...)]` attributes from
/// struct attributes.
pub fn parse_struct_relations(attrs: &[Attribute]) -> syn::Result<Vec<RelationDecl>> {
    let mut relations = Vec::new();

    for attr in attrs {
        let kind = if attr.path().is_ident("has_one") {
            RelationKindDecl::HasOne
        } else if attr.path().is_ident("has_many") {
            RelationKindDecl::HasMany
        } else {
            continue;
        };
        relations.push(parse_relation_attr(attr, kind)?);
    }
    Ok(relations)
}

/// Parse a `#[belongs_to(T, ...)]` attribute from a field's attributes.
pub fn parse_belongs_to(attrs: &[Attribute]) -> syn::Result<Option<RelationDecl>> {
    for attr in attrs {
        if attr.path().is_ident("belongs_to") {
            return parse_relation_attr(attr, RelationKindDecl::BelongsTo).map(Some);
        }
    }
    Ok(None)
}

/// Parse `(Related, name = "...", foreign_key = "...")` argument lists.
fn parse_relation_attr(attr: &Attribute, kind: RelationKindDecl) -> syn::Result<RelationDecl> {
    attr.parse_args_with(|input: ParseStream<'_>| {
        let related: Ident = input.parse()?;
        let mut name = None;
        let mut foreign_key = None;

        while input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            let key: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let value: LitStr = input.parse()?;
            if key == "name" {
                name = Some(value.value());
            } else if key == "foreign_key" {
                foreign_key = Some(value.value());
            } else {
                return Err(syn::Error::new(
                    key.span(),
                    "expected `name` or `foreign_key`"
                ));
            }
        }

        Ok(RelationDecl {
            related,
            kind,
            name,
            foreign_key
        })
    })
}
