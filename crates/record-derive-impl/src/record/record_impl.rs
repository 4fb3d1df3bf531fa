// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `Record` trait impl generation.
//!
//! Generates the metadata half of the derive: entity name, fillable
//! allow-list, rule constants, relation constants, and id access. All
//! constraint and relation data is emitted as `'static` constants, so the
//! "tagged variant resolved at declaration time" promise holds — nothing is
//! discovered at run time.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{RecordDef, RelationKindDecl, RuleKind, UuidVersion};

/// Generate the `Record` impl for the record.
pub fn generate(record: &RecordDef) -> TokenStream {
    let ident = record.name();
    let entity = &record.entity;
    let id_field = record.id_field();
    let id_ident = &id_field.ident;
    let id_ty = &id_field.ty;
    let id_name = id_field.name_str();

    let fillable: Vec<String> = record
        .fillable_fields()
        .iter()
        .map(|field| field.name_str())
        .collect();

    let rules = rules_fn(record);
    let relations = relations_fn(record);
    let ensure_id = ensure_id_fn(record);

    quote! {
        #[automatically_derived]
        impl ::record_core::Record for #ident {
            type Id = #id_ty;

            const ENTITY: &'static str = #entity;
            const ID_FIELD: &'static str = #id_name;

            fn fillable() -> &'static [&'static str] {
                &[#(#fillable),*]
            }

            #rules
            #relations

            fn id(&self) -> Self::Id {
                ::core::clone::Clone::clone(&self.#id_ident)
            }

            fn set_id(&mut self, id: Self::Id) {
                self.#id_ident = id;
            }

            #ensure_id
        }
    }
}

/// Generate the `rules` fn, or nothing when no field declares rules.
fn rules_fn(record: &RecordDef) -> TokenStream {
    let ruled = record.ruled_fields();
    if ruled.is_empty() {
        return TokenStream::new();
    }

    let entries: Vec<TokenStream> = ruled
        .iter()
        .map(|field| {
            let name = field.name_str();
            let specs: Vec<TokenStream> = field.rules.iter().map(rule_spec).collect();
            quote! {
                ::record_core::FieldRules {
                    field: #name,
                    rules: &[#(#specs),*]
                }
            }
        })
        .collect();

    quote! {
        fn rules() -> &'static [::record_core::FieldRules] {
            const RULES: &[::record_core::FieldRules] = &[#(#entries),*];
            RULES
        }
    }
}

/// Emit one `RuleSpec` constant.
fn rule_spec(rule: &super::parse::RuleDef) -> TokenStream {
    let kind = match &rule.kind {
        RuleKind::Required => quote! { ::record_core::Rule::Required },
        RuleKind::Length {
            min,
            max
        } => {
            let min = option_u64(*min);
            let max = option_u64(*max);
            quote! { ::record_core::Rule::Length { min: #min, max: #max } }
        }
        RuleKind::Range {
            min,
            max
        } => {
            let min = option_f64(*min);
            let max = option_f64(*max);
            quote! { ::record_core::Rule::Range { min: #min, max: #max } }
        }
        RuleKind::Email => quote! { ::record_core::Rule::Email },
        RuleKind::Url => quote! { ::record_core::Rule::Url },
        RuleKind::Pattern(pattern) => quote! { ::record_core::Rule::Pattern(#pattern) }
    };
    let message = match &rule.message {
        Some(message) => quote! { ::core::option::Option::Some(#message) },
        None => quote! { ::core::option::Option::None }
    };
    quote! {
        ::record_core::RuleSpec {
            rule: #kind,
            message: #message
        }
    }
}

/// Generate the `relations` fn, or nothing when none are declared.
fn relations_fn(record: &RecordDef) -> TokenStream {
    let relations = record.relations();
    if relations.is_empty() {
        return TokenStream::new();
    }

    let entries: Vec<TokenStream> = relations
        .iter()
        .map(|relation| {
            let name = &relation.name;
            let related = relation.related.to_string();
            let foreign_key = &relation.foreign_key;
            let kind = match relation.kind {
                RelationKindDecl::BelongsTo => {
                    quote! { ::record_core::RelationKind::BelongsTo }
                }
                RelationKindDecl::HasOne => quote! { ::record_core::RelationKind::HasOne },
                RelationKindDecl::HasMany => quote! { ::record_core::RelationKind::HasMany }
            };
            quote! {
                ::record_core::RelationDef {
                    name: #name,
                    kind: #kind,
                    related: #related,
                    foreign_key: #foreign_key
                }
            }
        })
        .collect();

    quote! {
        fn relations() -> &'static [::record_core::RelationDef] {
            const RELATIONS: &[::record_core::RelationDef] = &[#(#entries),*];
            RELATIONS
        }
    }
}

/// Generate `ensure_id` for UUID-typed ids; other id types keep the no-op
/// default and are assigned by the backend.
fn ensure_id_fn(record: &RecordDef) -> TokenStream {
    let id_field = record.id_field();
    if !is_uuid(&id_field.ty) {
        return TokenStream::new();
    }

    let id_ident = &id_field.ident;
    let fresh = match record.uuid {
        UuidVersion::V7 => quote! { ::record_core::uuid::Uuid::now_v7() },
        UuidVersion::V4 => quote! { ::record_core::uuid::Uuid::new_v4() }
    };

    quote! {
        fn ensure_id(&mut self) {
            if self.#id_ident.is_nil() {
                self.#id_ident = #fresh;
            }
        }
    }
}

/// Check whether a type path ends in `Uuid`.
fn is_uuid(ty: &syn::Type) -> bool {
    if let syn::Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
    {
        return segment.ident == "Uuid";
    }
    false
}

/// Emit an `Option<u64>` constant.
fn option_u64(value: Option<u64>) -> TokenStream {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(#value) },
        None => quote! { ::core::option::Option::None }
    }
}

/// Emit an `Option<f64>` constant.
fn option_f64(value: Option<f64>) -> TokenStream {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(#value) },
        None => quote! { ::core::option::Option::None }
    }
}
