// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `BindFromPayload` impl generation.
//!
//! Generates the operational half of the derive: the async bind operations
//! with fully typed relation arms. The impl is generic over the store and
//! bounds it with `RecordStore<T>` for the record itself and every related
//! type, so each relation name dispatches to a statically known record type
//! — no runtime type inspection anywhere.
//!
//! # Generated Code
//!
//! For a `User` with `#[has_many(Post)]`, generates:
//!
//! ```rust,ignore
//! #[::record_core::async_trait]
//! impl<S> ::record_core::BindFromPayload<S> for User
//! where
//!     S: ::record_core::Store
//!         + ::record_core::RecordStore<User>
//!         + ::record_core::RecordStore<Post>
//! {
//!     async fn create_from_payload(payload, store) -> Result<Bound<User>, _> {
//!         let set = prepare_create::<User, _>(payload)?;
//!         for mut item in set.records {
//!             // belongs-to arms would resolve here
//!             insert_record(&mut item.record, store).await?;
//!             if let Some(value) = item.relations.remove("posts") {
//!                 create_children::<Post, S>("posts", &value, ("user_id", &fk), store).await?;
//!             }
//!         }
//!         // ...
//!     }
//!     // update_from_payload / save_from_payload analogous
//! }
//! ```
//!
//! Ordering follows relation semantics: belongs-to resolves before the
//! record persists (the foreign key lives on the record itself), has-one
//! and has-many resolve after (their foreign keys point back at it).

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{RecordDef, RelationKindDecl, ResolvedRelation};

/// Generate the `BindFromPayload` impl for the record.
pub fn generate(record: &RecordDef) -> TokenStream {
    let ident = record.name();
    let related_types = record.related_types();
    let has_any_relations = !record.relations().is_empty();

    // The create loop always needs `mut item` (insert takes &mut); the
    // update loop only does when relation arms mutate it.
    let update_item_pat = if has_any_relations {
        quote! { mut item }
    } else {
        quote! { item }
    };

    let create_belongs: Vec<TokenStream> = record
        .relations_of(RelationKindDecl::BelongsTo)
        .iter()
        .map(|relation| belongs_to_arm(relation, &quote! { item.record }, &quote! { item.relations }, false))
        .collect();
    let create_has: Vec<TokenStream> = has_relations(record)
        .iter()
        .map(|relation| has_arm(relation, &quote! { item.record }, &quote! { item.relations }, false))
        .collect();

    let update_belongs: Vec<TokenStream> = record
        .relations_of(RelationKindDecl::BelongsTo)
        .iter()
        .map(|relation| belongs_to_arm(relation, &quote! { item.record }, &quote! { item.relations }, true))
        .collect();
    let update_has: Vec<TokenStream> = has_relations(record)
        .iter()
        .map(|relation| has_arm(relation, &quote! { item.record }, &quote! { item.relations }, true))
        .collect();

    let save_belongs: Vec<TokenStream> = record
        .relations_of(RelationKindDecl::BelongsTo)
        .iter()
        .map(|relation| belongs_to_arm(relation, &quote! { (*self) }, &quote! { relations }, true))
        .collect();
    let save_has: Vec<TokenStream> = has_relations(record)
        .iter()
        .map(|relation| has_arm(relation, &quote! { (*self) }, &quote! { relations }, true))
        .collect();

    // Without relations the pending-relations map would be an unused
    // binding; the prepare call still has to run to populate the record.
    let save_prepare = if has_any_relations {
        quote! {
            let mut relations = ::record_core::bind::prepare_save::<
                Self,
                <S as ::record_core::Store>::Error
            >(self, payload)?;
        }
    } else {
        quote! {
            ::record_core::bind::prepare_save::<
                Self,
                <S as ::record_core::Store>::Error
            >(self, payload)?;
        }
    };

    quote! {
        #[automatically_derived]
        #[::record_core::async_trait]
        impl<S> ::record_core::BindFromPayload<S> for #ident
        where
            S: ::record_core::Store
                + ::record_core::RecordStore<#ident>
                #(+ ::record_core::RecordStore<#related_types>)*
        {
            async fn create_from_payload(
                payload: &::record_core::Payload,
                store: &S
            ) -> ::core::result::Result<
                ::record_core::Bound<Self>,
                ::record_core::BindError<<S as ::record_core::Store>::Error>
            > {
                let set = ::record_core::bind::prepare_create::<
                    Self,
                    <S as ::record_core::Store>::Error
                >(payload)?;
                let many = set.many;
                let mut saved = ::std::vec::Vec::with_capacity(set.records.len());
                for mut item in set.records {
                    #(#create_belongs)*
                    ::record_core::bind::insert_record(&mut item.record, store).await?;
                    #(#create_has)*
                    saved.push(item.record);
                }
                ::core::result::Result::Ok(::record_core::Bound::from_parts(many, saved))
            }

            async fn update_from_payload(
                payload: &::record_core::Payload,
                store: &S
            ) -> ::core::result::Result<
                ::record_core::Bound<Self>,
                ::record_core::BindError<<S as ::record_core::Store>::Error>
            > {
                let set =
                    ::record_core::bind::prepare_update::<Self, S>(payload, store).await?;
                let many = set.many;
                let mut saved = ::std::vec::Vec::with_capacity(set.records.len());
                for #update_item_pat in set.records {
                    #(#update_belongs)*
                    ::record_core::bind::update_record(&item.record, store).await?;
                    #(#update_has)*
                    saved.push(item.record);
                }
                ::core::result::Result::Ok(::record_core::Bound::from_parts(many, saved))
            }

            async fn save_from_payload(
                &mut self,
                payload: &::record_core::Payload,
                store: &S
            ) -> ::core::result::Result<
                (),
                ::record_core::BindError<<S as ::record_core::Store>::Error>
            > {
                #save_prepare
                #(#save_belongs)*
                ::record_core::bind::save_record(self, store).await?;
                #(#save_has)*
                ::core::result::Result::Ok(())
            }
        }
    }
}

/// Has-one and has-many relations, in declaration order.
fn has_relations(record: &RecordDef) -> Vec<ResolvedRelation> {
    record
        .relations()
        .into_iter()
        .filter(|relation| relation.kind != RelationKindDecl::BelongsTo)
        .collect()
}

/// Emit the arm resolving one belongs-to relation before the record saves:
/// create (or upsert) the related record, then write its id into the
/// foreign-key field.
fn belongs_to_arm(
    relation: &ResolvedRelation,
    record_expr: &TokenStream,
    relations_expr: &TokenStream,
    upsert: bool
) -> TokenStream {
    let name = &relation.name;
    let foreign_key = &relation.foreign_key;
    let related = &relation.related;
    let resolve = if upsert {
        quote! {
            ::record_core::bind::upsert_child::<#related, S>(
                #name,
                &value,
                ::core::option::Option::None,
                store
            )
            .await?
        }
    } else {
        quote! {
            ::record_core::bind::create_child::<#related, S>(
                #name,
                &value,
                ::core::option::Option::None,
                store
            )
            .await?
        }
    };

    quote! {
        if let ::core::option::Option::Some(value) = #relations_expr.remove(#name) {
            let related = #resolve;
            let fk = ::record_core::serde_json::to_value(::record_core::Record::id(&related))
                .map_err(|source| ::record_core::AttributeError {
                    field: ::std::string::String::from(#foreign_key),
                    source
                })?;
            ::record_core::Record::set_attribute(&mut #record_expr, #foreign_key, &fk)?;
        }
    }
}

/// Emit the arm resolving one has-one or has-many relation after the record
/// saved: create (or upsert) the related records with their foreign key
/// pointing back at it.
fn has_arm(
    relation: &ResolvedRelation,
    record_expr: &TokenStream,
    relations_expr: &TokenStream,
    upsert: bool
) -> TokenStream {
    let name = &relation.name;
    let foreign_key = &relation.foreign_key;
    let related = &relation.related;

    let resolve = match (relation.kind, upsert) {
        (RelationKindDecl::HasMany, false) => quote! {
            ::record_core::bind::create_children::<#related, S>(
                #name,
                &value,
                (#foreign_key, &fk),
                store
            )
            .await?;
        },
        (RelationKindDecl::HasMany, true) => quote! {
            ::record_core::bind::upsert_children::<#related, S>(
                #name,
                &value,
                (#foreign_key, &fk),
                store
            )
            .await?;
        },
        (_, false) => quote! {
            ::record_core::bind::create_child::<#related, S>(
                #name,
                &value,
                ::core::option::Option::Some((#foreign_key, &fk)),
                store
            )
            .await?;
        },
        (_, true) => quote! {
            ::record_core::bind::upsert_child::<#related, S>(
                #name,
                &value,
                ::core::option::Option::Some((#foreign_key, &fk)),
                store
            )
            .await?;
        }
    };

    quote! {
        if let ::core::option::Option::Some(value) = #relations_expr.remove(#name) {
            let fk = ::record_core::serde_json::to_value(::record_core::Record::id(&#record_expr))
                .map_err(|source| ::record_core::AttributeError {
                    field: ::std::string::String::from(#foreign_key),
                    source
                })?;
            #resolve
        }
    }
}
