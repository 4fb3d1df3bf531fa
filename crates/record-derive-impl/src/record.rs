// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Record derive macro implementation.
//!
//! This module contains all parsing and code generation for the
//! `#[derive(Record)]` macro.

mod bind_impl;
mod parse;
mod record_impl;

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use self::parse::RecordDef;

/// Main entry point for the Record derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match RecordDef::from_derive_input(&input) {
        Ok(record) => generate(&record),
        Err(err) => err.write_errors().into()
    }
}

/// Generate all code for the record.
fn generate(record: &RecordDef) -> TokenStream {
    let record_tokens = record_impl::generate(record);
    let bind_tokens = bind_impl::generate(record);

    let expanded = quote! {
        #record_tokens
        #bind_tokens
    };

    expanded.into()
}
