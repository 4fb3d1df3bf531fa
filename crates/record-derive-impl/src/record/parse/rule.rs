// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Rule attribute parsing.
//!
//! Extracts `#[rule(...)]` attributes from fields. Each attribute may
//! declare several rules plus one custom message covering them:
//!
//! ```rust,ignore
//! #[rule(required)]
//! #[rule(length(min = 1, max = 255))]
//! #[rule(range(min = 0, max = 100))]
//! #[rule(email)]
//! #[rule(url)]
//! #[rule(pattern = "^[a-z-]+$")]
//! #[rule(required, message = "You have got to choose a first name!")]
//! ```
//!
//! Unknown identifiers are silently ignored for forward compatibility.

use syn::Attribute;

/// A single parsed constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// `required`
    Required,

    /// `length(min = N, max = M)`
    Length {
        /// Minimum length.
        min: Option<u64>,
        /// Maximum length.
        max: Option<u64>
    },

    /// `range(min = N, max = M)`
    Range {
        /// Minimum value.
        min: Option<f64>,
        /// Maximum value.
        max: Option<f64>
    },

    /// `email`
    Email,

    /// `url`
    Url,

    /// `pattern = "..."`
    Pattern(String)
}

/// One declared rule with its optional custom message.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDef {
    /// The constraint.
    pub kind: RuleKind,

    /// Custom failure message, shared by all rules of the same attribute.
    pub message: Option<String>
}

/// Parse every `#[rule(...)]` attribute on a field.
pub fn parse_rule_attrs(attrs: &[Attribute]) -> Vec<RuleDef> {
    let mut rules = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("rule") {
            continue;
        }

        let mut kinds: Vec<RuleKind> = Vec::new();
        let mut message: Option<String> = None;

        let _ = attr.parse_nested_meta(|meta| {
            let path_str = meta.path.get_ident().map(|i| i.to_string());

            match path_str.as_deref() {
                Some("required") => {
                    kinds.push(RuleKind::Required);
                }
                Some("length") => {
                    let mut min = None;
                    let mut max = None;
                    meta.parse_nested_meta(|nested| {
                        let nested_path = nested.path.get_ident().map(|i| i.to_string());
                        match nested_path.as_deref() {
                            Some("min") => {
                                let value: syn::LitInt = nested.value()?.parse()?;
                                min = Some(value.base10_parse()?);
                            }
                            Some("max") => {
                                let value: syn::LitInt = nested.value()?.parse()?;
                                max = Some(value.base10_parse()?);
                            }
                            _ => {}
                        }
                        Ok(())
                    })?;
                    kinds.push(RuleKind::Length {
                        min,
                        max
                    });
                }
                Some("range") => {
                    let mut min = None;
                    let mut max = None;
                    meta.parse_nested_meta(|nested| {
                        let nested_path = nested.path.get_ident().map(|i| i.to_string());
                        match nested_path.as_deref() {
                            Some("min") => {
                                min = Some(parse_number(&nested)?);
                            }
                            Some("max") => {
                                max = Some(parse_number(&nested)?);
                            }
                            _ => {}
                        }
                        Ok(())
                    })?;
                    kinds.push(RuleKind::Range {
                        min,
                        max
                    });
                }
                Some("email") => {
                    kinds.push(RuleKind::Email);
                }
                Some("url") => {
                    kinds.push(RuleKind::Url);
                }
                Some("pattern") => {
                    let value: syn::LitStr = meta.value()?.parse()?;
                    kinds.push(RuleKind::Pattern(value.value()));
                }
                Some("message") => {
                    let value: syn::LitStr = meta.value()?.parse()?;
                    message = Some(value.value());
                }
                _ => {}
            }

            Ok(())
        });

        rules.extend(kinds.into_iter().map(|kind| RuleDef {
            kind,
            message: message.clone()
        }));
    }

    rules
}

/// Parse an integer or float literal into `f64`.
fn parse_number(nested: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<f64> {
    let lit: syn::Lit = nested.value()?.parse()?;
    match lit {
        syn::Lit::Int(value) => value.base10_parse(),
        syn::Lit::Float(value) => value.base10_parse(),
        other => Err(syn::Error::new_spanned(other, "expected a number"))
    }
}
