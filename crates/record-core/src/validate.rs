// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Rule evaluation.
//!
//! Runs a record type's declared rules against a populated attribute map and
//! produces either nothing or a [`ValidationFailure`] carrying every failing
//! field and message. Evaluation never stops early: the caller always sees
//! the complete field → messages map.
//!
//! Email and URL checks delegate to the `validator` crate's value-level
//! traits; `pattern` compiles through `regex`.

use serde_json::{Map, Value};
use validator::{ValidateEmail, ValidateUrl};

use crate::{
    error::ValidationFailure,
    rule::{FieldRules, Rule, RuleSpec}
};

/// Evaluate declared rules against an attribute map.
///
/// # Arguments
///
/// * `rules` - The record type's declared rules
/// * `attrs` - The post-population attribute map
///
/// # Errors
///
/// [`ValidationFailure`] with every failing field when any rule rejects.
///
/// # Example
///
/// ```rust
/// use record_core::rule::{FieldRules, Rule, RuleSpec};
/// use record_core::validate::check;
/// use serde_json::Map;
///
/// const RULES: &[FieldRules] = &[FieldRules {
///     field: "first_name",
///     rules: &[RuleSpec {
///         rule:    Rule::Required,
///         message: None
///     }]
/// }];
///
/// let err = check(RULES, &Map::new()).unwrap_err();
/// assert!(err.has("first_name"));
/// ```
pub fn check(rules: &[FieldRules], attrs: &Map<String, Value>) -> Result<(), ValidationFailure> {
    let mut failure = ValidationFailure::new();

    for field_rules in rules {
        let value = attrs.get(field_rules.field);
        for spec in field_rules.rules {
            if let Some(message) = check_rule(spec, field_rules.field, value) {
                failure.add(field_rules.field, message);
            }
        }
    }

    if failure.is_empty() { Ok(()) } else { Err(failure) }
}

/// Evaluate one rule, returning the failure message when it rejects.
fn check_rule(spec: &RuleSpec, field: &str, value: Option<&Value>) -> Option<String> {
    let passes = match spec.rule {
        Rule::Required => !is_blank(value),
        _ => match value {
            // Presence is `required`'s concern alone.
            None | Some(Value::Null) => true,
            Some(present) => check_present(&spec.rule, present)
        }
    };

    if passes {
        return None;
    }
    Some(
        spec.message
            .map_or_else(|| default_message(&spec.rule, field), str::to_owned)
    )
}

/// Evaluate a non-required rule against a present, non-null value.
fn check_present(rule: &Rule, value: &Value) -> bool {
    match rule {
        Rule::Required => true,
        Rule::Length {
            min,
            max
        } => match value {
            Value::String(s) => {
                let length = s.chars().count() as u64;
                min.is_none_or(|m| length >= m) && max.is_none_or(|m| length <= m)
            }
            Value::Array(items) => {
                let length = items.len() as u64;
                min.is_none_or(|m| length >= m) && max.is_none_or(|m| length <= m)
            }
            _ => false
        },
        Rule::Range {
            min,
            max
        } => value.as_f64().is_some_and(|number| {
            min.is_none_or(|m| number >= m) && max.is_none_or(|m| number <= m)
        }),
        Rule::Email => value
            .as_str()
            .is_some_and(|candidate| candidate.validate_email()),
        Rule::Url => value
            .as_str()
            .is_some_and(|candidate| candidate.validate_url()),
        Rule::Pattern(pattern) => value.as_str().is_some_and(|candidate| {
            regex::Regex::new(pattern).is_ok_and(|re| re.is_match(candidate))
        })
    }
}

/// Check whether a value counts as absent for `required`.
///
/// Missing, null, empty string, and empty array are all blank.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false
    }
}

/// Default failure message for a rule.
fn default_message(rule: &Rule, field: &str) -> String {
    match rule {
        Rule::Required => format!("{field} is required"),
        Rule::Length {
            min,
            max
        } => match (min, max) {
            (Some(min), Some(max)) => {
                format!("{field} must be between {min} and {max} characters")
            }
            (Some(min), None) => format!("{field} must be at least {min} characters"),
            (None, Some(max)) => format!("{field} must be at most {max} characters"),
            (None, None) => format!("{field} has an invalid length")
        },
        Rule::Range {
            min,
            max
        } => match (min, max) {
            (Some(min), Some(max)) => format!("{field} must be between {min} and {max}"),
            (Some(min), None) => format!("{field} must be at least {min}"),
            (None, Some(max)) => format!("{field} must be at most {max}"),
            (None, None) => format!("{field} is out of range")
        },
        Rule::Email => format!("{field} must be a valid email address"),
        Rule::Url => format!("{field} must be a valid URL"),
        Rule::Pattern(_) => format!("{field} format is invalid")
    }
}
