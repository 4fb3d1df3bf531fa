// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! UUID version configuration for id generation.

use darling::FromMeta;

/// UUID version the generated `ensure_id` uses to fill an unset primary
/// key.
///
/// | Version | Method | Properties |
/// |---------|--------|------------|
/// | `V7` | `Uuid::now_v7()` | Time-ordered, sortable, default |
/// | `V4` | `Uuid::new_v4()` | Random, widely compatible |
///
/// # Examples
///
/// ```rust,ignore
/// #[record(uuid = "v7")]
/// #[record(uuid = "v4")]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UuidVersion {
    /// UUID version 7 - time-ordered.
    #[default]
    V7,

    /// UUID version 4 - random.
    V4
}

impl FromMeta for UuidVersion {
    /// Parse UUID version from string attribute value.
    ///
    /// Accepts `"v7"`/`"7"` and `"v4"`/`"4"`, case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `darling::Error::unknown_value` for unrecognized values.
    fn from_string(value: &str) -> darling::Result<Self> {
        match value.to_lowercase().as_str() {
            "v7" | "7" => Ok(UuidVersion::V7),
            "v4" | "4" => Ok(UuidVersion::V4),
            _ => Err(darling::Error::unknown_value(value))
        }
    }
}
