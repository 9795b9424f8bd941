//! Identifier Types
//!
//! Users and posts are keyed by UUIDs. Identifiers arrive from several
//! places (token subjects, path segments, database rows) and are always
//! normalised through [`Uuid`] parsing, so two ids compare equal exactly
//! when they name the same record regardless of how they were spelled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse an id from its textual form.
            ///
            /// Surrounding whitespace is ignored and any UUID spelling
            /// (upper case, braced, simple) is accepted.
            pub fn parse(value: &str) -> Result<Self, SharedError> {
                Uuid::parse_str(value.trim())
                    .map(Self)
                    .map_err(|_| SharedError::invalid_id($kind, value))
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = SharedError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::parse(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // Canonical lower-case hyphenated form
                write!(f, "{}", self.0.hyphenated())
            }
        }
    };
}

uuid_id!(
    /// Identifier of a user record
    UserId,
    "user"
);

uuid_id!(
    /// Identifier of a post record
    PostId,
    "post"
);
