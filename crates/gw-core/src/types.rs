//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided id was zero, which no platform ever assigns.
    #[error("{field} must be a non-zero id")]
    ZeroId { field: &'static str },
}

/// Generates a validated numeric platform-id newtype with common trait
/// implementations.
macro_rules! define_platform_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u64", into = "u64")]
        pub struct $name(u64);

        impl $name {
            /// Creates a new id after validation.
            pub fn new(id: u64) -> Result<Self, ValidationError> {
                if id == 0 {
                    return Err(ValidationError::ZeroId { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the raw id value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl TryFrom<u64> for $name {
            type Error = ValidationError;

            fn try_from(value: u64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw: u64 = s
                    .parse()
                    .map_err(|e| format!("invalid {}: {e}", $field_name))?;
                Self::new(raw).map_err(|e| e.to_string())
            }
        }
    };
}

define_platform_id!(
    /// A validated subject (user) identifier.
    ///
    /// Subject ids are the platform's numeric user ids. Zero is reserved as
    /// "no subject" by every platform this system talks to and is rejected.
    SubjectId, "subject ID"
);

define_platform_id!(
    /// A validated channel identifier.
    ChannelId, "channel ID"
);
