//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a FinishId where a ModuleId is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A string identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
    ($name:ident, prefix = $prefix:literal) => {
        define_id!($name);

        impl $name {
            /// Generate a new process-unique ID.
            pub fn generate() -> Self {
                Self(generate_id($prefix))
            }
        }
    };
}

define_id!(ModuleId);
define_id!(FinishId);
define_id!(GroupTag);
define_id!(LineItemId, prefix = "li");
define_id!(OrderId, prefix = "ord");

/// Generate a prefixed ID from 12 random bytes.
fn generate_id(prefix: &str) -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use rand::Rng;

    let bytes: [u8; 12] = rand::thread_rng().gen();
    format!("{}_{}", prefix, URL_SAFE_NO_PAD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ModuleId::new("A");
        assert_eq!(id.as_str(), "A");
    }

    #[test]
    fn test_id_generation() {
        let id1 = LineItemId::generate();
        let id2 = LineItemId::generate();
        assert_ne!(id1, id2);
        assert!(id1.as_str().starts_with("li_"));
        assert!(OrderId::generate().as_str().starts_with("ord_"));
    }

    #[test]
    fn test_id_from_string() {
        let id: FinishId = "light-wood".into();
        assert_eq!(id.as_str(), "light-wood");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let tag = GroupTag::new("design-7");
        assert_eq!(serde_json::to_string(&tag).unwrap(), "\"design-7\"");
        let back: GroupTag = serde_json::from_str("\"design-7\"").unwrap();
        assert_eq!(back, tag);
    }

    #[test]
    fn test_id_display() {
        let id = GroupTag::new("design-7");
        assert_eq!(format!("{}", id), "design-7");
    }
}
