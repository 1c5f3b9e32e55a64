//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Each ID carries a
//! short entity prefix in its text form (e.g. `ORD-7f9c...`), so persisted
//! records and exported snapshots stay human-readable while the payload is a
//! collision-resistant random UUID.

use thiserror::Error;

/// Errors that can occur when parsing a prefixed ID from text.
#[derive(Debug, Error)]
pub enum ParseIdError {
    /// The text does not start with the expected entity prefix.
    #[error("identifier must start with `{expected}-`")]
    MissingPrefix {
        /// Prefix the ID type requires.
        expected: &'static str,
    },
    /// The payload after the prefix is not a valid UUID.
    #[error("invalid identifier payload: {0}")]
    InvalidPayload(#[from] uuid::Error),
}

/// Macro to define a type-safe, prefixed ID wrapper.
///
/// Creates a newtype wrapper around [`uuid::Uuid`] with:
/// - A constant entity prefix used in the text form (`PREFIX-<uuid>`)
/// - `generate()` producing a fresh random (v4) identifier
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `Display`/`FromStr` for the prefixed text form
/// - `Serialize`/`Deserialize` as the prefixed text form
///
/// # Example
///
/// ```rust
/// # use choco_shelf_core::define_id;
/// define_id!(OrderId, "ORD");
/// define_id!(CustomerId, "CUST");
///
/// let order_id = OrderId::generate();
/// assert!(order_id.to_string().starts_with("ORD-"));
///
/// // These are different types, so this won't compile:
/// // let _: CustomerId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Entity prefix used in the text form of this ID.
            pub const PREFIX: &'static str = $prefix;

            /// Generate a fresh random ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Get the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}-{}", Self::PREFIX, self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::ParseIdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                let payload = s
                    .strip_prefix(Self::PREFIX)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .ok_or($crate::types::id::ParseIdError::MissingPrefix {
                        expected: Self::PREFIX,
                    })?;
                Ok(Self(::uuid::Uuid::parse_str(payload)?))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let text = <::std::string::String as ::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                text.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}

// Define standard entity IDs
define_id!(OrderId, "ORD");
define_id!(CustomerId, "CUST");
define_id!(ProductId, "PRD");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_prefix() {
        let id = OrderId::generate();
        assert!(id.to_string().starts_with("ORD-"));

        let id = CustomerId::generate();
        assert!(id.to_string().starts_with("CUST-"));
    }

    #[test]
    fn test_parse_round_trip() {
        let id = ProductId::generate();
        let parsed: ProductId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_wrong_prefix() {
        let id = OrderId::generate();
        let as_customer = id.to_string().parse::<CustomerId>();
        assert!(matches!(
            as_customer,
            Err(ParseIdError::MissingPrefix { expected: "CUST" })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_payload() {
        let result = "ORD-not-a-uuid".parse::<OrderId>();
        assert!(matches!(result, Err(ParseIdError::InvalidPayload(_))));
    }

    #[test]
    fn test_serde_uses_text_form() {
        let id = OrderId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));

        let parsed: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_generate_is_unique() {
        let a = OrderId::generate();
        let b = OrderId::generate();
        assert_ne!(a, b);
    }
}
