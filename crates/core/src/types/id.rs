//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.
//!
//! Backend identifiers are opaque strings. When a listing record arrives
//! without one, the normalizer synthesizes a local id from the current
//! timestamp and a random suffix.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `synthesize()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use krixo_core::define_id;
/// define_id!(TicketId, "ticket");
///
/// let id = TicketId::new("t-1");
/// assert_eq!(id.as_str(), "t-1");
/// assert!(TicketId::synthesize().as_str().starts_with("ticket-"));
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used for locally synthesized ids.
            pub const PREFIX: &'static str = $prefix;

            /// Create a new ID from a backend-provided value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Synthesize a locally unique ID for a record that arrived without one.
            #[must_use]
            pub fn synthesize() -> Self {
                Self($crate::types::id::synthesize_raw(Self::PREFIX))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Build `<prefix>-<unix millis>-<random hex>`.
#[doc(hidden)]
#[must_use]
pub fn synthesize_raw(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u64 = rand::random();
    format!("{prefix}-{millis}-{suffix:016x}")
}

define_id!(CommandId, "cmd");
define_id!(WorkerId, "worker");
