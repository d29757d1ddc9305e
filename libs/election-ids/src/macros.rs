//! Macros for defining slug-backed segment types.

/// Macro to define a normalized segment type.
///
/// This generates a newtype wrapper around a slug `String` with:
/// - A `KIND` constant naming the segment in error messages
/// - `new()` to normalize free text into a segment
/// - `parse()` to accept an already-normalized segment
/// - `Display`, `FromStr` and `AsRef<str>` implementations
/// - `Serialize` and `Deserialize` implementations
/// - `Ord`, `Hash`, and other standard traits
///
/// # Example
///
/// ```ignore
/// define_segment!(Organisation, "organisation");
///
/// let org = Organisation::new("Newcastle upon Tyne").unwrap();
/// assert_eq!(org.as_str(), "newcastle-upon-tyne");
/// let parsed: Organisation = "newcastle-upon-tyne".parse()?;
/// ```
#[macro_export]
macro_rules! define_segment {
    ($name:ident, $kind:literal) => {
        /// A normalized identifier segment.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// The segment name used in error messages.
            pub const KIND: &'static str = $kind;

            /// Normalizes free text into a segment.
            ///
            /// Returns `None` when nothing is left after normalization.
            #[must_use]
            pub fn new(raw: &str) -> Option<Self> {
                let slug = $crate::slugify(raw);
                if slug.is_empty() {
                    None
                } else {
                    Some(Self(slug))
                }
            }

            /// Parses a segment that must already be in slug form.
            pub fn parse(s: &str) -> Result<Self, $crate::IdError> {
                if !$crate::is_valid_token(s) {
                    return Err($crate::IdError::MalformedInput {
                        message: format!("invalid {} segment '{}'", Self::KIND, s),
                    });
                }
                Ok(Self(s.to_string()))
            }

            /// Returns the segment text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}
