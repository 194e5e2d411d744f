//! Macro for implementing Display and FromStr for wire enums
//!
//! PluralKit encodes its small enums (privacy levels, autoproxy modes) as
//! lowercase strings. This macro derives both directions of that mapping from
//! a single table so query parameters, log fields and serde renames agree.
//!
//! # Example
//!
//! ```rust
//! use pluralkit_domain::impl_wire_str_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Visibility {
//!     Shown,
//!     Hidden,
//! }
//!
//! impl_wire_str_conversions!(Visibility {
//!     Shown => "shown",
//!     Hidden => "hidden",
//! });
//!
//! assert_eq!(Visibility::Hidden.to_string(), "hidden");
//! assert_eq!("SHOWN".parse::<Visibility>(), Ok(Visibility::Shown));
//! ```

/// Implements Display and FromStr traits for wire enums
///
/// - Display: writes the wire string for the variant
/// - FromStr: parses case-insensitively, reporting the enum name on failure
#[macro_export]
macro_rules! impl_wire_str_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of this value.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
