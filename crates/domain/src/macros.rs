//! Macro for implementing Display and FromStr for wire-name enums
//!
//! Several API enums travel as short strings (`"yes_no"`, `"overview"`,
//! `"A"`). This macro keeps the string table in one place and gives both
//! directions of the conversion.
//!
//! # Example
//!
//! ```rust
//! use pathwise_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Stage {
//!     Interests,
//!     Questions,
//! }
//!
//! impl_wire_name_conversions!(Stage {
//!     Interests => "interests",
//!     Questions => "questions",
//! });
//!
//! assert_eq!(Stage::Questions.to_string(), "questions");
//! assert_eq!("INTERESTS".parse::<Stage>().unwrap(), Stage::Interests);
//! ```

/// Implements Display and FromStr for an enum with a fixed wire name per
/// variant.
///
/// - Display writes the wire name exactly as declared
/// - FromStr matches case-insensitively and names the enum in its error
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire name of this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
