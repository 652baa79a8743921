//! Macro for implementing Display and FromStr for wire enums
//!
//! Server enums travel as lowercase strings in query parameters and bodies.
//! This macro keeps the string form used in URLs in one place per enum.
//!
//! # Example
//!
//! ```rust
//! use pocketledger_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Direction {
//!     Inflow,
//!     Outflow,
//! }
//!
//! impl_wire_enum_conversions!(Direction {
//!     Inflow => "inflow",
//!     Outflow => "outflow",
//! });
//! ```

/// Implements Display and FromStr for enums sent over the wire as strings
///
/// - Display writes the wire string
/// - FromStr parses case-insensitively and names the enum on failure
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
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
