//! Macro for implementing Display and FromStr for status enums
//!
//! Status values travel as lowercase strings (JSON bodies, SQLite columns),
//! so every status enum needs the same pair of conversions.
//!
//! # Example
//!
//! ```rust
//! use clinicdesk_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum VisitStatus {
//!     Booked,
//!     Attended,
//! }
//!
//! impl_domain_status_conversions!(VisitStatus {
//!     Booked => "booked",
//!     Attended => "attended",
//! });
//!
//! assert_eq!(VisitStatus::Attended.to_string(), "attended");
//! assert_eq!("BOOKED".parse::<VisitStatus>(), Ok(VisitStatus::Booked));
//! ```

/// Implements Display and FromStr traits for status enums
///
/// - Display writes the mapped string
/// - FromStr parses case-insensitively and reports the enum name on failure
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
