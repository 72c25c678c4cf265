//! Macro for implementing Display and FromStr for name-keyed enums
//!
//! API verbs are addressed by their camelCase wire names ("getItem",
//! "searchByImage"). This macro keeps the enum and its names in one place and
//! generates both directions of the conversion.
//!
//! # Example
//!
//! ```rust
//! use browsekit_domain::impl_named_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Grant {
//!     ClientCredentials,
//!     RefreshToken,
//! }
//!
//! impl_named_enum_conversions!(Grant {
//!     ClientCredentials => "clientCredentials",
//!     RefreshToken => "refreshToken",
//! });
//!
//! assert_eq!(Grant::RefreshToken.to_string(), "refreshToken");
//! assert_eq!("clientCredentials".parse::<Grant>(), Ok(Grant::ClientCredentials));
//! assert!("CLIENTCREDENTIALS".parse::<Grant>().is_err());
//! ```

/// Implements Display and FromStr for enums with fixed string names
///
/// This macro generates:
/// - Display trait: writes the canonical name exactly as given
/// - FromStr trait: accepts only the exact canonical name
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their canonical names
#[macro_export]
macro_rules! impl_named_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical name of this variant.
            pub fn as_str(&self) -> &'static str {
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

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $(
                    if s == $str {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
