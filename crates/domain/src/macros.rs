//! Macro for implementing Display and FromStr for wire-name enums
//!
//! Several small enums travel as fixed strings (HTTP methods, listing names).
//! This macro keeps their string forms in one place.
//!
//! # Example
//!
//! ```rust
//! use studyreport_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Listing {
//!     Finished,
//!     Unfinished,
//! }
//!
//! impl_wire_name_conversions!(Listing {
//!     Finished => "finished",
//!     Unfinished => "unfinished",
//! });
//! ```

/// Implements Display and FromStr traits for wire-name enums
///
/// This macro generates:
/// - Display trait: writes the declared wire name verbatim
/// - FromStr trait: matches the wire name ignoring ASCII case
///
/// The `FromStr` error is a `String` naming the enum and the rejected input;
/// callers that need a typed error map it themselves.
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Verb {
        Get,
        Post,
    }

    impl_wire_name_conversions!(Verb {
        Get => "GET",
        Post => "POST",
    });

    #[test]
    fn test_display_uses_wire_name() {
        assert_eq!(Verb::Get.to_string(), "GET");
        assert_eq!(Verb::Post.to_string(), "POST");
    }

    #[test]
    fn test_fromstr_ignores_case() {
        assert_eq!(Verb::from_str("get").unwrap(), Verb::Get);
        assert_eq!(Verb::from_str("Post").unwrap(), Verb::Post);
        assert_eq!(Verb::from_str(" POST ").unwrap(), Verb::Post);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = Verb::from_str("put");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid Verb: put"));
    }

    #[test]
    fn test_fromstr_empty() {
        assert!(Verb::from_str("").is_err());
    }

    mod with_result_alias {
        use std::str::FromStr;

        #[allow(unused_imports)]
        use crate::errors::Result;

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Side {
            Left,
            Right,
        }

        impl_wire_name_conversions!(Side {
            Left => "left",
            Right => "right",
        });

        #[test]
        fn test_expands_beside_single_parameter_result_alias() {
            assert_eq!(Side::from_str("RIGHT"), Ok(Side::Right));
            assert_eq!(Side::Left.to_string(), "left");
        }
    }
}
