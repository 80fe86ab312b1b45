//! Bit-flag enumerations encoded as comma-separated tokens.
//!
//! A flag set is serialized by walking its declared flags in declaration
//! order and emitting the token of every flag that is set, so
//! `Call | Message` and `Message | Call` both encode as `msg,call`.
//! Decoding walks the tokens back into bits and is the exact inverse.

use crate::errors::VkError;

/// A set of named bit flags with a fixed declaration order.
pub trait FlagSet: Copy + Sized {
    /// Every single-bit flag with its wire token, in declaration order.
    const FLAGS: &'static [(u32, &'static str)];

    fn bits(&self) -> u32;

    fn from_bits_truncate(bits: u32) -> Self;

    /// Encode the set bits as `tok1,tok2,...`. Returns `None` for an empty set.
    fn encode(&self) -> Option<String> {
        let bits = self.bits();
        let tokens: Vec<&str> = Self::FLAGS
            .iter()
            .filter(|(bit, _)| bits & bit == *bit)
            .map(|(_, token)| *token)
            .collect();
        if tokens.is_empty() {
            None
        } else {
            Some(tokens.join(","))
        }
    }

    /// Parse a comma-separated token list. Unknown tokens are an error.
    fn decode(s: &str) -> Result<Self, VkError> {
        let mut bits = 0;
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (bit, _) = Self::FLAGS
                .iter()
                .find(|(_, name)| *name == token)
                .ok_or_else(|| VkError::Projection(format!("unknown flag token: {token}")))?;
            bits |= bit;
        }
        Ok(Self::from_bits_truncate(bits))
    }
}

/// Declare a flag-set newtype over `u32`.
///
/// ```
/// vk_sdk::vk_flags! {
///     /// Example flags.
///     pub struct Perms {
///         const READ = 1 => "read";
///         const WRITE = 2 => "write";
///     }
/// }
/// use vk_sdk::flags::FlagSet;
/// assert_eq!((Perms::WRITE | Perms::READ).encode().as_deref(), Some("read,write"));
/// ```
#[macro_export]
macro_rules! vk_flags {
    (
        $(#[$outer:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$inner:meta])*
                const $flag:ident = $value:expr => $token:literal;
            )+
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name(u32);

        impl $name {
            $(
                $(#[$inner])*
                pub const $flag: Self = Self($value);
            )+

            /// All declared flags.
            pub const ALL: Self = Self(0 $(| $value)+);

            pub const fn empty() -> Self {
                Self(0)
            }

            pub const fn is_empty(&self) -> bool {
                self.0 == 0
            }

            pub const fn contains(&self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }
        }

        impl $crate::flags::FlagSet for $name {
            const FLAGS: &'static [(u32, &'static str)] = &[$(($value, $token)),+];

            fn bits(&self) -> u32 {
                self.0
            }

            fn from_bits_truncate(bits: u32) -> Self {
                Self(bits & Self::ALL.0)
            }
        }

        impl ::std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl ::std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl $crate::params::ParamValue for $name {
            fn to_param(&self) -> Option<String> {
                $crate::flags::FlagSet::encode(self)
            }
        }
    };
}
