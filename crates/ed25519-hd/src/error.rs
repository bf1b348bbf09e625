//! Error type shared by path parsing, derivation and key generation.

use std::{fmt, num::ParseIntError};

use hmac::digest::InvalidLength;

/// Error type for ed25519 HD derivation.
#[derive(Debug, thiserror::Error)]
pub enum DerivationError {
    /// The path does not match the accepted grammar, or one of its elements
    /// cannot be parsed.
    #[error("invalid path")]
    InvalidPath,

    /// A path element does not fit in a `u32`.
    #[error("path element cannot be larger than {}", u32::MAX)]
    ElementTooLarge,

    /// A path element is not a base-10 integer.
    #[error("invalid path element {element:?}: {source}")]
    InvalidElement {
        /// The offending segment with its hardening marker stripped.
        element: String,

        /// The underlying integer parse error.
        source: ParseIntError,
    },

    /// The seed handed to master key derivation is not
    /// [`SEED_LEN`](crate::SEED_LEN) bytes long.
    #[error("seed must be 64 bytes (passed {0})")]
    SeedLength(usize),

    /// Child derivation was asked for an index below the hardened offset.
    ///
    /// Paths always get the offset applied before derivation, so this is only
    /// reachable by calling [`DerivedKey::derive_child`](crate::DerivedKey::derive_child)
    /// directly.
    #[error("elements must be hardened (got index {0:#010x})")]
    UnhardenedElement(u32),

    /// The ed25519 primitive rejected the key material.
    #[error("ed25519 key generation failed: {0}")]
    KeyGeneration(#[from] ed25519_dalek::SignatureError),

    /// HMAC-SHA512 could not be keyed.
    #[error("HMAC-SHA512 failed during {step}: {reason}")]
    Hmac {
        /// The derivation step that failed.
        step: DerivationStep,

        /// The error reported by the MAC.
        reason: InvalidLength,
    },

    /// The mnemonic phrase failed to parse or its checksum is wrong.
    #[cfg(feature = "mnemonic")]
    #[error("invalid mnemonic: {0}")]
    Mnemonic(#[from] bip39::Error),
}

/// The step of the derivation chain an HMAC error comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivationStep {
    /// Master key from the seed.
    Master,

    /// Hardened child at the given (offset) index.
    Child(u32),
}

impl fmt::Display for DerivationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Master => write!(f, "master key derivation"),
            Self::Child(index) => write!(f, "child derivation at index {index:#010x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_reference_wording() {
        assert_eq!(DerivationError::InvalidPath.to_string(), "invalid path");
        assert_eq!(
            DerivationError::ElementTooLarge.to_string(),
            "path element cannot be larger than 4294967295"
        );
        assert_eq!(
            DerivationError::SeedLength(0).to_string(),
            "seed must be 64 bytes (passed 0)"
        );
        assert_eq!(
            DerivationError::UnhardenedElement(44).to_string(),
            "elements must be hardened (got index 0x0000002c)"
        );
    }

    #[test]
    fn step_display() {
        assert_eq!(DerivationStep::Master.to_string(), "master key derivation");
        assert_eq!(
            DerivationStep::Child(0x8000_002c).to_string(),
            "child derivation at index 0x8000002c"
        );
    }
}
