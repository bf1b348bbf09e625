//! SLIP-0010 hierarchical deterministic key derivation for ed25519.
//!
//! This crate derives ed25519 key pairs from a 64-byte seed and a BIP-32 style
//! path. Ed25519 only supports hardened derivation, so every path element is
//! hardened regardless of how it is written.
//!
//! # Usage
//!
//! ```rust
//! use strata_ed25519_hd::{derive_key, keys};
//!
//! let seed = [0u8; 64];
//!
//! // Public key and 64-byte expanded private key in one call.
//! let (public_key, private_key) = keys(&seed, "m/44'/1901'/0'")?;
//! assert_eq!(private_key[32..], public_key);
//!
//! // Or keep the derived node around.
//! let key = derive_key(&seed, "m/44'/1901'/0'/0")?;
//! let signing_key = key.signing_key();
//! # let _ = signing_key;
//! # Ok::<(), strata_ed25519_hd::DerivationError>(())
//! ```
//!
//! # Paths
//!
//! Accepted paths have one to five segments. The first three are written
//! hardened (`'`) and up to two trailing segments are written plain:
//!
//! ```text
//! m/44'
//! m/44'/1901'
//! m/44'/1901'/0'
//! m/44'/1901'/0'/0
//! m/44'/1901'/0'/0/1
//! ```
//!
//! The trailing plain segments are still derived hardened.

mod derive;
mod error;
mod keypair;
#[cfg(feature = "mnemonic")]
mod mnemonic;
mod path;


pub use derive::{derive_key, derive_path, DerivedKey, HARDENED_OFFSET, KEY_LEN, SEED_LEN};
pub use error::{DerivationError, DerivationStep};
pub use keypair::Ed25519KeyPair;
#[cfg(feature = "mnemonic")]
pub use mnemonic::{keys_from_mnemonic, seed_from_mnemonic};
pub use path::{is_valid_path, DerivationPath, MAX_DEPTH};

/// Length of an ed25519 public key.
pub const PUBLIC_KEY_LEN: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;

/// Length of the expanded `seed || public_key` private key.
pub const KEYPAIR_LEN: usize = ed25519_dalek::KEYPAIR_LENGTH;

/// Derives the ed25519 key pair at `path` from `seed`.
///
/// Returns the public key and the expanded private key (`seed || public_key`).
pub fn keys(
    seed: &[u8],
    path: &str,
) -> Result<([u8; PUBLIC_KEY_LEN], [u8; KEYPAIR_LEN]), DerivationError> {
    let pair = derive_key(seed, path)?.keypair();
    Ok((pair.public_key(), pair.private_key()))
}
