//! SLIP-0010 hardened derivation for ed25519.
//!
//! The master key is `HMAC-SHA512("ed25519 seed", seed)`. Each child is
//! `HMAC-SHA512(chain_code, 0x00 || key || ser32(index))` with `index` at or
//! above [`HARDENED_OFFSET`]. In both cases the left half of the MAC output is
//! the new key and the right half the new chain code.
//!
//! # Usage
//!
//! ```rust
//! use strata_ed25519_hd::{derive_key, DerivedKey};
//!
//! let seed = [0u8; 64];
//! let key = derive_key(&seed, "m/44'/1901'/0'")?;
//!
//! // Same as walking the chain by hand.
//! let manual = DerivedKey::master(&seed)?
//!     .derive_child(0x8000_0000 + 44)?
//!     .derive_child(0x8000_0000 + 1901)?
//!     .derive_child(0x8000_0000)?;
//! assert_eq!(key, manual);
//! # Ok::<(), strata_ed25519_hd::DerivationError>(())
//! ```

use std::fmt;

use ed25519_dalek::SigningKey;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use tracing::{debug, trace};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{keypair::Ed25519KeyPair, DerivationError, DerivationPath, DerivationStep};

type HmacSha512 = Hmac<Sha512>;

/// HMAC key used to derive the master node from a seed.
const MASTER_HMAC_KEY: &[u8] = b"ed25519 seed";

/// Offset added to an index to mark it hardened.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Required seed length in bytes.
pub const SEED_LEN: usize = 64;

/// Length of a derived key and of a chain code.
pub const KEY_LEN: usize = 32;

/// `0x00 || key || ser32(index)`
const CHILD_MESSAGE_LEN: usize = 1 + KEY_LEN + 4;

/// A node in the derivation chain: 32 bytes of ed25519 key material and the
/// chain code used to derive its children.
///
/// This type can only be constructed through [`DerivedKey::master`] and the
/// derivation methods, and both halves are wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
    chain_code: [u8; KEY_LEN],
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("public_key", &Ed25519KeyPair::from_seed(&self.key).public_key())
            .finish_non_exhaustive()
    }
}

impl DerivedKey {
    /// Derives the master node from a [`SEED_LEN`]-byte seed.
    pub fn master(seed: &[u8]) -> Result<Self, DerivationError> {
        if seed.len() != SEED_LEN {
            return Err(DerivationError::SeedLength(seed.len()));
        }

        Self::from_hmac(MASTER_HMAC_KEY, seed, DerivationStep::Master)
    }

    /// Derives the hardened child at `index`.
    ///
    /// `index` must already include [`HARDENED_OFFSET`]; ed25519 has no
    /// non-hardened derivation.
    pub fn derive_child(&self, index: u32) -> Result<Self, DerivationError> {
        if index < HARDENED_OFFSET {
            return Err(DerivationError::UnhardenedElement(index));
        }

        let mut message = [0u8; CHILD_MESSAGE_LEN];
        message[1..1 + KEY_LEN].copy_from_slice(&self.key);
        message[1 + KEY_LEN..].copy_from_slice(&index.to_be_bytes());

        let child = Self::from_hmac(&self.chain_code, &message, DerivationStep::Child(index));
        message.zeroize();
        trace!(index, "derived hardened child");
        child
    }

    /// Walks `path` down from this node, hardening every element.
    ///
    /// Elements that already have the top bit set are used as they are.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, DerivationError> {
        path.iter()
            .try_fold(self.clone(), |parent, index| {
                parent.derive_child(index | HARDENED_OFFSET)
            })
    }

    /// The ed25519 public key for this node.
    pub fn public_key(&self) -> [u8; KEY_LEN] {
        self.keypair().public_key()
    }

    /// A copy of this node's private key bytes, usable as an ed25519 seed.
    pub fn seed(&self) -> [u8; KEY_LEN] {
        self.key
    }

    /// The ed25519 key pair for this node.
    pub fn keypair(&self) -> Ed25519KeyPair {
        Ed25519KeyPair::from_seed(&self.key)
    }

    /// The ed25519 signing key for this node.
    pub fn signing_key(&self) -> SigningKey {
        SigningKey::from_bytes(&self.key)
    }

    fn from_hmac(
        hmac_key: &[u8],
        message: &[u8],
        step: DerivationStep,
    ) -> Result<Self, DerivationError> {
        let mut mac = HmacSha512::new_from_slice(hmac_key)
            .map_err(|reason| DerivationError::Hmac { step, reason })?;
        mac.update(message);
        let mut output = mac.finalize().into_bytes();

        let mut key = [0u8; KEY_LEN];
        let mut chain_code = [0u8; KEY_LEN];
        key.copy_from_slice(&output[..KEY_LEN]);
        chain_code.copy_from_slice(&output[KEY_LEN..]);
        output.as_mut_slice().zeroize();

        Ok(Self { key, chain_code })
    }
}

/// Derives the node at `path` from `seed`.
///
/// The path is validated before the seed is looked at; any path that is not
/// accepted by [`is_valid_path`](crate::is_valid_path) fails with
/// [`DerivationError::InvalidPath`].
pub fn derive_key(seed: &[u8], path: &str) -> Result<DerivedKey, DerivationError> {
    let path: DerivationPath = path.parse().map_err(|_| DerivationError::InvalidPath)?;
    derive_path(seed, &path)
}

/// Derives the node at an already parsed `path` from `seed`.
pub fn derive_path(seed: &[u8], path: &DerivationPath) -> Result<DerivedKey, DerivationError> {
    let key = DerivedKey::master(seed)?.derive_path(path)?;
    debug!(depth = path.depth(), "derived ed25519 key");
    Ok(key)
}
