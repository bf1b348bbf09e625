//! Ed25519 key pairs built from derived key material.

use std::{fmt, ops::Deref};

use ed25519_dalek::{SigningKey, KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};

use crate::DerivationError;

/// An ed25519 key pair.
///
/// The private half is the 32-byte seed the key was generated from; the
/// expanded form returned by [`Ed25519KeyPair::private_key`] is
/// `seed || public_key`.
///
/// Implements [`Deref<Target = SigningKey>`] for access to signing methods.
#[derive(Clone)]
pub struct Ed25519KeyPair(SigningKey);

impl Deref for Ed25519KeyPair {
    type Target = SigningKey;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ed25519KeyPair")
            .field(&self.0.verifying_key())
            .finish()
    }
}

impl From<SigningKey> for Ed25519KeyPair {
    fn from(value: SigningKey) -> Self {
        Self(value)
    }
}

impl Ed25519KeyPair {
    /// Deterministically generates the key pair for a 32-byte seed.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self(SigningKey::from_bytes(seed))
    }

    /// Rebuilds a key pair from its expanded `seed || public_key` form.
    ///
    /// Fails if the public half does not belong to the seed half.
    pub fn from_private_key(bytes: &[u8; KEYPAIR_LENGTH]) -> Result<Self, DerivationError> {
        Ok(Self(SigningKey::from_keypair_bytes(bytes)?))
    }

    /// The 32-byte public key.
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0.verifying_key().to_bytes()
    }

    /// The 64-byte expanded private key, `seed || public_key`.
    pub fn private_key(&self) -> [u8; KEYPAIR_LENGTH] {
        self.0.to_keypair_bytes()
    }

    /// Consumes the pair, returning the inner [`SigningKey`].
    pub fn into_inner(self) -> SigningKey {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signer, Verifier};

    use super::*;

    #[test]
    fn private_key_is_seed_then_public_key() {
        let pair = Ed25519KeyPair::from_seed(&[7u8; 32]);
        let private = pair.private_key();

        assert_eq!(private[..32], [7u8; 32]);
        assert_eq!(private[32..], pair.public_key());
    }

    #[test]
    fn private_key_roundtrip() {
        let pair = Ed25519KeyPair::from_seed(&[9u8; 32]);
        let rebuilt = Ed25519KeyPair::from_private_key(&pair.private_key()).unwrap();
        assert_eq!(rebuilt.public_key(), pair.public_key());
    }

    #[test]
    fn mismatched_public_half_is_rejected() {
        let mut bytes = Ed25519KeyPair::from_seed(&[9u8; 32]).private_key();
        let other = Ed25519KeyPair::from_seed(&[10u8; 32]).public_key();
        bytes[32..].copy_from_slice(&other);

        assert!(matches!(
            Ed25519KeyPair::from_private_key(&bytes),
            Err(DerivationError::KeyGeneration(_))
        ));
    }

    #[test]
    fn signs_through_deref() {
        let pair = Ed25519KeyPair::from_seed(&[1u8; 32]);
        let message = b"test message";

        let signature = pair.sign(message);
        assert!(pair.verifying_key().verify(message, &signature).is_ok());
        assert!(pair.verifying_key().verify(b"other", &signature).is_err());
    }

    #[test]
    fn debug_shows_only_the_public_key() {
        let pair = Ed25519KeyPair::from_seed(&[3u8; 32]);
        let rendered = format!("{pair:?}");
        assert!(rendered.starts_with("Ed25519KeyPair"));
        assert!(!rendered.contains(&format!("{:?}", [3u8; 32])));
    }
}
