//! BIP-39 mnemonic to seed conversion.

use bip39::{Language, Mnemonic};
use tracing::debug;

use crate::{keys, DerivationError, KEYPAIR_LEN, PUBLIC_KEY_LEN, SEED_LEN};

/// Converts an English BIP-39 phrase into a [`SEED_LEN`]-byte seed.
///
/// The checksum is validated. `passphrase` defaults to the empty string.
pub fn seed_from_mnemonic(
    phrase: &str,
    passphrase: Option<&str>,
) -> Result<[u8; SEED_LEN], DerivationError> {
    let mnemonic = Mnemonic::parse_in(Language::English, phrase)?;
    debug!(words = mnemonic.word_count(), "parsed mnemonic");
    Ok(mnemonic.to_seed(passphrase.unwrap_or_default()))
}

/// Derives the key pair at `path` straight from a mnemonic phrase.
pub fn keys_from_mnemonic(
    phrase: &str,
    passphrase: Option<&str>,
    path: &str,
) -> Result<([u8; PUBLIC_KEY_LEN], [u8; KEYPAIR_LEN]), DerivationError> {
    let seed = zeroize::Zeroizing::new(seed_from_mnemonic(phrase, passphrase)?);
    keys(seed.as_slice(), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon \
                                    abandon abandon abandon abandon abandon about";

    #[test]
    fn seed_matches_bip39_vector() {
        let seed = seed_from_mnemonic(ABANDON_MNEMONIC, Some("TREZOR")).unwrap();
        assert_eq!(
            hex::encode(seed),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e5349553\
             1f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn passphrase_changes_the_seed() {
        let bare = seed_from_mnemonic(ABANDON_MNEMONIC, None).unwrap();
        let empty = seed_from_mnemonic(ABANDON_MNEMONIC, Some("")).unwrap();
        let salted = seed_from_mnemonic(ABANDON_MNEMONIC, Some("TREZOR")).unwrap();

        assert_eq!(bare, empty);
        assert_ne!(bare, salted);
    }

    #[test]
    fn bad_checksum_is_rejected() {
        let phrase = "abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon abandon";
        assert!(matches!(
            seed_from_mnemonic(phrase, None),
            Err(DerivationError::Mnemonic(_))
        ));
        assert!(matches!(
            seed_from_mnemonic("", None),
            Err(DerivationError::Mnemonic(_))
        ));
    }

    #[test]
    fn keys_from_mnemonic_matches_seed_path() {
        let seed = seed_from_mnemonic(ABANDON_MNEMONIC, None).unwrap();
        let expected = keys(&seed, "m/44'/1901'/0'").unwrap();

        let got = keys_from_mnemonic(ABANDON_MNEMONIC, None, "m/44'/1901'/0'").unwrap();
        assert_eq!(got, expected);

        assert!(matches!(
            keys_from_mnemonic(ABANDON_MNEMONIC, None, "m/44"),
            Err(DerivationError::InvalidPath)
        ));
    }
}
