//! crypto/kdf.rs
//! PBKDF2-based per-width key derivation from the base key.
//!
//! Design:
//! - PBKDF2-HMAC-SHA256(base_key, salt = "label/width", PBKDF2_ROUNDS)
//!   stretched to the target cipher's exact key length.
//! - The width tag in the salt keeps the 64- and 96-bit keys independent
//!   even when both widths run the same 64-bit cipher.
//! - Per-width override keys skip derivation entirely and must match the
//!   cipher's key length exactly.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::constants::{MIN_BASE_KEY_LEN, PBKDF2_ROUNDS};
use crate::crypto::types::{CipherKind, CryptoError};
use crate::types::NonceWidth;

/// Base key material must clear the 256-bit floor before any derivation.
pub fn validate_base_key(base_key: &[u8]) -> Result<(), CryptoError> {
    if base_key.len() < MIN_BASE_KEY_LEN {
        return Err(CryptoError::BaseKeyTooSmall {
            len: base_key.len(),
        });
    }
    Ok(())
}

/// An override key replaces the derived key verbatim, so its length must
/// match the cipher's schedule exactly.
pub fn validate_override_key(kind: CipherKind, key: &[u8]) -> Result<(), CryptoError> {
    if key.len() != kind.key_len() {
        return Err(CryptoError::KeySizeMismatch {
            kind,
            expected: kind.key_len(),
            actual: key.len(),
        });
    }
    Ok(())
}

/// Derive the key for `(kind, width)` from validated base key material.
pub fn derive_width_key(base_key: &[u8], kind: CipherKind, width: NonceWidth) -> Vec<u8> {
    let salt = format!("{}/{}", kind.label(), width.bits());
    let mut key = vec![0u8; kind.key_len()];
    pbkdf2_hmac::<Sha256>(base_key, salt.as_bytes(), PBKDF2_ROUNDS, &mut key);
    key
}

/// Pick the effective key for `(kind, width)`: a validated override wins,
/// otherwise derive from the base key, otherwise `None` (the width stays
/// cipher-less).
pub fn effective_key(
    base_key: Option<&[u8]>,
    override_key: Option<&[u8]>,
    kind: CipherKind,
    width: NonceWidth,
) -> Result<Option<Vec<u8>>, CryptoError> {
    if let Some(key) = override_key {
        validate_override_key(kind, key)?;
        return Ok(Some(key.to_vec()));
    }
    match base_key {
        Some(base) => Ok(Some(derive_width_key(base, kind, width))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: [u8; 32] = [0xAA; 32];

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_width_key(&BASE, CipherKind::Blowfish, NonceWidth::W64);
        let b = derive_width_key(&BASE, CipherKind::Blowfish, NonceWidth::W64);
        assert_eq!(a, b);
        assert_eq!(a.len(), CipherKind::Blowfish.key_len());
    }

    #[test]
    fn widths_get_independent_keys_for_the_same_cipher() {
        let k64 = derive_width_key(&BASE, CipherKind::Blowfish, NonceWidth::W64);
        let k96 = derive_width_key(&BASE, CipherKind::Blowfish, NonceWidth::W96);
        assert_ne!(k64, k96);
    }

    #[test]
    fn base_key_floor_enforced() {
        assert!(validate_base_key(&[0u8; 32]).is_ok());
        let err = validate_base_key(&[0u8; 31]).unwrap_err();
        assert_eq!(err, CryptoError::BaseKeyTooSmall { len: 31 });
    }

    #[test]
    fn override_key_must_match_exactly() {
        assert!(validate_override_key(CipherKind::TripleDes, &[0u8; 24]).is_ok());
        let err = validate_override_key(CipherKind::TripleDes, &[0u8; 32]).unwrap_err();
        assert_eq!(
            err,
            CryptoError::KeySizeMismatch {
                kind: CipherKind::TripleDes,
                expected: 24,
                actual: 32
            }
        );
    }
}
