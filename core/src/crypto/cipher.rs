//! crypto/cipher.rs
//! Width-matched block-cipher contexts.
//!
//! Design:
//! - One context per nonce width, pre-initialized at init so the hot path
//!   runs a single key-scheduled block permutation per nonce.
//! - 3DES is the exception: it keeps the raw key and runs its schedule per
//!   call (CBC with a zero IV over a single 8-byte block is exactly the
//!   raw block permutation, so no mode wrapper is involved).
//! - A 96-bit width configured with a 64-bit cipher wraps that cipher;
//!   the codec encrypts the leading 64 bits and leaves the zero tail.
//!
//! All contexts are stateless block permutations behind `&self`, safe to
//! share across threads without pooling.

use aes::Aes256;
use blowfish::Blowfish;
use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use des::TdesEde3;

#[cfg(feature = "speck")]
use speck_cipher::{Speck128_256, Speck64_128, Speck96_144};

use crate::crypto::types::{CipherKind, CryptoError};
use crate::types::NonceWidth;

/// Fail init when a selected cipher's library is not compiled in.
pub fn ensure_available(kind: CipherKind) -> Result<(), CryptoError> {
    if kind.is_speck() && !cfg!(feature = "speck") {
        return Err(CryptoError::SpeckUnavailable);
    }
    Ok(())
}

fn key_mismatch(kind: CipherKind, key: &[u8]) -> CryptoError {
    CryptoError::KeySizeMismatch {
        kind,
        expected: kind.key_len(),
        actual: key.len(),
    }
}

/// Blowfish schedules any 4..=56-byte key, so the exact-length rule is
/// enforced here rather than left to the library.
fn check_key_len(kind: CipherKind, key: &[u8]) -> Result<(), CryptoError> {
    if key.len() != kind.key_len() {
        return Err(key_mismatch(kind, key));
    }
    Ok(())
}

fn width_mismatch(kind: CipherKind, width: NonceWidth) -> CryptoError {
    CryptoError::CipherUnsupportedForWidth {
        choice: kind.choice(),
        width,
    }
}

/// 64-bit block permutation.
#[derive(Debug)]
pub enum Cipher64 {
    Blowfish(Blowfish),
    /// Keeps the raw key; the schedule runs per call.
    TripleDes { key: [u8; 24] },
    #[cfg(feature = "speck")]
    Speck(Speck64_128),
}

impl Cipher64 {
    pub fn from_kind(kind: CipherKind, key: &[u8]) -> Result<Self, CryptoError> {
        match kind {
            CipherKind::Blowfish => {
                check_key_len(kind, key)?;
                Blowfish::new_from_slice(key)
                    .map(Cipher64::Blowfish)
                    .map_err(|_| key_mismatch(kind, key))
            }
            CipherKind::TripleDes => {
                let key: [u8; 24] = key.try_into().map_err(|_| key_mismatch(kind, key))?;
                Ok(Cipher64::TripleDes { key })
            }
            #[cfg(feature = "speck")]
            CipherKind::Speck64_128 => Speck64_128::new_from_slice(key)
                .map(Cipher64::Speck)
                .map_err(|_| key_mismatch(kind, key)),
            #[cfg(not(feature = "speck"))]
            CipherKind::Speck64_128 => Err(CryptoError::SpeckUnavailable),
            _ => Err(width_mismatch(kind, NonceWidth::W64)),
        }
    }

    #[inline]
    pub fn encrypt_block(&self, block: &mut [u8; 8]) {
        match self {
            Cipher64::Blowfish(c) => c.encrypt_block(GenericArray::from_mut_slice(block)),
            Cipher64::TripleDes { key } => {
                TdesEde3::new(GenericArray::from_slice(key))
                    .encrypt_block(GenericArray::from_mut_slice(block));
            }
            #[cfg(feature = "speck")]
            Cipher64::Speck(c) => c.encrypt_block(GenericArray::from_mut_slice(block)),
        }
    }

    #[inline]
    pub fn decrypt_block(&self, block: &mut [u8; 8]) {
        match self {
            Cipher64::Blowfish(c) => c.decrypt_block(GenericArray::from_mut_slice(block)),
            Cipher64::TripleDes { key } => {
                TdesEde3::new(GenericArray::from_slice(key))
                    .decrypt_block(GenericArray::from_mut_slice(block));
            }
            #[cfg(feature = "speck")]
            Cipher64::Speck(c) => c.decrypt_block(GenericArray::from_mut_slice(block)),
        }
    }
}

/// 96-bit handling: either a native 96-bit block cipher or a wrapped
/// 64-bit cipher that covers only the leading quadword.
#[derive(Debug)]
pub enum Cipher96 {
    Wide64(Cipher64),
    #[cfg(feature = "speck")]
    Speck(Speck96_144),
}

impl Cipher96 {
    pub fn from_kind(kind: CipherKind, key: &[u8]) -> Result<Self, CryptoError> {
        match kind {
            CipherKind::Blowfish | CipherKind::TripleDes => {
                Cipher64::from_kind(kind, key).map(Cipher96::Wide64)
            }
            #[cfg(feature = "speck")]
            CipherKind::Speck96_144 => Speck96_144::new_from_slice(key)
                .map(Cipher96::Speck)
                .map_err(|_| key_mismatch(kind, key)),
            #[cfg(not(feature = "speck"))]
            CipherKind::Speck96_144 => Err(CryptoError::SpeckUnavailable),
            _ => Err(width_mismatch(kind, NonceWidth::W96)),
        }
    }

    /// True when this width runs a 64-bit primitive and therefore carries
    /// the 32-bit zero tail.
    pub fn wraps_64(&self) -> bool {
        match self {
            Cipher96::Wide64(_) => true,
            #[cfg(feature = "speck")]
            Cipher96::Speck(_) => false,
        }
    }
}

/// 128-bit block permutation.
#[derive(Debug)]
pub enum Cipher128 {
    Aes(Aes256),
    #[cfg(feature = "speck")]
    Speck(Speck128_256),
}

impl Cipher128 {
    pub fn from_kind(kind: CipherKind, key: &[u8]) -> Result<Self, CryptoError> {
        match kind {
            CipherKind::Aes256 => Aes256::new_from_slice(key)
                .map(Cipher128::Aes)
                .map_err(|_| key_mismatch(kind, key)),
            #[cfg(feature = "speck")]
            CipherKind::Speck128_256 => Speck128_256::new_from_slice(key)
                .map(Cipher128::Speck)
                .map_err(|_| key_mismatch(kind, key)),
            #[cfg(not(feature = "speck"))]
            CipherKind::Speck128_256 => Err(CryptoError::SpeckUnavailable),
            _ => Err(width_mismatch(kind, NonceWidth::W128)),
        }
    }

    #[inline]
    pub fn encrypt_block(&self, block: &mut [u8; 16]) {
        match self {
            Cipher128::Aes(c) => c.encrypt_block(GenericArray::from_mut_slice(block)),
            #[cfg(feature = "speck")]
            Cipher128::Speck(c) => c.encrypt_block(GenericArray::from_mut_slice(block)),
        }
    }

    #[inline]
    pub fn decrypt_block(&self, block: &mut [u8; 16]) {
        match self {
            Cipher128::Aes(c) => c.decrypt_block(GenericArray::from_mut_slice(block)),
            #[cfg(feature = "speck")]
            Cipher128::Speck(c) => c.decrypt_block(GenericArray::from_mut_slice(block)),
        }
    }
}

/// The three per-width contexts a factory owns. A width with no key
/// material stays `None` and rejects encryption entry points.
#[derive(Default)]
#[derive(Debug)]
pub struct CipherSet {
    c64: Option<Cipher64>,
    c96: Option<Cipher96>,
    c128: Option<Cipher128>,
}

impl CipherSet {
    pub(crate) fn from_parts(
        c64: Option<Cipher64>,
        c96: Option<Cipher96>,
        c128: Option<Cipher128>,
    ) -> Self {
        CipherSet { c64, c96, c128 }
    }

    pub fn cipher64(&self) -> Result<&Cipher64, CryptoError> {
        self.c64.as_ref().ok_or(CryptoError::NoCipherConfigured {
            width: NonceWidth::W64,
        })
    }

    pub fn cipher96(&self) -> Result<&Cipher96, CryptoError> {
        self.c96.as_ref().ok_or(CryptoError::NoCipherConfigured {
            width: NonceWidth::W96,
        })
    }

    pub fn cipher128(&self) -> Result<&Cipher128, CryptoError> {
        self.c128.as_ref().ok_or(CryptoError::NoCipherConfigured {
            width: NonceWidth::W128,
        })
    }

    pub fn is_configured(&self, width: NonceWidth) -> bool {
        match width {
            NonceWidth::W64 => self.c64.is_some(),
            NonceWidth::W96 => self.c96.is_some(),
            NonceWidth::W128 => self.c128.is_some(),
        }
    }
}
