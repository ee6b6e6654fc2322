//! crypto/types.rs
//! Cipher registry enums, key-size table, and crypto error kinds.

use std::fmt;

use num_enum::TryFromPrimitive;

use crate::constants::{cipher_ids, key_lens, MIN_BASE_KEY_LEN};
use crate::types::NonceWidth;

/// Cipher selection as init accepts it. `Speck` and the generic names
/// resolve to a block-size-matched [`CipherKind`] per width.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CipherChoice {
    /// Default for 64- and 96-bit nonces.
    #[default]
    Blowfish,
    TripleDes,
    /// Only valid for 128-bit nonces.
    Aes,
    /// Resolves to Speck64/128, Speck96/144, or Speck128/256; requires the
    /// `speck` cargo feature.
    Speck,
}

impl CipherChoice {
    /// Resolve the configured choice to a concrete block-size-matched
    /// cipher for `width`.
    ///
    /// # Errors
    ///
    /// `CipherUnsupportedForWidth` when no block-size match exists (AES on
    /// 64/96-bit nonces, Blowfish/3DES on 128-bit nonces).
    pub fn resolve(self, width: NonceWidth) -> Result<CipherKind, CryptoError> {
        let kind = match (self, width) {
            (CipherChoice::Blowfish, NonceWidth::W64 | NonceWidth::W96) => CipherKind::Blowfish,
            (CipherChoice::TripleDes, NonceWidth::W64 | NonceWidth::W96) => CipherKind::TripleDes,
            (CipherChoice::Aes, NonceWidth::W128) => CipherKind::Aes256,
            (CipherChoice::Speck, NonceWidth::W64) => CipherKind::Speck64_128,
            (CipherChoice::Speck, NonceWidth::W96) => CipherKind::Speck96_144,
            (CipherChoice::Speck, NonceWidth::W128) => CipherKind::Speck128_256,
            _ => return Err(CryptoError::CipherUnsupportedForWidth { choice: self, width }),
        };
        Ok(kind)
    }

    /// Default selection per width: Blowfish below 128 bits, AES at 128.
    pub fn default_for(width: NonceWidth) -> Self {
        match width {
            NonceWidth::W64 | NonceWidth::W96 => CipherChoice::Blowfish,
            NonceWidth::W128 => CipherChoice::Aes,
        }
    }
}

/// Concrete cipher registry (ids in `constants::cipher_ids`).
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum CipherKind {
    Blowfish = cipher_ids::BLOWFISH,
    TripleDes = cipher_ids::TRIPLE_DES,
    Aes256 = cipher_ids::AES256,
    Speck64_128 = cipher_ids::SPECK64_128,
    Speck96_144 = cipher_ids::SPECK96_144,
    Speck128_256 = cipher_ids::SPECK128_256,
}

impl CipherKind {
    /// Exact key length this cipher accepts, in bytes.
    pub const fn key_len(self) -> usize {
        match self {
            CipherKind::Blowfish => key_lens::BLOWFISH,
            CipherKind::TripleDes => key_lens::TRIPLE_DES,
            CipherKind::Aes256 => key_lens::AES256,
            CipherKind::Speck64_128 => key_lens::SPECK64_128,
            CipherKind::Speck96_144 => key_lens::SPECK96_144,
            CipherKind::Speck128_256 => key_lens::SPECK128_256,
        }
    }

    /// Block size in bits.
    pub const fn block_bits(self) -> u32 {
        match self {
            CipherKind::Blowfish | CipherKind::TripleDes | CipherKind::Speck64_128 => 64,
            CipherKind::Speck96_144 => 96,
            CipherKind::Aes256 | CipherKind::Speck128_256 => 128,
        }
    }

    /// Stable label, used as the PBKDF2 salt stem for key derivation.
    pub const fn label(self) -> &'static str {
        match self {
            CipherKind::Blowfish => "blowfish",
            CipherKind::TripleDes => "3des",
            CipherKind::Aes256 => "aes-256",
            CipherKind::Speck64_128 => "speck64-128",
            CipherKind::Speck96_144 => "speck96-144",
            CipherKind::Speck128_256 => "speck128-256",
        }
    }

    /// The init-surface selection this concrete cipher belongs to.
    pub const fn choice(self) -> CipherChoice {
        match self {
            CipherKind::Blowfish => CipherChoice::Blowfish,
            CipherKind::TripleDes => CipherChoice::TripleDes,
            CipherKind::Aes256 => CipherChoice::Aes,
            CipherKind::Speck64_128 | CipherKind::Speck96_144 | CipherKind::Speck128_256 => {
                CipherChoice::Speck
            }
        }
    }

    pub const fn is_speck(self) -> bool {
        matches!(
            self,
            CipherKind::Speck64_128 | CipherKind::Speck96_144 | CipherKind::Speck128_256
        )
    }
}

/// Key and cipher configuration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Base key material below the 256-bit floor.
    BaseKeyTooSmall { len: usize },

    /// A per-width override key does not match its cipher's key length.
    KeySizeMismatch {
        kind: CipherKind,
        expected: usize,
        actual: usize,
    },

    /// The selected cipher has no block size matching the nonce width.
    CipherUnsupportedForWidth {
        choice: CipherChoice,
        width: NonceWidth,
    },

    /// Speck was selected but the `speck` cargo feature is not compiled in.
    SpeckUnavailable,

    /// An encryption entry point was called on a width that has no cipher
    /// configured.
    NoCipherConfigured { width: NonceWidth },

    /// A 96-bit input for a 64-bit cipher carried a non-zero 32-bit tail.
    InvalidTail,
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CryptoError::*;
        match self {
            BaseKeyTooSmall { len } => write!(
                f,
                "base key too small: {} bytes (minimum {})",
                len, MIN_BASE_KEY_LEN
            ),
            KeySizeMismatch {
                kind,
                expected,
                actual,
            } => write!(
                f,
                "key size mismatch for {}: expected {} bytes, got {}",
                kind.label(),
                expected,
                actual
            ),
            CipherUnsupportedForWidth { choice, width } => {
                write!(f, "cipher {:?} unsupported for {}-bit nonces", choice, width)
            }
            SpeckUnavailable => {
                write!(f, "speck selected but the `speck` feature is not compiled in")
            }
            NoCipherConfigured { width } => {
                write!(f, "no cipher configured for {}-bit nonces", width)
            }
            InvalidTail => write!(f, "96-bit input must carry a zero 32-bit tail"),
        }
    }
}

impl std::error::Error for CryptoError {}
