//! crypto/codec.rs
//! Symmetric encrypt/decrypt over previously emitted nonces.
//!
//! The width is recovered from the input length; each width maps 1:1 onto
//! its cipher's block, so the transform is a bijection on the nonce space
//! (distinct plaintexts stay distinct, `decrypt(encrypt(n)) == n`).
//!
//! These primitives are only safe for blocks emitted by this factory: no
//! padding, no authentication, no IV diversification.

use crate::crypto::cipher::{Cipher96, CipherSet};
use crate::crypto::types::CryptoError;
use crate::types::{FactoryError, Nonce, NonceWidth};

/// Encrypt one emitted nonce under the factory's width-matched cipher.
///
/// # Errors
///
/// `InvalidNonceLength` for byte strings that are not 8, 12, or 16 bytes;
/// `NoCipherConfigured` when the recovered width has no cipher;
/// `InvalidTail` for a 96-bit input whose 32-bit tail is non-zero while
/// the configured 96-bit cipher is a wrapped 64-bit primitive.
pub fn encrypt(ciphers: &CipherSet, input: &[u8]) -> Result<Nonce, FactoryError> {
    transform(ciphers, input, Direction::Encrypt)
}

/// Inverse of [`encrypt`] under the same factory state.
pub fn decrypt(ciphers: &CipherSet, input: &[u8]) -> Result<Nonce, FactoryError> {
    transform(ciphers, input, Direction::Decrypt)
}

#[derive(Copy, Clone)]
enum Direction {
    Encrypt,
    Decrypt,
}

fn transform(ciphers: &CipherSet, input: &[u8], dir: Direction) -> Result<Nonce, FactoryError> {
    let width = NonceWidth::from_len(input.len())
        .ok_or(FactoryError::InvalidNonceLength { len: input.len() })?;

    match width {
        NonceWidth::W64 => {
            let cipher = ciphers.cipher64()?;
            let mut block = [0u8; 8];
            block.copy_from_slice(input);
            match dir {
                Direction::Encrypt => cipher.encrypt_block(&mut block),
                Direction::Decrypt => cipher.decrypt_block(&mut block),
            }
            Ok(Nonce::from_raw(width, &block))
        }
        NonceWidth::W96 => transform_96(ciphers.cipher96()?, input, dir),
        NonceWidth::W128 => {
            let cipher = ciphers.cipher128()?;
            let mut block = [0u8; 16];
            block.copy_from_slice(input);
            match dir {
                Direction::Encrypt => cipher.encrypt_block(&mut block),
                Direction::Decrypt => cipher.decrypt_block(&mut block),
            }
            Ok(Nonce::from_raw(width, &block))
        }
    }
}

fn transform_96(cipher: &Cipher96, input: &[u8], dir: Direction) -> Result<Nonce, FactoryError> {
    match cipher {
        Cipher96::Wide64(inner) => {
            // The 64-bit primitive covers only the leading quadword; the
            // tail must already be the zero pad this scheme emits.
            if input[8..12] != [0u8; 4] {
                return Err(CryptoError::InvalidTail.into());
            }
            let mut buf = [0u8; 12];
            let mut block = [0u8; 8];
            block.copy_from_slice(&input[..8]);
            match dir {
                Direction::Encrypt => inner.encrypt_block(&mut block),
                Direction::Decrypt => inner.decrypt_block(&mut block),
            }
            buf[..8].copy_from_slice(&block);
            Ok(Nonce::from_raw(NonceWidth::W96, &buf))
        }
        #[cfg(feature = "speck")]
        Cipher96::Speck(c) => {
            use cipher::generic_array::GenericArray;
            use cipher::{BlockDecrypt, BlockEncrypt};

            let mut block = [0u8; 12];
            block.copy_from_slice(input);
            match dir {
                Direction::Encrypt => c.encrypt_block(GenericArray::from_mut_slice(&mut block)),
                Direction::Decrypt => c.decrypt_block(GenericArray::from_mut_slice(&mut block)),
            }
            Ok(Nonce::from_raw(NonceWidth::W96, &block))
        }
    }
}
