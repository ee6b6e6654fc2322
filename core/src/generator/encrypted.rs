//! generator/encrypted.rs
//! Encrypted nonces: a counter or sortable base passed through the
//! width-matched cipher. Uniqueness survives because the cipher is a
//! bijection on the block; unpredictability is what the cipher adds.

use crate::crypto::codec;
use crate::factory::state::FactoryState;
use crate::generator::counter::counter_nonce;
use crate::generator::sortable::sortable_nonce;
use crate::types::{FactoryError, Nonce, NonceWidth, Variant};

/// Emit one encrypted nonce over a `base`-variant plaintext.
///
/// A 96-bit width configured with a 64-bit cipher takes a 64-bit base
/// nonce, encrypts it, and pads with 32 zero bits: the tail is
/// predictable, but the encrypted 64-bit prefix is itself unique, so no
/// collisions arise. Only a native 96-bit cipher covers all 96 bits.
///
/// The 64-bit path inherits the counter throttle through its base nonce.
///
/// # Errors
///
/// `NoCipherConfigured` when the width has no key material.
pub fn encrypted_nonce(
    state: &FactoryState,
    width: NonceWidth,
    base: Variant,
) -> Result<Nonce, FactoryError> {
    let plain = match width {
        NonceWidth::W96 => {
            let cipher = state.ciphers().cipher96()?;
            if cipher.wraps_64() {
                let inner = base_nonce(state, NonceWidth::W64, base);
                let mut buf = [0u8; 12];
                buf[..8].copy_from_slice(inner.as_bytes());
                Nonce::from_bytes(&buf)?
            } else {
                base_nonce(state, width, base)
            }
        }
        _ => {
            // Fail before burning a counter slot on a width that cannot
            // be encrypted.
            if !state.ciphers().is_configured(width) {
                return Err(crate::crypto::types::CryptoError::NoCipherConfigured { width }.into());
            }
            base_nonce(state, width, base)
        }
    };
    codec::encrypt(state.ciphers(), plain.as_bytes())
}

fn base_nonce(state: &FactoryState, width: NonceWidth, base: Variant) -> Nonce {
    match base {
        Variant::Counter => counter_nonce(state, width),
        Variant::Sortable => sortable_nonce(state, width),
    }
}
