//! factory/options.rs
//! Init-time configuration surface.

use crate::constants::{DEFAULT_EPOCH_MS, DEFAULT_FACTORY};
use crate::crypto::types::CipherChoice;
use crate::types::NonceWidth;

/// Options accepted by `init`. Everything except `machine_id` has a
/// default: registry name `"default"`, epoch 2025-01-01T00:00:00Z,
/// Blowfish below 128 bits and AES at 128, no key material (encryption
/// entry points stay disabled until a base key or override is supplied).
///
/// # Examples
///
/// ```rust
/// use nonceforge_core::{CipherChoice, InitOptions};
///
/// let opts = InitOptions::new(42)
///     .name("shard-a")
///     .base_key([0xAA; 32])
///     .cipher64(CipherChoice::TripleDes);
/// nonceforge_core::init(opts).unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct InitOptions {
    pub(crate) machine_id: u16,
    pub(crate) name: String,
    pub(crate) epoch_ms: i64,
    pub(crate) base_key: Option<Vec<u8>>,
    pub(crate) key64: Option<Vec<u8>>,
    pub(crate) key96: Option<Vec<u8>>,
    pub(crate) key128: Option<Vec<u8>>,
    pub(crate) cipher64: CipherChoice,
    pub(crate) cipher96: CipherChoice,
    pub(crate) cipher128: CipherChoice,
}

impl InitOptions {
    pub fn new(machine_id: u16) -> Self {
        InitOptions {
            machine_id,
            name: DEFAULT_FACTORY.to_owned(),
            epoch_ms: DEFAULT_EPOCH_MS,
            base_key: None,
            key64: None,
            key96: None,
            key128: None,
            cipher64: CipherChoice::default_for(NonceWidth::W64),
            cipher96: CipherChoice::default_for(NonceWidth::W96),
            cipher128: CipherChoice::default_for(NonceWidth::W128),
        }
    }

    /// Registry key this factory publishes under.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Epoch override as unix milliseconds.
    pub fn epoch_ms(mut self, epoch_ms: i64) -> Self {
        self.epoch_ms = epoch_ms;
        self
    }

    /// Base key material for PBKDF2 derivation; at least 32 bytes.
    pub fn base_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.base_key = Some(key.into());
        self
    }

    /// Replace the derived 64-bit-width key; must match the selected
    /// cipher's key length exactly.
    pub fn key64(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key64 = Some(key.into());
        self
    }

    /// Replace the derived 96-bit-width key.
    pub fn key96(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key96 = Some(key.into());
        self
    }

    /// Replace the derived 128-bit-width key.
    pub fn key128(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key128 = Some(key.into());
        self
    }

    /// Cipher for 64-bit nonces: Blowfish (default), 3DES, or Speck.
    pub fn cipher64(mut self, choice: CipherChoice) -> Self {
        self.cipher64 = choice;
        self
    }

    /// Cipher for 96-bit nonces: Blowfish (default), 3DES, or Speck.
    /// Blowfish and 3DES cover only the leading 64 bits and leave a zero
    /// 32-bit tail; Speck96/144 covers the full width.
    pub fn cipher96(mut self, choice: CipherChoice) -> Self {
        self.cipher96 = choice;
        self
    }

    /// Cipher for 128-bit nonces: AES-256 (default) or Speck.
    pub fn cipher128(mut self, choice: CipherChoice) -> Self {
        self.cipher128 = choice;
        self
    }

    pub fn registry_name(&self) -> &str {
        &self.name
    }
}
