//! Name-keyed entry point functions.
//!
//! `init` validates and publishes a factory; everything else looks the
//! factory up by registry name and delegates. All entry points are safe
//! to call concurrently from any thread without caller-side
//! coordination.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::crypto::codec;
use crate::factory::options::InitOptions;
use crate::factory::registry;
use crate::factory::state::FactoryState;
use crate::generator;
use crate::types::{FactoryError, Nonce, NonceWidth, Variant};

/// Validate `opts`, construct the factory state, and publish it under the
/// configured registry name. Publishing twice under one name replaces the
/// prior factory atomically with respect to readers.
///
/// # Errors
///
/// `MachineIdOutOfRange`, `TimestampOverflow`, and the key/cipher
/// configuration kinds wrapped in `FactoryError::Crypto`.
///
/// # Examples
///
/// ```rust
/// use nonceforge_core::{InitOptions, NonceWidth};
///
/// nonceforge_core::init(InitOptions::new(7).name("docs")).unwrap();
/// let n = nonceforge_core::nonce("docs", NonceWidth::W64).unwrap();
/// assert_eq!(n.machine_id(), 7);
/// ```
pub fn init(opts: InitOptions) -> Result<(), FactoryError> {
    let state = FactoryState::create(&opts)?;
    registry::publish(opts.registry_name(), state);
    Ok(())
}

/// Emit one counter nonce from the named factory: fast, unique,
/// predictable. One atomic increment; the 64-bit width may additionally
/// sleep off counter overdrive.
///
/// # Errors
///
/// `FactoryNotInitialized`.
pub fn nonce(name: &str, width: NonceWidth) -> Result<Nonce, FactoryError> {
    let state = registry::get(name)?;
    Ok(generator::counter_nonce(&state, width))
}

/// Emit one sortable nonce: the leading 42 bits are the emission
/// timestamp, so outputs sort byte-lexicographically by time across the
/// fleet.
///
/// # Errors
///
/// `FactoryNotInitialized`.
///
/// # Examples
///
/// ```rust
/// use nonceforge_core::{InitOptions, NonceWidth};
///
/// nonceforge_core::init(InitOptions::new(1).name("sortable-docs")).unwrap();
/// let a = nonceforge_core::sortable_nonce("sortable-docs", NonceWidth::W64).unwrap();
/// let b = nonceforge_core::sortable_nonce("sortable-docs", NonceWidth::W64).unwrap();
/// assert!(a < b);
/// ```
pub fn sortable_nonce(name: &str, width: NonceWidth) -> Result<Nonce, FactoryError> {
    let state = registry::get(name)?;
    Ok(generator::sortable_nonce(&state, width))
}

/// Emit one encrypted nonce: a `base`-variant nonce passed through the
/// width-matched cipher, unique and unpredictable.
///
/// # Errors
///
/// `FactoryNotInitialized`, `NoCipherConfigured`.
///
/// # Examples
///
/// ```rust
/// use nonceforge_core::{InitOptions, NonceWidth, Variant};
///
/// nonceforge_core::init(
///     InitOptions::new(1).name("encrypted-docs").base_key([0xAA; 32]),
/// )
/// .unwrap();
///
/// let c = nonceforge_core::encrypted_nonce(
///     "encrypted-docs",
///     NonceWidth::W128,
///     Variant::Counter,
/// )
/// .unwrap();
/// let p = nonceforge_core::decrypt("encrypted-docs", c.as_bytes()).unwrap();
/// assert_eq!(p.machine_id(), 1);
/// ```
pub fn encrypted_nonce(
    name: &str,
    width: NonceWidth,
    base: Variant,
) -> Result<Nonce, FactoryError> {
    let state = registry::get(name)?;
    generator::encrypted_nonce(&state, width, base)
}

/// Encrypt a previously emitted nonce under the named factory's cipher
/// for its width (recovered from the input length).
///
/// Only safe for blocks emitted by this factory: no padding, no
/// authentication, no IV diversification.
///
/// # Errors
///
/// `FactoryNotInitialized`, `NoCipherConfigured`, `InvalidNonceLength`,
/// and `InvalidTail` for a 96-bit input without its zero tail.
///
/// # Examples
///
/// ```rust
/// use nonceforge_core::{InitOptions, NonceWidth};
///
/// nonceforge_core::init(
///     InitOptions::new(0).name("codec-docs").base_key([0xAA; 32]),
/// )
/// .unwrap();
///
/// let p = nonceforge_core::nonce("codec-docs", NonceWidth::W64).unwrap();
/// let c = nonceforge_core::encrypt("codec-docs", p.as_bytes()).unwrap();
/// assert_eq!(nonceforge_core::decrypt("codec-docs", c.as_bytes()).unwrap(), p);
/// ```
pub fn encrypt(name: &str, input: &[u8]) -> Result<Nonce, FactoryError> {
    codec::encrypt(registry::get(name)?.ciphers(), input)
}

/// Inverse of [`encrypt`] under the same factory configuration.
///
/// # Errors
///
/// As [`encrypt`].
pub fn decrypt(name: &str, input: &[u8]) -> Result<Nonce, FactoryError> {
    codec::decrypt(registry::get(name)?.ciphers(), input)
}

/// Resolve a sortable nonce's leading 42 bits against the named
/// factory's epoch.
///
/// # Errors
///
/// `FactoryNotInitialized`; `TimestampOverflow` when the configured
/// epoch puts the instant outside the representable datetime range.
///
/// # Examples
///
/// ```rust
/// use chrono::Datelike;
/// use nonceforge_core::{InitOptions, NonceWidth};
///
/// nonceforge_core::init(InitOptions::new(0).name("datetime-docs")).unwrap();
/// let n = nonceforge_core::sortable_nonce("datetime-docs", NonceWidth::W64).unwrap();
/// let dt = nonceforge_core::get_datetime("datetime-docs", &n).unwrap();
/// assert!(dt.year() >= 2025);
/// ```
pub fn get_datetime(name: &str, nonce: &Nonce) -> Result<DateTime<Utc>, FactoryError> {
    let state = registry::get(name)?;
    let unix_ms = state.epoch_ms() + nonce.timestamp_ms() as i64;
    DateTime::from_timestamp_millis(unix_ms).ok_or(FactoryError::TimestampOverflow {
        init_at_ms: unix_ms,
    })
}

/// True when `name` has a published factory.
pub fn is_initialized(name: &str) -> bool {
    registry::is_initialized(name)
}

/// Fetch the named factory state itself, for callers that want to hold
/// the `Arc` across many emissions instead of paying a registry read per
/// call.
///
/// # Errors
///
/// `FactoryNotInitialized`.
pub fn get_factory(name: &str) -> Result<Arc<FactoryState>, FactoryError> {
    registry::get(name)
}
