//! factory/state.rs
//! The immutable per-factory state and its construction.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::constants::{
    MAX_MACHINE_ID, MAX_TIMESTAMP_MS, OVERFLOW_WARN_DAYS, SORTABLE_COUNT_BITS,
};
use crate::crypto::cipher::{self, Cipher128, Cipher64, Cipher96, CipherSet};
use crate::crypto::kdf;
use crate::crypto::types::CryptoError;
use crate::factory::options::InitOptions;
use crate::types::{FactoryError, NonceWidth};
use crate::utils::{days_until_overflow, unix_ms_now};

/// Everything one factory owns: identity bits, the fixed epoch clock, two
/// atomic counter slots, and the per-width cipher contexts. Immutable
/// after construction apart from the atomics.
///
/// `init_at_ms` is read once and never refreshed; a factory whose horizon
/// has passed fails the next init rather than migrating in place.
#[derive(Debug)]
pub struct FactoryState {
    machine_id: u16,
    epoch_ms: i64,
    init_at_ms: u64,
    mono_anchor: Instant,
    counters: [AtomicU64; 2],
    ciphers: CipherSet,
}

impl FactoryState {
    pub(crate) fn create(opts: &InitOptions) -> Result<Self, FactoryError> {
        if opts.machine_id > MAX_MACHINE_ID {
            return Err(FactoryError::MachineIdOutOfRange {
                machine_id: opts.machine_id,
            });
        }

        let init_at = unix_ms_now() - opts.epoch_ms;
        if !(0..=MAX_TIMESTAMP_MS as i64).contains(&init_at) {
            return Err(FactoryError::TimestampOverflow {
                init_at_ms: init_at,
            });
        }
        let init_at_ms = init_at as u64;

        let days = days_until_overflow(init_at_ms);
        if days == 0 {
            return Err(FactoryError::TimestampOverflow {
                init_at_ms: init_at,
            });
        }
        if days <= OVERFLOW_WARN_DAYS {
            tracing::warn!(days, "nonce timestamp overflow in {} days", days);
        }

        let ciphers = build_ciphers(opts)?;

        Ok(FactoryState {
            machine_id: opts.machine_id,
            epoch_ms: opts.epoch_ms,
            init_at_ms,
            mono_anchor: Instant::now(),
            // Slot 0 starts at all-ones so the first post-increment value
            // is zero; slot 1 packs (init_at: 42 | count: 22).
            counters: [
                AtomicU64::new(u64::MAX),
                AtomicU64::new(init_at_ms << SORTABLE_COUNT_BITS),
            ],
            ciphers,
        })
    }

    #[inline]
    pub fn machine_id(&self) -> u16 {
        self.machine_id
    }

    /// Configured epoch as unix milliseconds.
    #[inline]
    pub fn epoch_ms(&self) -> i64 {
        self.epoch_ms
    }

    /// Factory birth time, epoch-relative milliseconds.
    #[inline]
    pub fn init_at_ms(&self) -> u64 {
        self.init_at_ms
    }

    /// Epoch-relative milliseconds now. Monotonic: anchored to the init
    /// instant, so wall-clock adjustments after init cannot move it
    /// backwards.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.init_at_ms + self.mono_anchor.elapsed().as_millis() as u64
    }

    #[inline]
    pub(crate) fn counter(&self, slot: usize) -> &AtomicU64 {
        &self.counters[slot]
    }

    pub fn ciphers(&self) -> &CipherSet {
        &self.ciphers
    }

    /// Overwrite a counter slot. Test scaffolding for wrap and edge cases.
    #[doc(hidden)]
    pub fn seed_counter_slot(&self, slot: usize, value: u64) {
        self.counters[slot].store(value, Ordering::SeqCst);
    }
}

/// Resolve the three cipher selections and build whatever contexts the
/// supplied key material supports. Selection errors (block-size mismatch,
/// missing Speck library) fail init even when no key is present.
fn build_ciphers(opts: &InitOptions) -> Result<CipherSet, CryptoError> {
    let kind64 = opts.cipher64.resolve(NonceWidth::W64)?;
    let kind96 = opts.cipher96.resolve(NonceWidth::W96)?;
    let kind128 = opts.cipher128.resolve(NonceWidth::W128)?;
    cipher::ensure_available(kind64)?;
    cipher::ensure_available(kind96)?;
    cipher::ensure_available(kind128)?;

    if let Some(base) = &opts.base_key {
        kdf::validate_base_key(base)?;
    }
    let base = opts.base_key.as_deref();

    let c64 = match kdf::effective_key(base, opts.key64.as_deref(), kind64, NonceWidth::W64)? {
        Some(key) => Some(Cipher64::from_kind(kind64, &key)?),
        None => None,
    };
    let c96 = match kdf::effective_key(base, opts.key96.as_deref(), kind96, NonceWidth::W96)? {
        Some(key) => Some(Cipher96::from_kind(kind96, &key)?),
        None => None,
    };
    let c128 = match kdf::effective_key(base, opts.key128.as_deref(), kind128, NonceWidth::W128)? {
        Some(key) => Some(Cipher128::from_kind(kind128, &key)?),
        None => None,
    };

    Ok(CipherSet::from_parts(c64, c96, c128))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{COUNTER_SLOT, DEFAULT_EPOCH_MS, MS_PER_DAY, SORTABLE_SLOT};

    #[test]
    fn machine_id_bounds() {
        assert!(FactoryState::create(&InitOptions::new(0)).is_ok());
        assert!(FactoryState::create(&InitOptions::new(511)).is_ok());
        let err = FactoryState::create(&InitOptions::new(512)).unwrap_err();
        assert_eq!(err, FactoryError::MachineIdOutOfRange { machine_id: 512 });
    }

    #[test]
    fn counter_slots_start_per_contract() {
        let state = FactoryState::create(&InitOptions::new(1)).unwrap();
        assert_eq!(state.counter(COUNTER_SLOT).load(Ordering::SeqCst), u64::MAX);
        assert_eq!(
            state.counter(SORTABLE_SLOT).load(Ordering::SeqCst),
            state.init_at_ms() << SORTABLE_COUNT_BITS
        );
    }

    #[test]
    fn exhausted_horizon_fails_init() {
        let epoch = unix_ms_now() - (MAX_TIMESTAMP_MS as i64 + 1);
        let err = FactoryState::create(&InitOptions::new(0).epoch_ms(epoch)).unwrap_err();
        assert!(matches!(err, FactoryError::TimestampOverflow { .. }));
    }

    #[test]
    fn future_epoch_fails_init() {
        let epoch = unix_ms_now() + 10 * MS_PER_DAY as i64;
        let err = FactoryState::create(&InitOptions::new(0).epoch_ms(epoch)).unwrap_err();
        assert!(matches!(err, FactoryError::TimestampOverflow { .. }));
    }

    #[test]
    fn near_horizon_still_initializes() {
        // two days of slack left: warn path, not an error
        let epoch = unix_ms_now() - (MAX_TIMESTAMP_MS as i64 + 1 - 2 * MS_PER_DAY as i64);
        let state = FactoryState::create(&InitOptions::new(0).epoch_ms(epoch)).unwrap();
        let days = days_until_overflow(state.init_at_ms());
        assert!((1..=2).contains(&days));
    }

    #[test]
    fn default_epoch_yields_small_init_at() {
        let state = FactoryState::create(&InitOptions::new(3)).unwrap();
        assert!(state.init_at_ms() < MAX_TIMESTAMP_MS);
        assert_eq!(state.epoch_ms(), DEFAULT_EPOCH_MS);
    }
}
