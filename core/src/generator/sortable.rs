//! generator/sortable.rs
//! Sortable nonces: the 42-bit prefix is the true emission timestamp.
//!
//! The second atomic slot packs `(ts: 42 | count: 22)`. Within one
//! millisecond, fetch-add hands out counter values; on a millisecond
//! edge the first thread to notice resets the whole packed word with a
//! compare-exchange and emits count zero. CAS losers retry; the race
//! window is one fetch-add wide, so retries are rare, but the loop is
//! deliberately unbounded.

use std::sync::atomic::Ordering;

use crate::constants::{MAX_COUNT_64, SORTABLE_COUNT_BITS, SORTABLE_COUNT_MASK, SORTABLE_SLOT};
use crate::factory::state::FactoryState;
use crate::types::{Nonce, NonceWidth};

/// Emit one sortable nonce. Byte-lexicographic order of the results
/// matches `(timestamp, machine_id, counter)` order, so values sort by
/// emission time across a cluster within clock-skew bounds.
///
/// The 22-bit packed count is wider than the 13-bit counter field of a
/// 64-bit nonce; the surplus is a saturation buffer, and the width-gated
/// check below turns saturation into a retry instead of a collision.
/// That caps 64-bit sortable output at 8192 per millisecond per node;
/// wider counter fields absorb the full 22 bits and never hit the cap.
pub fn sortable_nonce(state: &FactoryState, width: NonceWidth) -> Nonce {
    let slot = state.counter(SORTABLE_SLOT);
    loop {
        let packed = slot.fetch_add(1, Ordering::AcqRel).wrapping_add(1);
        let current_ts = packed >> SORTABLE_COUNT_BITS;
        let new_count = packed & SORTABLE_COUNT_MASK;
        let now = state.now_ms();

        if now > current_ts {
            // Millisecond edge: reset the packed word to (now, 0).
            if slot
                .compare_exchange(
                    packed,
                    now << SORTABLE_COUNT_BITS,
                    Ordering::AcqRel,
                    Ordering::Relaxed,
                )
                .is_ok()
            {
                return Nonce::from_fields(width, now, state.machine_id(), 0);
            }
            continue;
        }

        if width == NonceWidth::W64 && new_count >= MAX_COUNT_64 {
            continue;
        }
        return Nonce::from_fields(width, current_ts, state.machine_id(), new_count);
    }
}
