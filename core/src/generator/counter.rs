//! generator/counter.rs
//! The counter-nonce hot path: one atomic fetch-add per nonce.
//!
//! The single post-increment value is sliced into `(cycle, count)`;
//! concurrent threads serialize on the atomic only, and every thread
//! obtains a distinct slot. Splitting across two atomics would open a
//! read-modify gap between the fields and is rejected.

use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use crate::constants::COUNTER_SLOT;
use crate::factory::state::FactoryState;
use crate::types::{Nonce, NonceWidth};

/// Emit one counter nonce.
///
/// The 42-bit prefix is `init_at + cycle`: the timestamp field is an
/// extension of the counter, not a reading of the clock. The 64-bit
/// variant throttles so the embedded timestamp never predates real time
/// (sustained overdrive pays milliseconds forward and sleeps them off,
/// capping emission at 2^13 per millisecond). The 45-bit counter of the
/// 96-bit variant cycles far too slowly to need the same rule, and the
/// 128-bit variant's timestamp is pinned to the factory birth time.
#[inline]
pub fn counter_nonce(state: &FactoryState, width: NonceWidth) -> Nonce {
    // AcqRel, not Relaxed: emission order must match counter order
    // across threads.
    let c = state
        .counter(COUNTER_SLOT)
        .fetch_add(1, Ordering::AcqRel)
        .wrapping_add(1);

    match width {
        NonceWidth::W64 | NonceWidth::W96 => {
            let k = width.counter_bits();
            let count = c & width.counter_mask();
            let cycle = c >> k;
            let timestamp = state.init_at_ms() + cycle;
            if width == NonceWidth::W64 {
                throttle(state, timestamp);
            }
            Nonce::from_fields(width, timestamp, state.machine_id(), count)
        }
        NonceWidth::W128 => Nonce::from_fields(width, state.init_at_ms(), state.machine_id(), c),
    }
}

/// Hold emission until the wall catches up with the embedded timestamp.
/// A sleep, not a spin: under contention every waiter computes the same
/// delta, and spinning would hotspot the clock.
#[inline]
fn throttle(state: &FactoryState, timestamp: u64) {
    let now = state.now_ms();
    if timestamp > now {
        thread::sleep(Duration::from_millis(timestamp - now));
    }
}
