//! constants.rs
//! Bit layout, epoch, counter slot indices, and cipher registry ids.

/// Timestamp field width in bits. 2^42 milliseconds is roughly 139 years
/// past the configured epoch.
pub const TIMESTAMP_BITS: u32 = 42;

/// Machine identifier field width in bits (512-node fleet).
pub const MACHINE_ID_BITS: u32 = 9;

/// Highest machine id an init accepts.
pub const MAX_MACHINE_ID: u16 = (1 << MACHINE_ID_BITS) - 1;

/// Highest epoch-relative millisecond value a nonce can carry.
pub const MAX_TIMESTAMP_MS: u64 = (1 << TIMESTAMP_BITS) - 1;

/// Counter field widths per nonce width. The 128-bit variant devotes its
/// entire low quadword to the counter and pads 13 zero bits between the
/// machine id and the counter so all widths share the upper-bit prefix
/// scheme.
pub const COUNTER_BITS_64: u32 = 13;
pub const COUNTER_BITS_96: u32 = 45;
pub const COUNTER_BITS_128: u32 = 64;

/// Per-millisecond emission cap for 64-bit nonces (2^13).
pub const MAX_COUNT_64: u64 = 1 << COUNTER_BITS_64;

/// Default epoch: 2025-01-01T00:00:00Z as unix milliseconds.
pub const DEFAULT_EPOCH_MS: i64 = 1_735_689_600_000;

/// Registry name used when init is not given one.
pub const DEFAULT_FACTORY: &str = "default";

/// Atomic slot indices within `FactoryState::counters`.
pub const COUNTER_SLOT: usize = 0;
pub const SORTABLE_SLOT: usize = 1;

/// The sortable slot packs `(ts: 42 | count: 22)` into one u64.
pub const SORTABLE_COUNT_BITS: u32 = 22;
pub const SORTABLE_COUNT_MASK: u64 = (1 << SORTABLE_COUNT_BITS) - 1;

/// PBKDF2-HMAC-SHA256 work factor for per-width key derivation. The
/// released reference count; deployments pinned to the older 1_000-round
/// schedule change this constant and re-derive.
pub const PBKDF2_ROUNDS: u32 = 50_000;

/// Minimum base key material accepted by init, in bytes.
pub const MIN_BASE_KEY_LEN: usize = 32;

pub const MS_PER_DAY: u64 = 86_400_000;

/// Init warns through the log collaborator when the timestamp horizon is
/// this close (in days).
pub const OVERFLOW_WARN_DAYS: u64 = 365;

/// Cipher identifiers (mirrored in the `CipherKind` registry enum).
pub mod cipher_ids {
    pub const BLOWFISH: u16 = 0x0001;
    pub const TRIPLE_DES: u16 = 0x0002;
    pub const AES256: u16 = 0x0003;
    pub const SPECK64_128: u16 = 0x0101;
    pub const SPECK96_144: u16 = 0x0102;
    pub const SPECK128_256: u16 = 0x0103;
}

/// Cipher key lengths in bytes (mirrored in `CipherKind::key_len`).
pub mod key_lens {
    pub const BLOWFISH: usize = 16;
    pub const TRIPLE_DES: usize = 24;
    pub const AES256: usize = 32;
    pub const SPECK64_128: usize = 16;
    pub const SPECK96_144: usize = 18;
    pub const SPECK128_256: usize = 32;
}
