//! types.rs
//! Nonce widths, the nonce value type, and factory error kinds.

use std::fmt;

use byteorder::{BigEndian, ByteOrder};
use num_enum::TryFromPrimitive;

use crate::constants::{
    COUNTER_BITS_128, COUNTER_BITS_64, COUNTER_BITS_96, MACHINE_ID_BITS, TIMESTAMP_BITS,
};
use crate::crypto::types::CryptoError;

/// Supported nonce widths (registry of the three product variants' sizes).
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum NonceWidth {
    W64 = 64,
    W96 = 96,
    W128 = 128,
}

impl NonceWidth {
    /// Width in bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self as u16 as u32
    }

    /// Width in bytes.
    #[inline]
    pub const fn len(self) -> usize {
        self.bits() as usize / 8
    }

    /// Counter field width in bits for this nonce width.
    #[inline]
    pub const fn counter_bits(self) -> u32 {
        match self {
            NonceWidth::W64 => COUNTER_BITS_64,
            NonceWidth::W96 => COUNTER_BITS_96,
            NonceWidth::W128 => COUNTER_BITS_128,
        }
    }

    /// Mask covering the counter field.
    #[inline]
    pub const fn counter_mask(self) -> u64 {
        match self {
            NonceWidth::W128 => u64::MAX,
            w => (1 << w.counter_bits()) - 1,
        }
    }

    /// Recover a width from a raw byte-string length.
    #[inline]
    pub const fn from_len(len: usize) -> Option<Self> {
        match len {
            8 => Some(NonceWidth::W64),
            12 => Some(NonceWidth::W96),
            16 => Some(NonceWidth::W128),
            _ => None,
        }
    }
}

impl fmt::Display for NonceWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Which generator an encrypted nonce wraps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Counter,
    Sortable,
}

/// A fixed-width nonce: big-endian `(timestamp: 42 | machine_id: 9 | counter)`
/// bit string. Stored in a 16-byte buffer of which the leading
/// `width.len()` bytes are significant.
///
/// Byte-lexicographic comparison of same-width nonces matches
/// `(timestamp, machine_id, counter)` order, which is what makes sortable
/// nonces sortable.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Nonce {
    width: NonceWidth,
    buf: [u8; 16],
}

impl Nonce {
    /// Assemble a nonce from its layout fields.
    ///
    /// `counter` must fit the width's counter field and `timestamp_ms` the
    /// 42-bit timestamp field; generator code upholds both.
    #[inline]
    pub(crate) fn from_fields(
        width: NonceWidth,
        timestamp_ms: u64,
        machine_id: u16,
        counter: u64,
    ) -> Self {
        debug_assert!(timestamp_ms >> TIMESTAMP_BITS == 0);
        debug_assert!(counter & !width.counter_mask() == 0);

        let mut buf = [0u8; 16];
        match width {
            NonceWidth::W64 => {
                let v = (timestamp_ms << (MACHINE_ID_BITS + COUNTER_BITS_64))
                    | ((machine_id as u64) << COUNTER_BITS_64)
                    | counter;
                BigEndian::write_u64(&mut buf[..8], v);
            }
            NonceWidth::W96 => {
                let v = ((timestamp_ms as u128) << (MACHINE_ID_BITS + COUNTER_BITS_96))
                    | ((machine_id as u128) << COUNTER_BITS_96)
                    | counter as u128;
                BigEndian::write_uint128(&mut buf[..12], v, 12);
            }
            NonceWidth::W128 => {
                // 13 zero bits sit between the machine id and the 64-bit
                // counter so the upper 61 bits line up with the other widths.
                let v = ((timestamp_ms as u128) << 86)
                    | ((machine_id as u128) << 77)
                    | counter as u128;
                BigEndian::write_u128(&mut buf, v);
            }
        }
        Nonce { width, buf }
    }

    /// Wrap raw bytes already known to be `width.len()` long.
    #[inline]
    pub(crate) fn from_raw(width: NonceWidth, bytes: &[u8]) -> Self {
        let mut buf = [0u8; 16];
        buf[..width.len()].copy_from_slice(bytes);
        Nonce { width, buf }
    }

    /// Build a nonce from an opaque byte string, recovering the width from
    /// the length.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError::InvalidNonceLength` for lengths other than
    /// 8, 12, or 16 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FactoryError> {
        let width = NonceWidth::from_len(bytes.len())
            .ok_or(FactoryError::InvalidNonceLength { len: bytes.len() })?;
        Ok(Self::from_raw(width, bytes))
    }

    #[inline]
    pub fn width(&self) -> NonceWidth {
        self.width
    }

    /// The significant bytes, big-endian, MSB first.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.width.len()]
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Epoch-relative milliseconds from the leading 42 bits.
    #[inline]
    pub fn timestamp_ms(&self) -> u64 {
        BigEndian::read_u64(&self.buf[..8]) >> (64 - TIMESTAMP_BITS)
    }

    /// Machine id from bits [42..51).
    #[inline]
    pub fn machine_id(&self) -> u16 {
        ((BigEndian::read_u64(&self.buf[..8]) >> (64 - TIMESTAMP_BITS - MACHINE_ID_BITS))
            & ((1 << MACHINE_ID_BITS) - 1)) as u16
    }

    /// Counter field value.
    #[inline]
    pub fn counter(&self) -> u64 {
        match self.width {
            NonceWidth::W64 => BigEndian::read_u64(&self.buf[..8]) & NonceWidth::W64.counter_mask(),
            NonceWidth::W96 => {
                BigEndian::read_uint128(&self.buf[..12], 12) as u64 & NonceWidth::W96.counter_mask()
            }
            NonceWidth::W128 => BigEndian::read_u64(&self.buf[8..16]),
        }
    }
}

impl PartialOrd for Nonce {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Nonce {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.as_bytes() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce{}({})", self.width, self)
    }
}

impl AsRef<[u8]> for Nonce {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Error kinds surfaced by init, the generators, and the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// A generator or codec entry point named a factory that was never
    /// registered.
    FactoryNotInitialized { name: String },

    /// Machine id outside [0, 511].
    MachineIdOutOfRange { machine_id: u16 },

    /// Epoch-relative init timestamp does not fit 42 bits, or the horizon
    /// is already exhausted.
    TimestampOverflow { init_at_ms: i64 },

    /// Byte string handed to the codec is not 8, 12, or 16 bytes.
    InvalidNonceLength { len: usize },

    /// Key or cipher configuration failure.
    Crypto(CryptoError),
}

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FactoryError::*;
        match self {
            FactoryNotInitialized { name } => {
                write!(f, "factory {:?} is not initialized", name)
            }
            MachineIdOutOfRange { machine_id } => {
                write!(f, "machine id {} out of range [0, 511]", machine_id)
            }
            TimestampOverflow { init_at_ms } => write!(
                f,
                "init timestamp {} ms exhausts the 42-bit horizon",
                init_at_ms
            ),
            InvalidNonceLength { len } => {
                write!(f, "invalid nonce length: {} bytes (expected 8, 12, or 16)", len)
            }
            Crypto(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FactoryError {}

impl From<CryptoError> for FactoryError {
    fn from(e: CryptoError) -> Self {
        FactoryError::Crypto(e)
    }
}
