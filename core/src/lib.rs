//! nonceforge-core
//!
//! A locally-unique nonce factory: 64-, 96-, and 128-bit identifiers,
//! unique within a bounded fleet, at tens of millions per second per
//! node. Every nonce is a big-endian `(timestamp: 42 | machine_id: 9 |
//! counter)` bit string relative to a configured epoch.
//!
//! Three variants per width:
//!
//! - **counter** ([`nonce`]): fast, unique, predictable; one atomic
//!   fetch-add per emission.
//! - **sortable** ([`sortable_nonce`]): the 42-bit prefix is the true
//!   emission time, so byte order is time order across a cluster.
//! - **encrypted** ([`encrypted_nonce`]): a counter or sortable base
//!   passed through a block cipher whose block size matches the nonce
//!   width, keeping the mapping 1:1.
//!
//! Factories are named, published once into a process-global registry,
//! and immutable thereafter apart from their two atomic counter slots.
//!
//! ```rust
//! use nonceforge_core::{InitOptions, NonceWidth};
//!
//! nonceforge_core::init(InitOptions::new(1)).unwrap();
//! let a = nonceforge_core::nonce("default", NonceWidth::W64).unwrap();
//! let b = nonceforge_core::nonce("default", NonceWidth::W64).unwrap();
//! assert_ne!(a, b);
//! ```
//!
//! Uniqueness holds as long as each node keeps a distinct machine id,
//! UTC progresses monotonically across restarts, and the counters do not
//! wrap — the documented deployment contract.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Concern modules
pub mod crypto;
pub mod factory;
pub mod generator;

mod entry;

pub use crate::constants::DEFAULT_FACTORY;
pub use crate::crypto::types::{CipherChoice, CipherKind, CryptoError};
pub use crate::entry::{
    decrypt, encrypt, encrypted_nonce, get_datetime, get_factory, init, is_initialized, nonce,
    sortable_nonce,
};
pub use crate::factory::{FactoryState, InitOptions};
pub use crate::types::{FactoryError, Nonce, NonceWidth, Variant};
