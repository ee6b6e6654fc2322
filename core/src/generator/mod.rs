pub mod counter;
pub mod encrypted;
pub mod sortable;

pub use self::counter::counter_nonce;
pub use self::encrypted::encrypted_nonce;
pub use self::sortable::sortable_nonce;
