pub mod cipher;
pub mod codec;
pub mod kdf;
pub mod types;

pub use self::cipher::*;
pub use self::codec::*;
pub use self::kdf::*;
pub use self::types::*;
