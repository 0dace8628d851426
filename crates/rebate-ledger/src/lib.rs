
mod port;
mod memory;
mod error;

pub use port::AssetTransferPort;
pub use memory::MemoryToken;
pub use error::TokenError;
