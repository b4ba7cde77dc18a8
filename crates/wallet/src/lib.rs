#![forbid(unsafe_code)]
//! Account address handling: SS58 codec, EVM account mapping and input
//! normalization.

use thiserror::Error;

pub mod address;
pub mod eth;
pub mod notes;
pub mod ss58;

pub use address::{
    is_hex, normalize_address, AddressInput, AddressLength, AddressResolution, Keyring,
};
pub use eth::{ethereum_encode, evm_to_address};
pub use notes::{FileNotes, MemoryNotes, NoteError, NoteStore, ETH_STORAGE_KEY};

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("empty address")]
    Empty,
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("invalid base58 encoding")]
    InvalidBase58,
    #[error("invalid ss58 checksum")]
    InvalidChecksum,
    #[error("invalid ss58 prefix {0}")]
    InvalidPrefix(u16),
    #[error("invalid address length {0}")]
    InvalidLength(usize),
    #[error("account index of {0} bytes not allowed")]
    IndicesNotAllowed(usize),
    #[error("expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("side note: {0}")]
    Notes(#[from] NoteError),
}
