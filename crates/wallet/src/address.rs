//! Normalization of user-supplied account identifiers.

use crate::eth::{ethereum_encode, evm_to_address, EVM_ADDRESS_LENGTH};
use crate::notes::{NoteStore, ETH_STORAGE_KEY};
use crate::ss58::{self, DEFAULT_SS58_FORMAT};
use crate::AddressError;

/// Raw account identifier as typed or pasted by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressInput<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for AddressInput<'a> {
    fn from(value: &'a str) -> Self {
        AddressInput::Text(value)
    }
}

impl<'a> From<&'a String> for AddressInput<'a> {
    fn from(value: &'a String) -> Self {
        AddressInput::Text(value.as_str())
    }
}

impl<'a> From<&'a [u8]> for AddressInput<'a> {
    fn from(value: &'a [u8]) -> Self {
        AddressInput::Bytes(value)
    }
}

/// Accepted account key sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressLength {
    Evm = 20,
    Substrate = 32,
}

#[derive(Debug)]
pub enum AddressResolution {
    Resolved(String),
    Unresolved(AddressError),
}

impl AddressResolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, AddressResolution::Resolved(_))
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            AddressResolution::Resolved(address) => Some(address),
            AddressResolution::Unresolved(_) => None,
        }
    }

    pub fn into_result(self) -> Result<String, AddressError> {
        match self {
            AddressResolution::Resolved(address) => Ok(address),
            AddressResolution::Unresolved(err) => Err(err),
        }
    }
}

impl From<Result<String, AddressError>> for AddressResolution {
    fn from(result: Result<String, AddressError>) -> Self {
        match result {
            Ok(address) => AddressResolution::Resolved(address),
            Err(err) => AddressResolution::Unresolved(err),
        }
    }
}

/// SS58 encoder/decoder bound to one network format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyring {
    ss58_format: u16,
}

impl Default for Keyring {
    fn default() -> Self {
        Self {
            ss58_format: DEFAULT_SS58_FORMAT,
        }
    }
}

impl Keyring {
    pub fn new(ss58_format: u16) -> Self {
        Self { ss58_format }
    }

    pub fn ss58_format(&self) -> u16 {
        self.ss58_format
    }

    /// Payload bytes of an address. Any valid network prefix is accepted.
    pub fn decode_address(&self, address: &str) -> Result<Vec<u8>, AddressError> {
        ss58::decode(address).map(|(_, key)| key)
    }

    pub fn encode_address(&self, key: &[u8]) -> Result<String, AddressError> {
        ss58::encode(key, self.ss58_format)
    }
}

/// `0x` followed by an even number of hex digits.
pub fn is_hex(value: &str) -> bool {
    match value.strip_prefix("0x") {
        Some(digits) => {
            !digits.is_empty()
                && digits.len() % 2 == 0
                && digits.bytes().all(|b| b.is_ascii_hexdigit())
        }
        None => false,
    }
}

fn decode_input(input: AddressInput<'_>, keyring: &Keyring) -> Result<Vec<u8>, AddressError> {
    match input {
        AddressInput::Text(text) if text.is_empty() => Err(AddressError::Empty),
        AddressInput::Bytes(bytes) if bytes.is_empty() => Err(AddressError::Empty),
        AddressInput::Text(text) if is_hex(text) => {
            hex::decode(&text[2..]).map_err(|err| AddressError::InvalidHex(err.to_string()))
        }
        AddressInput::Text(text) => keyring.decode_address(text),
        AddressInput::Bytes(bytes) => Ok(bytes.to_vec()),
    }
}

fn resolve(
    input: AddressInput<'_>,
    allow_indices: bool,
    expected_len: Option<AddressLength>,
    keyring: &Keyring,
    notes: &mut dyn NoteStore,
) -> Result<String, AddressError> {
    let key = decode_input(input, keyring)?;
    let standard =
        key.len() == AddressLength::Substrate as usize || key.len() == EVM_ADDRESS_LENGTH;
    if !allow_indices && !standard {
        return Err(AddressError::IndicesNotAllowed(key.len()));
    }
    if let Some(expected) = expected_len {
        if key.len() != expected as usize {
            return Err(AddressError::LengthMismatch {
                expected: expected as usize,
                actual: key.len(),
            });
        }
    }
    if key.len() == EVM_ADDRESS_LENGTH {
        let checksummed = ethereum_encode(&key)?;
        notes.set_note(ETH_STORAGE_KEY, &checksummed)?;
        evm_to_address(&key, DEFAULT_SS58_FORMAT)
    } else {
        keyring.encode_address(&key)
    }
}

/// Canonical SS58 form of `input`.
///
/// Hex input is taken as raw key bytes, anything else is decoded as SS58.
/// Payloads other than 20 or 32 bytes are refused unless `allow_indices` is
/// set, and must equal `expected_len` when one is given. A 20-byte payload is
/// treated as an EVM account: its checksummed form is recorded under
/// [`ETH_STORAGE_KEY`] and the mapped substrate account (prefix 42) is
/// returned.
pub fn normalize_address<'a>(
    input: impl Into<AddressInput<'a>>,
    allow_indices: bool,
    expected_len: Option<AddressLength>,
    keyring: &Keyring,
    notes: &mut dyn NoteStore,
) -> AddressResolution {
    let result = resolve(input.into(), allow_indices, expected_len, keyring, notes);
    if let Err(err) = &result {
        tracing::debug!(%err, "address unresolved");
    }
    result.into()
}
