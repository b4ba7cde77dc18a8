//! Ethereum-style (H160) account helpers.

use blake2::{digest::consts::U32, Blake2b, Digest};
use sha3::Keccak256;

use crate::{ss58, AddressError};

type Blake2b256 = Blake2b<U32>;

pub const EVM_ADDRESS_LENGTH: usize = 20;

fn expect_evm(bytes: &[u8]) -> Result<(), AddressError> {
    if bytes.len() != EVM_ADDRESS_LENGTH {
        return Err(AddressError::LengthMismatch {
            expected: EVM_ADDRESS_LENGTH,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// Mixed-case checksummed (EIP-55) `0x` form of a 20-byte address.
pub fn ethereum_encode(bytes: &[u8]) -> Result<String, AddressError> {
    expect_evm(bytes)?;
    let lower = hex::encode(bytes);
    let hash = hex::encode(Keccak256::digest(lower.as_bytes()));
    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (ch, nibble) in lower.chars().zip(hash.chars()) {
        if nibble.to_digit(16).unwrap_or(0) > 7 {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
    }
    Ok(out)
}

/// SS58 account that an EVM address maps to: `blake2b-256("evm:" || address)`.
pub fn evm_to_address(bytes: &[u8], format: u16) -> Result<String, AddressError> {
    expect_evm(bytes)?;
    let mut hasher = Blake2b256::new();
    hasher.update(b"evm:");
    hasher.update(bytes);
    ss58::encode(&hasher.finalize(), format)
}
