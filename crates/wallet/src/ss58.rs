//! SS58 address codec.
//!
//! Layout: `prefix (1 or 2 bytes) || payload || checksum`, base58 encoded. The
//! checksum is the head of `blake2b-512("SS58PRE" || prefix || payload)`: two
//! bytes for 32/33-byte keys, one byte for short account indices.

use blake2::{Blake2b512, Digest};

use crate::AddressError;

/// Generic substrate network prefix.
pub const DEFAULT_SS58_FORMAT: u16 = 42;

const SS58_PREFIX: &[u8] = b"SS58PRE";
const MAX_SS58_FORMAT: u16 = 16_383;
const RESERVED_FORMATS: [u16; 2] = [46, 47];
const ALLOWED_DECODED_LENGTHS: [usize; 6] = [1, 2, 4, 8, 32, 33];
const ALLOWED_ENCODED_LENGTHS: [usize; 8] = [3, 4, 6, 10, 35, 36, 37, 38];

fn ss58_hash(data: &[u8]) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    hasher.update(SS58_PREFIX);
    hasher.update(data);
    let mut out = [0u8; 64];
    out.copy_from_slice(&hasher.finalize());
    out
}

fn prefix_bytes(format: u16) -> Vec<u8> {
    if format < 64 {
        vec![format as u8]
    } else {
        vec![
            ((format & 0b0000_0000_1111_1100) >> 2) as u8 | 0b0100_0000,
            (format >> 8) as u8 | ((format & 0b0000_0000_0000_0011) << 6) as u8,
        ]
    }
}

fn checksum_len(payload_len: usize) -> usize {
    if payload_len == 32 || payload_len == 33 {
        2
    } else {
        1
    }
}

pub fn encode(key: &[u8], format: u16) -> Result<String, AddressError> {
    if !ALLOWED_DECODED_LENGTHS.contains(&key.len()) {
        return Err(AddressError::InvalidLength(key.len()));
    }
    if format > MAX_SS58_FORMAT || RESERVED_FORMATS.contains(&format) {
        return Err(AddressError::InvalidPrefix(format));
    }
    let mut input = prefix_bytes(format);
    input.extend_from_slice(key);
    let hash = ss58_hash(&input);
    input.extend_from_slice(&hash[..checksum_len(key.len())]);
    Ok(bs58::encode(input).into_string())
}

/// Decode an address into its network format and payload.
pub fn decode(address: &str) -> Result<(u16, Vec<u8>), AddressError> {
    let decoded = bs58::decode(address)
        .into_vec()
        .map_err(|_| AddressError::InvalidBase58)?;
    let first = *decoded.first().ok_or(AddressError::InvalidLength(0))?;
    let prefix_len = if first & 0b0100_0000 != 0 { 2 } else { 1 };
    let is_public_key = decoded.len() == 34 + prefix_len || decoded.len() == 35 + prefix_len;
    if !is_public_key && !ALLOWED_ENCODED_LENGTHS.contains(&decoded.len()) {
        return Err(AddressError::InvalidLength(decoded.len()));
    }
    let body_end = decoded.len() - if is_public_key { 2 } else { 1 };
    if body_end <= prefix_len {
        return Err(AddressError::InvalidLength(decoded.len()));
    }
    if first & 0b1000_0000 != 0 || RESERVED_FORMATS.contains(&u16::from(first)) {
        return Err(AddressError::InvalidPrefix(u16::from(first)));
    }
    let hash = ss58_hash(&decoded[..body_end]);
    if decoded[body_end..] != hash[..decoded.len() - body_end] {
        return Err(AddressError::InvalidChecksum);
    }
    let format = if prefix_len == 1 {
        u16::from(first)
    } else {
        let second = decoded[1];
        (u16::from(first & 0b0011_1111) << 2)
            | u16::from(second >> 6)
            | (u16::from(second & 0b0011_1111) << 8)
    };
    Ok((format, decoded[prefix_len..body_end].to_vec()))
}
