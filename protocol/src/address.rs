//! Account address checks.
//!
//! The ledger accepts two spellings of an account:
//!
//! - **Classic** addresses (`r...`): base58check over the Ripple alphabet,
//!   decoding to a version byte of `0x00` followed by a 20-byte account id.
//! - **X-addresses** (`X...` / `T...`): base58check over the same alphabet,
//!   decoding to a two-byte network prefix, the 20-byte account id, a tag
//!   flag byte, and an eight-byte little-endian tag area.
//!
//! Only shape and checksum are verified here. Whether the account exists on
//! any ledger is not this module's concern.

use bs58::Alphabet;

/// Size of an account id in bytes.
const ACCOUNT_ID_LENGTH: usize = 20;

/// Version byte of a classic account address.
const CLASSIC_VERSION: u8 = 0x00;

/// X-address prefix for mainnet.
const X_ADDRESS_MAINNET_PREFIX: [u8; 2] = [0x05, 0x44];

/// X-address prefix for test networks.
const X_ADDRESS_TESTNET_PREFIX: [u8; 2] = [0x04, 0x93];

/// Prefix + account id + flag byte + 8-byte tag area.
const X_ADDRESS_PAYLOAD_LENGTH: usize = 2 + ACCOUNT_ID_LENGTH + 1 + 8;

/// Decodes base58check with the Ripple alphabet, returning the payload
/// (version bytes included, checksum stripped).
fn decode_checked(address: &str) -> Option<Vec<u8>> {
    bs58::decode(address)
        .with_alphabet(Alphabet::RIPPLE)
        .with_check(None)
        .into_vec()
        .ok()
}

/// Returns `true` if `address` is a well-formed classic address.
pub fn is_valid_classic_address(address: &str) -> bool {
    if !address.starts_with('r') {
        return false;
    }
    match decode_checked(address) {
        Some(payload) => {
            payload.len() == ACCOUNT_ID_LENGTH + 1 && payload[0] == CLASSIC_VERSION
        }
        None => false,
    }
}

/// Returns `true` if `address` is a well-formed X-address for either network.
pub fn is_valid_x_address(address: &str) -> bool {
    let payload = match decode_checked(address) {
        Some(payload) if payload.len() == X_ADDRESS_PAYLOAD_LENGTH => payload,
        _ => return false,
    };

    let prefix = [payload[0], payload[1]];
    if prefix != X_ADDRESS_MAINNET_PREFIX && prefix != X_ADDRESS_TESTNET_PREFIX {
        return false;
    }

    let flag = payload[22];
    let tag = &payload[23..27];
    let reserved = &payload[27..31];

    if reserved.iter().any(|b| *b != 0) {
        return false;
    }

    match flag {
        0 => tag.iter().all(|b| *b == 0),
        1 => true,
        _ => false,
    }
}

/// Returns `true` if `address` is a valid classic address or X-address.
pub fn is_valid_address(address: &str) -> bool {
    is_valid_classic_address(address) || is_valid_x_address(address)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
