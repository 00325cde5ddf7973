//! Left-padding between 20-byte addresses and 32-byte words.
//!
//! The router carries addresses as `bytes32` so remote (non-EVM) routers fit the same slot.

use alloy_primitives::{Address, B256};

/// `bytes32(uint256(uint160(addr)))`: 12 zero bytes followed by the address.
pub fn address_to_bytes32(addr: Address) -> B256 {
    let mut word = [0u8; 32];
    word[12..32].copy_from_slice(addr.as_slice());
    B256::from(word)
}

/// Inverse of [`address_to_bytes32`]. Returns `None` when the high 12 bytes are not zero.
pub fn bytes32_to_address(word: B256) -> Option<Address> {
    if word[..12].iter().any(|b| *b != 0) {
        return None;
    }
    Some(Address::from_slice(&word[12..32]))
}
