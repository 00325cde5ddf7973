//! Interchain account salt.

use alloy_primitives::{keccak256, B256};
use ica_types::AccountKey;

use crate::utils::bytes::address_to_bytes32;

/// Packed preimage width: uint32 origin || bytes32 owner || bytes32 router || bytes32 ism.
const SALT_PREIMAGE_LEN: usize = 4 + 32 * 3;

/// `keccak256(abi.encodePacked(uint32 origin, bytes32 owner, bytes32 router, bytes32 ism))`.
///
/// The origin domain keeps its natural 4-byte width; the three addresses are left-padded to
/// 32 bytes. The field order is fixed by the router.
pub fn account_salt(key: &AccountKey) -> B256 {
    let mut buf = Vec::with_capacity(SALT_PREIMAGE_LEN);
    buf.extend_from_slice(&key.origin_domain.to_be_bytes());
    buf.extend_from_slice(address_to_bytes32(key.owner).as_slice());
    buf.extend_from_slice(address_to_bytes32(key.router).as_slice());
    buf.extend_from_slice(address_to_bytes32(key.ism).as_slice());
    keccak256(buf)
}
