//! Router deployment and transport constants.

use alloy_primitives::U256;

/// EIP-1167 minimal proxy creation code before the 20-byte implementation address.
pub const MINIMAL_PROXY_PREFIX: [u8; 20] = [
    0x3d, 0x60, 0x2d, 0x80, 0x60, 0x0a, 0x3d, 0x39, 0x81, 0xf3, 0x36, 0x3d, 0x3d, 0x37, 0x3d, 0x3d,
    0x3d, 0x36, 0x3d, 0x73,
];

/// EIP-1167 minimal proxy creation code after the implementation address.
pub const MINIMAL_PROXY_SUFFIX: [u8; 15] = [
    0x5a, 0xf4, 0x3d, 0x82, 0x80, 0x3e, 0x90, 0x3d, 0x91, 0x60, 0x2b, 0x57, 0xfd, 0x5b, 0xf3,
];

/// Nonce the router used when it deployed the account implementation (its first `CREATE`).
pub const IMPLEMENTATION_DEPLOY_NONCE: u8 = 1;

/// Largest `data` payload accepted for a single call (mempool transaction size ceiling).
pub const MAX_CALL_DATA_LEN: usize = 128 * 1024;

/// Reference dispatch fee: 0.001 ether.
pub const PLACEHOLDER_FEE: U256 = U256::from_limbs([1_000_000_000_000_000, 0, 0, 0]);

/// Basis-point denominator for fee margins.
pub const BPS_DENOMINATOR: u32 = 10_000;
