//! Deterministic account addresses.
//!
//! The router deploys each account as an EIP-1167 minimal proxy with `CREATE2`, pointing at an
//! implementation the router itself deployed with `CREATE` at nonce 1. Everything here is pure
//! and needs no chain access.

use alloy_primitives::{keccak256, Address, Bytes, B256};
use ica_types::{AccountKey, Domain};
use tracing::debug;

use crate::{
    router::constants::{IMPLEMENTATION_DEPLOY_NONCE, MINIMAL_PROXY_PREFIX, MINIMAL_PROXY_SUFFIX},
    salt::account_salt,
};

/// `keccak256(0xff || deployer || salt || init_code_hash)[12..]`.
pub fn create2_address_from_hash(deployer: Address, salt: B256, init_code_hash: B256) -> Address {
    let mut preimage = [0u8; 1 + 20 + 32 + 32];
    preimage[0] = 0xff;
    preimage[1..21].copy_from_slice(deployer.as_slice());
    preimage[21..53].copy_from_slice(salt.as_slice());
    preimage[53..85].copy_from_slice(init_code_hash.as_slice());
    Address::from_slice(&keccak256(preimage)[12..])
}

/// Same as [`create2_address_from_hash`], hashing the creation code first.
pub fn create2_address(deployer: Address, salt: B256, init_code: &[u8]) -> Address {
    create2_address_from_hash(deployer, salt, keccak256(init_code))
}

/// Address of the account implementation: the router's first `CREATE` deployment.
///
/// `keccak256(rlp([router, 1]))[12..]`, i.e. `0xd6 0x94 || router || 0x01`.
pub fn router_implementation(router: Address) -> Address {
    let mut preimage = [0u8; 2 + 20 + 1];
    preimage[0] = 0xd6;
    preimage[1] = 0x94;
    preimage[2..22].copy_from_slice(router.as_slice());
    preimage[22] = IMPLEMENTATION_DEPLOY_NONCE;
    Address::from_slice(&keccak256(preimage)[12..])
}

/// EIP-1167 creation code delegating to `implementation`.
pub fn minimal_proxy_bytecode(implementation: Address) -> Bytes {
    let mut code = Vec::with_capacity(MINIMAL_PROXY_PREFIX.len() + 20 + MINIMAL_PROXY_SUFFIX.len());
    code.extend_from_slice(&MINIMAL_PROXY_PREFIX);
    code.extend_from_slice(implementation.as_slice());
    code.extend_from_slice(&MINIMAL_PROXY_SUFFIX);
    code.into()
}

/// Init code hash of every account deployed by `router`.
pub fn account_bytecode_hash(router: Address) -> B256 {
    keccak256(minimal_proxy_bytecode(router_implementation(router)))
}

/// Address `deployer_router` gives the account identified by `key`.
pub fn account_address(key: &AccountKey, deployer_router: Address) -> Address {
    let salt = account_salt(key);
    let address =
        create2_address_from_hash(deployer_router, salt, account_bytecode_hash(deployer_router));
    debug!(?key, %deployer_router, %salt, %address, "derived interchain account address");
    address
}

/// Offline counterpart of `getRemoteInterchainAccount` on the origin router.
///
/// The salt binds the origin router and the remote ISM; the remote router is the deployer.
pub fn predict_remote_account(
    origin_domain: Domain,
    owner: Address,
    origin_router: Address,
    remote_router: Address,
    remote_ism: Address,
) -> Address {
    let key = AccountKey::new(origin_domain, owner, origin_router, remote_ism);
    account_address(&key, remote_router)
}
