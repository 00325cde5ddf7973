//! Authoritative account addresses, read from the routers themselves.
//!
//! The origin router answers "what will my owner's account be over there", the destination
//! router answers "which local account belongs to that origin owner". Both must agree with the
//! offline derivation in [`crate::create2`]; a disagreement is a bug and is never papered over.

use alloy_primitives::Address;
use ica_types::{ChainReader, Domain};
use tracing::{debug, error};

use crate::{
    create2::predict_remote_account,
    errors::IcaError,
    router::{
        interfaces::{IInterchainAccountRouter, IMailbox},
        view_call,
    },
    utils::bytes::address_to_bytes32,
};

/// Ask the origin router for `owner`'s account on the remote domain served by `remote_router`.
pub async fn resolve_remote_account<R: ChainReader>(
    origin_client: &R,
    main_router: Address,
    owner: Address,
    remote_router: Address,
    remote_ism: Address,
) -> Result<Address, IcaError> {
    let call = IInterchainAccountRouter::getRemoteInterchainAccountCall {
        owner,
        router: remote_router,
        ism: remote_ism,
    };
    let context = format!("owner {owner}, remote router {remote_router}, remote ism {remote_ism}");
    let account = view_call(origin_client, main_router, &call, "getRemoteInterchainAccount", context)
        .await?
        ._0;
    debug!(%owner, %main_router, %remote_router, %remote_ism, %account, "resolved remote account");
    Ok(account)
}

/// Ask the destination router which local account belongs to `owner` on `origin_domain`.
///
/// Owner and origin router travel as `bytes32`, matching the router's calling convention.
pub async fn resolve_local_account<R: ChainReader>(
    destination_client: &R,
    local_router: Address,
    origin_domain: Domain,
    owner: Address,
    origin_router: Address,
    local_ism: Address,
) -> Result<Address, IcaError> {
    let call = IInterchainAccountRouter::getLocalInterchainAccountCall {
        origin: origin_domain,
        owner: address_to_bytes32(owner),
        router: address_to_bytes32(origin_router),
        ism: local_ism,
    };
    let context = format!(
        "origin {origin_domain}, owner {owner}, origin router {origin_router}, ism {local_ism}"
    );
    let account = view_call(
        destination_client,
        local_router,
        &call,
        "getLocalInterchainAccount",
        context,
    )
    .await?
    ._0;
    debug!(origin_domain, %owner, %local_router, %origin_router, %local_ism, %account, "resolved local account");
    Ok(account)
}

/// Default ISM configured on a mailbox.
pub async fn default_ism<R: ChainReader>(client: &R, mailbox: Address) -> Result<Address, IcaError> {
    let ism = view_call(
        client,
        mailbox,
        &IMailbox::defaultIsmCall {},
        "defaultIsm",
        format!("mailbox {mailbox}"),
    )
    .await?
    ._0;
    Ok(ism)
}

/// Pass `resolved` through only if it equals the offline prediction.
pub fn verify_account(
    predicted: Address,
    resolved: Address,
    view: &'static str,
) -> Result<Address, IcaError> {
    if predicted != resolved {
        error!(%predicted, %resolved, view, "interchain account derivation disagrees with router view");
        return Err(IcaError::AccountMismatch {
            predicted,
            resolved,
            view,
        });
    }
    Ok(resolved)
}

/// Inputs naming one interchain account from both sides of the route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountRoute {
    pub origin_domain: Domain,
    pub owner: Address,
    pub origin_router: Address,
    pub remote_router: Address,
    pub remote_ism: Address,
}

/// Resolve the account from both routers and check both against the offline prediction.
pub async fn resolve_and_verify<O, D>(
    origin_client: &O,
    destination_client: &D,
    route: &AccountRoute,
) -> Result<Address, IcaError>
where
    O: ChainReader,
    D: ChainReader,
{
    let predicted = predict_remote_account(
        route.origin_domain,
        route.owner,
        route.origin_router,
        route.remote_router,
        route.remote_ism,
    );

    let remote = resolve_remote_account(
        origin_client,
        route.origin_router,
        route.owner,
        route.remote_router,
        route.remote_ism,
    )
    .await?;
    verify_account(predicted, remote, "getRemoteInterchainAccount")?;

    let local = resolve_local_account(
        destination_client,
        route.remote_router,
        route.origin_domain,
        route.owner,
        route.origin_router,
        route.remote_ism,
    )
    .await?;
    verify_account(predicted, local, "getLocalInterchainAccount")
}
