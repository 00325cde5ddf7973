//! Interchain account identity.
//!
//! An interchain account is a proxy on the destination chain with no private key: its authority
//! is the owner's signature on the origin-chain dispatch. It can describe what it wants to do
//! (encode calls) but every signing capability fails with [`IcaError::UnsupportedOperation`].

use alloy_primitives::{Address, Bytes, B256};
use ica_types::{Call, ChainAddresses, ChainReader, Domain, RoutingOverride, TransactionRequest};

use crate::{encoder::encode_override, errors::IcaError, resolver::resolve_local_account};

/// What an account can do, fixed when it is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    EncodeCalls,
    Sign,
}

/// Account abstraction shared by anything that acts on a chain.
///
/// Signing methods default to [`IcaError::UnsupportedOperation`]; key-backed accounts override
/// them.
pub trait Account {
    fn address(&self) -> Address;

    fn capabilities(&self) -> &'static [Capability];

    fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Encode `calls` into the payload that makes this account execute them on `destination`.
    fn encode_calls(&self, destination: Domain, calls: &[Call]) -> Result<Bytes, IcaError>;

    fn sign_message(&self, _message: &[u8]) -> Result<Bytes, IcaError> {
        Err(IcaError::UnsupportedOperation {
            operation: "sign a message",
        })
    }

    fn sign_typed_data(&self, _digest: B256) -> Result<Bytes, IcaError> {
        Err(IcaError::UnsupportedOperation {
            operation: "sign typed data",
        })
    }

    fn sign_transaction(&self, _tx: &TransactionRequest) -> Result<Bytes, IcaError> {
        Err(IcaError::UnsupportedOperation {
            operation: "sign a transaction",
        })
    }
}

/// An interchain account bound to the router/ISM that control it and the origin client that
/// signs on its behalf.
///
/// Holds no mutable state; build one right before a dispatch and drop it after.
#[derive(Clone, Debug)]
pub struct InterchainAccount<O> {
    address: Address,
    routing: RoutingOverride,
    origin_router: Address,
    origin_client: O,
}

impl<O> InterchainAccount<O> {
    pub fn new(
        address: Address,
        router: Address,
        ism: Address,
        origin_router: Address,
        origin_client: O,
    ) -> Self {
        Self {
            address,
            routing: RoutingOverride { router, ism },
            origin_router,
            origin_client,
        }
    }

    /// Router on the destination that executes this account's calls.
    pub fn router(&self) -> Address {
        self.routing.router
    }

    pub fn ism(&self) -> Address {
        self.routing.ism
    }

    pub fn routing(&self) -> RoutingOverride {
        self.routing
    }

    /// Router on the origin chain that dispatches for this account.
    pub fn origin_router(&self) -> Address {
        self.origin_router
    }

    /// Client of the origin chain, signing as the owner.
    pub fn origin_client(&self) -> &O {
        &self.origin_client
    }
}

impl<O> InterchainAccount<O> {
    /// Look up `owner`'s account on the destination described by `remote` and bind it.
    ///
    /// The address comes from the destination router's own view, so it is whatever that router
    /// will execute as.
    pub async fn resolve<R: ChainReader>(
        remote_client: &R,
        remote: &ChainAddresses,
        origin_domain: Domain,
        owner: Address,
        origin_router: Address,
        origin_client: O,
    ) -> Result<Self, IcaError> {
        let address = resolve_local_account(
            remote_client,
            remote.router,
            origin_domain,
            owner,
            origin_router,
            remote.ism,
        )
        .await?;
        Ok(Self::new(
            address,
            remote.router,
            remote.ism,
            origin_router,
            origin_client,
        ))
    }
}

impl<O> Account for InterchainAccount<O> {
    fn address(&self) -> Address {
        self.address
    }

    fn capabilities(&self) -> &'static [Capability] {
        &[Capability::EncodeCalls]
    }

    fn encode_calls(&self, destination: Domain, calls: &[Call]) -> Result<Bytes, IcaError> {
        Ok(encode_override(destination, self.routing, calls)?)
    }
}
