//! Origin-side dispatch of a single call made on behalf of an interchain account.
//!
//! `Built -> GasResolved -> Encoded -> Submitted/AwaitingRelay`, each state a separate type so
//! a step cannot be skipped. Submission and awaiting relay are one transition: once the origin
//! client returns a transaction hash there is nothing left to do on the origin side, so
//! [`Encoded::submit`] yields [`AwaitingRelay`] directly. The remote client only answers questions about the destination (gas
//! estimate, domain id); the signed transaction always goes out through the account's origin
//! client.
//!
//! [`AwaitingRelay`] holds the origin transaction hash. It proves the message was accepted for
//! relay, not that the remote call executed.

use alloy_primitives::{Address, Bytes, B256, U256};
use ica_types::{Call, ChainReader, ChainWriter, Domain, TransactionRequest};
use tracing::{debug, info};

use crate::{
    account::{Account, InterchainAccount},
    errors::IcaError,
    quote::FeePolicy,
};

/// The call the interchain account should perform on its own chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchRequest {
    pub to: Address,
    pub value: Option<U256>,
    pub data: Bytes,
    /// Remote execution gas limit. Estimated against the destination when `None`.
    pub gas: Option<u64>,
}

impl DispatchRequest {
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            data: data.into(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = Some(gas);
        self
    }

    fn call(&self) -> Call {
        Call {
            to: self.to,
            value: self.value,
            data: self.data.clone(),
        }
    }
}

/// A request bound to the account that will execute it.
#[derive(Debug)]
pub struct Built<'a, O> {
    account: &'a InterchainAccount<O>,
    request: DispatchRequest,
}

/// Remote gas limit settled.
#[derive(Debug)]
pub struct GasResolved<'a, O> {
    account: &'a InterchainAccount<O>,
    request: DispatchRequest,
    remote_gas_limit: u64,
}

/// Router payload ready for the origin chain.
#[derive(Debug)]
pub struct Encoded<'a, O> {
    account: &'a InterchainAccount<O>,
    destination: Domain,
    payload: Bytes,
    remote_gas_limit: u64,
}

/// Terminal state: submitted to the origin router and awaiting relay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AwaitingRelay {
    /// Hash of the origin-chain transaction, not of the remote execution.
    pub origin_tx_hash: B256,
    pub destination: Domain,
    pub fee: U256,
    pub remote_gas_limit: u64,
}

/// Bind `request` to `account`; fails with [`IcaError::MissingAccount`] when none is bound.
pub fn build<O>(
    account: Option<&InterchainAccount<O>>,
    request: DispatchRequest,
) -> Result<Built<'_, O>, IcaError> {
    let account = account.ok_or(IcaError::MissingAccount)?;
    debug!(account = %account.address(), to = %request.to, "dispatch built");
    Ok(Built { account, request })
}

impl<'a, O> Built<'a, O> {
    /// Settle the remote gas limit, estimating the call as sent from the account on `remote`.
    ///
    /// The limit prices execution on the destination; it is never used as the origin
    /// transaction's gas.
    pub async fn resolve_gas<R: ChainWriter>(
        self,
        remote: &R,
    ) -> Result<GasResolved<'a, O>, IcaError> {
        let remote_gas_limit = match self.request.gas {
            Some(gas) => gas,
            None => {
                let estimate = TransactionRequest {
                    from: Some(self.account.address()),
                    to: self.request.to,
                    value: self.request.value.unwrap_or_default(),
                    data: self.request.data.clone(),
                    gas: None,
                };
                remote.estimate_gas(&estimate).await.map_err(IcaError::chain_call(
                    "estimate_gas",
                    format!("account {} calling {}", self.account.address(), self.request.to),
                ))?
            }
        };
        info!(
            account = %self.account.address(),
            remote_gas_limit,
            estimated = self.request.gas.is_none(),
            "remote gas resolved"
        );
        Ok(GasResolved {
            account: self.account,
            request: self.request,
            remote_gas_limit,
        })
    }
}

impl<'a, O> GasResolved<'a, O> {
    pub fn remote_gas_limit(&self) -> u64 {
        self.remote_gas_limit
    }

    /// Encode the call for the domain `remote` serves, which is where the account lives.
    pub async fn encode<R: ChainWriter>(self, remote: &R) -> Result<Encoded<'a, O>, IcaError> {
        let destination = remote
            .current_domain_id()
            .await
            .map_err(IcaError::chain_call("current_domain_id", "remote chain"))?;
        let payload = self
            .account
            .encode_calls(destination, &[self.request.call()])?;
        info!(
            account = %self.account.address(),
            destination,
            len = payload.len(),
            "dispatch encoded"
        );
        Ok(Encoded {
            account: self.account,
            destination,
            payload,
            remote_gas_limit: self.remote_gas_limit,
        })
    }
}

impl<O> Encoded<'_, O> {
    pub fn destination(&self) -> Domain {
        self.destination
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Origin-router transaction carrying `fee` and the encoded payload.
    pub fn transaction(&self, fee: U256) -> TransactionRequest {
        TransactionRequest {
            from: None,
            to: self.account.origin_router(),
            value: fee,
            data: self.payload.clone(),
            gas: None,
        }
    }
}

impl<O: ChainReader + ChainWriter> Encoded<'_, O> {
    /// Resolve the fee and submit through the origin client.
    ///
    /// Submission errors come back as they are; nothing is retried.
    pub async fn submit(self, fee_policy: &FeePolicy) -> Result<AwaitingRelay, IcaError> {
        let origin = self.account.origin_client();
        let origin_router = self.account.origin_router();
        let fee = fee_policy
            .resolve(origin, origin_router, self.destination, self.remote_gas_limit)
            .await?;

        let origin_tx_hash = origin
            .submit_transaction(self.transaction(fee))
            .await
            .map_err(IcaError::chain_call(
                "submit_transaction",
                format!("origin router {origin_router}, destination {}", self.destination),
            ))?;

        info!(
            %origin_tx_hash,
            %origin_router,
            destination = self.destination,
            %fee,
            "dispatch submitted; awaiting relay"
        );
        Ok(AwaitingRelay {
            origin_tx_hash,
            destination: self.destination,
            fee,
            remote_gas_limit: self.remote_gas_limit,
        })
    }
}

/// Run the whole dispatch for one call and return the origin transaction hash.
pub async fn send_transaction<O, R>(
    account: Option<&InterchainAccount<O>>,
    remote: &R,
    request: DispatchRequest,
    fee_policy: &FeePolicy,
) -> Result<AwaitingRelay, IcaError>
where
    O: ChainReader + ChainWriter,
    R: ChainWriter,
{
    build(account, request)?
        .resolve_gas(remote)
        .await?
        .encode(remote)
        .await?
        .submit(fee_policy)
        .await
}
