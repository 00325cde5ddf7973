use alloy_primitives::{Address, Bytes, B256};

use crate::{
    account::{ChainAddresses, Domain},
    call::{LogEntry, TransactionRequest},
};

/// Errors surfaced by a chain client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainCallError {
    /// The call reached the chain and reverted.
    #[error("call to {target} reverted: {reason}")]
    Reverted { target: Address, reason: String },
    /// The request never produced a result (connection, RPC or signer failure).
    #[error("transport error: {0}")]
    Transport(String),
    /// Return data could not be decoded.
    #[error("malformed return data from {target}")]
    MalformedReturn { target: Address },
}

/// Errors looking up a chain's contract addresses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("chain `{0}` not found in registry")]
    UnknownChain(String),
    #[error("chain `{chain}` has no `{field}` address")]
    MissingField { chain: String, field: &'static str },
    #[error("invalid registry entry for `{chain}`: {reason}")]
    Invalid { chain: String, reason: String },
}

/// Read-only access to contract views.
pub trait ChainReader {
    /// Execute `selector || args` against `target` as a view call and return the raw result.
    async fn read_view(
        &self,
        target: Address,
        selector: [u8; 4],
        args: &[u8],
    ) -> Result<Bytes, ChainCallError>;
}

/// Transaction submission and chain metadata.
pub trait ChainWriter {
    /// Sign and broadcast; returns the transaction hash once accepted by the node.
    async fn submit_transaction(&self, tx: TransactionRequest) -> Result<B256, ChainCallError>;

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ChainCallError>;

    /// Protocol domain of the chain this client talks to.
    async fn current_domain_id(&self) -> Result<Domain, ChainCallError>;
}

/// Receipt log access, used only to follow a dispatch downstream.
pub trait EventSource {
    /// Logs of the mined transaction, or `None` while it is still pending.
    async fn receipt_logs(&self, tx_hash: B256) -> Result<Option<Vec<LogEntry>>, ChainCallError>;
}

/// Resolves human-readable chain names to their contract addresses.
pub trait ChainRegistry {
    fn lookup_chain_addresses(&self, chain_name: &str) -> Result<ChainAddresses, RegistryError>;
}

impl<T: ChainReader> ChainReader for &T {
    async fn read_view(
        &self,
        target: Address,
        selector: [u8; 4],
        args: &[u8],
    ) -> Result<Bytes, ChainCallError> {
        (**self).read_view(target, selector, args).await
    }
}

impl<T: ChainWriter> ChainWriter for &T {
    async fn submit_transaction(&self, tx: TransactionRequest) -> Result<B256, ChainCallError> {
        (**self).submit_transaction(tx).await
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ChainCallError> {
        (**self).estimate_gas(tx).await
    }

    async fn current_domain_id(&self) -> Result<Domain, ChainCallError> {
        (**self).current_domain_id().await
    }
}

impl<T: EventSource> EventSource for &T {
    async fn receipt_logs(&self, tx_hash: B256) -> Result<Option<Vec<LogEntry>>, ChainCallError> {
        (**self).receipt_logs(tx_hash).await
    }
}
