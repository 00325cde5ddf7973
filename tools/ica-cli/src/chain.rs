//! `ethers` JSON-RPC client behind the core's chain traits.

use alloy_primitives::{Address, Bytes, B256, U256};
use anyhow::{Context, Result};
use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Middleware, MiddlewareError, Provider},
    signers::LocalWallet,
    types::{
        transaction::eip2718::TypedTransaction, Bytes as EthersBytes, TransactionRequest as EthersTx,
        H160, H256, U256 as EthersU256,
    },
};
use ica_types::{
    ChainCallError, ChainReader, ChainWriter, Domain, EventSource, LogEntry, TransactionRequest,
};
use tracing::debug;

pub type SigningClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// One chain reached over JSON-RPC.
///
/// `domain` overrides the chain id as the protocol domain; most deployments use the chain id.
#[derive(Debug)]
pub struct EthersChain<M> {
    client: M,
    domain: Option<Domain>,
}

impl EthersChain<Provider<Http>> {
    /// Read-only client.
    pub fn connect(rpc_url: &str, domain: Option<Domain>) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .with_context(|| format!("invalid RPC URL {rpc_url}"))?;
        Ok(Self {
            client: provider,
            domain,
        })
    }
}

impl EthersChain<SigningClient> {
    /// Client that signs with `private_key` for the chain behind `rpc_url`.
    pub async fn connect_signer(
        rpc_url: &str,
        domain: Option<Domain>,
        private_key: &str,
    ) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .with_context(|| format!("invalid RPC URL {rpc_url}"))?;
        let wallet: LocalWallet = private_key
            .trim()
            .trim_start_matches("0x")
            .parse()
            .context("invalid private key")?;
        let client = SignerMiddleware::new_with_provider_chain(provider, wallet)
            .await
            .with_context(|| format!("failed reading chain id from {rpc_url}"))?;
        Ok(Self { client, domain })
    }

    pub fn signer_address(&self) -> Address {
        from_h160(self.client.address())
    }
}

impl<M: Middleware> EthersChain<M> {
    pub async fn domain(&self) -> Result<Domain, ChainCallError> {
        if let Some(domain) = self.domain {
            return Ok(domain);
        }
        let chain_id = self.client.get_chainid().await.map_err(transport_error)?;
        if chain_id > EthersU256::from(u32::MAX) {
            return Err(ChainCallError::Transport(format!(
                "chain id {chain_id} does not fit a domain id; set domainId in the registry"
            )));
        }
        Ok(chain_id.as_u32())
    }
}

impl<M: Middleware> ChainReader for EthersChain<M> {
    async fn read_view(
        &self,
        target: Address,
        selector: [u8; 4],
        args: &[u8],
    ) -> Result<Bytes, ChainCallError> {
        let mut data = Vec::with_capacity(4 + args.len());
        data.extend_from_slice(&selector);
        data.extend_from_slice(args);
        let tx: TypedTransaction = EthersTx::new().to(to_h160(target)).data(data).into();

        debug!(%target, selector = %hex::encode(selector), "eth_call");
        let out = self
            .client
            .call(&tx, None)
            .await
            .map_err(|e| call_error(target, e))?;
        Ok(Bytes::from(out.to_vec()))
    }
}

impl<M: Middleware> ChainWriter for EthersChain<M> {
    async fn submit_transaction(&self, tx: TransactionRequest) -> Result<B256, ChainCallError> {
        let target = tx.to;
        let pending = self
            .client
            .send_transaction(to_ethers_tx(&tx), None)
            .await
            .map_err(|e| call_error(target, e))?;
        Ok(B256::from(pending.tx_hash().0))
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ChainCallError> {
        let gas = self
            .client
            .estimate_gas(&to_ethers_tx(tx), None)
            .await
            .map_err(|e| call_error(tx.to, e))?;
        if gas > EthersU256::from(u64::MAX) {
            return Err(ChainCallError::Transport(format!("gas estimate {gas} overflows u64")));
        }
        Ok(gas.as_u64())
    }

    async fn current_domain_id(&self) -> Result<Domain, ChainCallError> {
        self.domain().await
    }
}

impl<M: Middleware> EventSource for EthersChain<M> {
    async fn receipt_logs(&self, tx_hash: B256) -> Result<Option<Vec<LogEntry>>, ChainCallError> {
        let receipt = self
            .client
            .get_transaction_receipt(H256(tx_hash.0))
            .await
            .map_err(transport_error)?;
        Ok(receipt.map(|r| {
            r.logs
                .into_iter()
                .map(|log| LogEntry {
                    address: from_h160(log.address),
                    topics: log.topics.into_iter().map(|t| B256::from(t.0)).collect(),
                    data: Bytes::from(log.data.to_vec()),
                })
                .collect()
        }))
    }
}

fn to_ethers_tx(tx: &TransactionRequest) -> TypedTransaction {
    let mut req = EthersTx::new()
        .to(to_h160(tx.to))
        .value(to_ethers_u256(tx.value))
        .data(EthersBytes::from(tx.data.to_vec()));
    if let Some(from) = tx.from {
        req = req.from(to_h160(from));
    }
    if let Some(gas) = tx.gas {
        req = req.gas(gas);
    }
    req.into()
}

/// Reverts keep the node's message; everything else is transport.
fn call_error<E: MiddlewareError>(target: Address, err: E) -> ChainCallError {
    match err.as_error_response() {
        Some(rpc) if rpc.is_revert() => ChainCallError::Reverted {
            target,
            reason: rpc.message.clone(),
        },
        _ => transport_error(err),
    }
}

fn transport_error<E: std::fmt::Display>(err: E) -> ChainCallError {
    ChainCallError::Transport(err.to_string())
}

fn to_h160(address: Address) -> H160 {
    H160(address.0 .0)
}

fn from_h160(address: H160) -> Address {
    Address::from(address.0)
}

fn to_ethers_u256(value: U256) -> EthersU256 {
    EthersU256::from_big_endian(&value.to_be_bytes::<32>())
}
