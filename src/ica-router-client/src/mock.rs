//! In-memory chain used by the unit tests.
//!
//! Emulates the router and mailbox views from their on-chain definitions, using alloy's packed
//! encoding and `create2_from_code` rather than this crate's derivation, so agreement between the
//! two is a real check.

use std::{collections::HashMap, sync::Mutex};

use alloy_primitives::{hex, keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::{SolCall, SolValue};
use ica_types::{
    ChainCallError, ChainReader, ChainWriter, Domain, EventSource, LogEntry, TransactionRequest,
};

use crate::router::interfaces::{IInterchainAccountRouter, IMailbox};

const DEFAULT_GAS_ESTIMATE: u64 = 100_000;

#[derive(Debug, Default)]
struct Recorded {
    quote_bodies: Vec<Bytes>,
    estimates: Vec<TransactionRequest>,
    submitted: Vec<TransactionRequest>,
}

#[derive(Debug)]
pub(crate) struct MockChain {
    domain: Domain,
    fail_reads: bool,
    submit_error: Option<ChainCallError>,
    gas_estimate: u64,
    gas_prices: HashMap<Domain, U256>,
    mailbox: Option<(Address, Address)>,
    receipts: HashMap<B256, Vec<LogEntry>>,
    recorded: Mutex<Recorded>,
}

impl MockChain {
    pub(crate) fn new(domain: Domain) -> Self {
        Self {
            domain,
            fail_reads: false,
            submit_error: None,
            gas_estimate: DEFAULT_GAS_ESTIMATE,
            gas_prices: HashMap::new(),
            mailbox: None,
            receipts: HashMap::new(),
            recorded: Mutex::default(),
        }
    }

    pub(crate) fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub(crate) fn failing_submit(mut self, error: ChainCallError) -> Self {
        self.submit_error = Some(error);
        self
    }

    pub(crate) fn with_gas_estimate(mut self, gas: u64) -> Self {
        self.gas_estimate = gas;
        self
    }

    /// Quotes to `destination` cost `price` per unit of remote gas.
    pub(crate) fn with_gas_price(mut self, destination: Domain, price: U256) -> Self {
        self.gas_prices.insert(destination, price);
        self
    }

    pub(crate) fn with_mailbox(mut self, mailbox: Address, default_ism: Address) -> Self {
        self.mailbox = Some((mailbox, default_ism));
        self
    }

    pub(crate) fn with_receipt(mut self, tx_hash: B256, logs: Vec<LogEntry>) -> Self {
        self.receipts.insert(tx_hash, logs);
        self
    }

    pub(crate) fn last_quote_body(&self) -> Option<Bytes> {
        self.recorded.lock().unwrap().quote_bodies.last().cloned()
    }

    pub(crate) fn estimates(&self) -> Vec<TransactionRequest> {
        self.recorded.lock().unwrap().estimates.clone()
    }

    pub(crate) fn submitted(&self) -> Vec<TransactionRequest> {
        self.recorded.lock().unwrap().submitted.clone()
    }

    fn revert(target: Address, reason: &str) -> ChainCallError {
        ChainCallError::Reverted {
            target,
            reason: reason.to_string(),
        }
    }
}

/// Account `deployer` creates for the given salt inputs, straight from the router's definition.
pub(crate) fn router_account(
    deployer: Address,
    origin: Domain,
    owner: B256,
    origin_router: B256,
    ism: B256,
) -> Address {
    let salt = keccak256((origin, owner, origin_router, ism).abi_encode_packed());
    let implementation = Address::from_slice(
        &keccak256([&[0xd6, 0x94][..], deployer.as_slice(), &[0x01]].concat())[12..],
    );
    let code = [
        &hex!("3d602d80600a3d3981f3363d3d373d3d3d363d73")[..],
        implementation.as_slice(),
        &hex!("5af43d82803e903d91602b57fd5bf3")[..],
    ]
    .concat();
    deployer.create2_from_code(salt, code)
}

impl ChainReader for MockChain {
    async fn read_view(
        &self,
        target: Address,
        selector: [u8; 4],
        args: &[u8],
    ) -> Result<Bytes, ChainCallError> {
        if self.fail_reads {
            return Err(ChainCallError::Transport("connection refused".into()));
        }
        let malformed = |_| Self::revert(target, "malformed calldata");

        let out = match selector {
            IInterchainAccountRouter::getRemoteInterchainAccountCall::SELECTOR => {
                let call =
                    IInterchainAccountRouter::getRemoteInterchainAccountCall::abi_decode_raw(args, true)
                        .map_err(malformed)?;
                router_account(
                    call.router,
                    self.domain,
                    call.owner.into_word(),
                    target.into_word(),
                    call.ism.into_word(),
                )
                .abi_encode()
            }
            IInterchainAccountRouter::getLocalInterchainAccountCall::SELECTOR => {
                let call =
                    IInterchainAccountRouter::getLocalInterchainAccountCall::abi_decode_raw(args, true)
                        .map_err(malformed)?;
                router_account(target, call.origin, call.owner, call.router, call.ism.into_word())
                    .abi_encode()
            }
            IInterchainAccountRouter::quoteGasPaymentCall::SELECTOR => {
                let call = IInterchainAccountRouter::quoteGasPaymentCall::abi_decode_raw(args, true)
                    .map_err(malformed)?;
                self.recorded
                    .lock()
                    .unwrap()
                    .quote_bodies
                    .push(call.messageBody.clone());
                let price = self
                    .gas_prices
                    .get(&call.destination)
                    .ok_or_else(|| Self::revert(target, "destination not supported"))?;
                (*price * call.gasLimit).abi_encode()
            }
            IMailbox::defaultIsmCall::SELECTOR => match self.mailbox {
                Some((mailbox, ism)) if mailbox == target => ism.abi_encode(),
                _ => return Err(Self::revert(target, "not a mailbox")),
            },
            _ => return Err(Self::revert(target, "unknown selector")),
        };
        Ok(out.into())
    }
}

impl ChainWriter for MockChain {
    async fn submit_transaction(&self, tx: TransactionRequest) -> Result<B256, ChainCallError> {
        if let Some(error) = &self.submit_error {
            return Err(error.clone());
        }
        let mut recorded = self.recorded.lock().unwrap();
        recorded.submitted.push(tx);
        Ok(keccak256(recorded.submitted.len().to_be_bytes()))
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ChainCallError> {
        self.recorded.lock().unwrap().estimates.push(tx.clone());
        Ok(self.gas_estimate)
    }

    async fn current_domain_id(&self) -> Result<Domain, ChainCallError> {
        Ok(self.domain)
    }
}

impl EventSource for MockChain {
    async fn receipt_logs(&self, tx_hash: B256) -> Result<Option<Vec<LogEntry>>, ChainCallError> {
        Ok(self.receipts.get(&tx_hash).cloned())
    }
}
