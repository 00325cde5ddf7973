use alloy_primitives::{Address, Bytes, B256, U256};

/// A single call the interchain account performs on the destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub to: Address,
    /// Native value attached to the call. Encoded as zero when unset.
    pub value: Option<U256>,
    pub data: Bytes,
}

impl Call {
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            value: None,
            data: data.into(),
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    /// Value as it goes on the wire.
    pub fn value_or_zero(&self) -> U256 {
        self.value.unwrap_or(U256::ZERO)
    }
}

/// Transaction handed to a chain writer for gas estimation or submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionRequest {
    /// Sender used for estimation. Writers sign with their own key and may ignore it on submit.
    pub from: Option<Address>,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    /// Explicit gas limit; left to the writer when `None`.
    pub gas: Option<u64>,
}

/// A log emitted in a transaction receipt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}
