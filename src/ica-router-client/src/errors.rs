use alloy_primitives::Address;

/// Errors surfaced by a chain client.
pub use ica_types::ChainCallError;

/// Errors building a router payload. Caller validation; never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("call batch is empty")]
    EmptyBatch,
    #[error("call {index} carries {len} bytes of data, the limit is {max}")]
    CallDataTooLarge { index: usize, len: usize, max: usize },
}

/// Errors reading a router payload back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown router selector 0x{}", alloy_primitives::hex::encode(.0))]
    UnknownSelector([u8; 4]),
    #[error("payload shorter than a selector")]
    Truncated,
    #[error("malformed router payload: {0}")]
    Abi(String),
    #[error("call {index} target is not a 20-byte address")]
    NonAddressTarget { index: usize },
}

/// The overarching error type of this crate.
#[derive(Debug, thiserror::Error)]
pub enum IcaError {
    /// Malformed or empty call batch.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// A router payload could not be decoded.
    #[error(transparent)]
    Decoding(#[from] DecodeError),
    /// A chain read or write failed.
    #[error("{operation} failed ({context}): {source}")]
    ChainCall {
        operation: &'static str,
        context: String,
        #[source]
        source: ChainCallError,
    },
    /// No interchain account was bound where one is required.
    #[error("no interchain account bound to this dispatch")]
    MissingAccount,
    /// The interchain account has no key and cannot sign.
    #[error("interchain accounts cannot {operation}: authority is the owner's origin-chain signature")]
    UnsupportedOperation { operation: &'static str },
    /// The offline prediction and an on-chain view disagree.
    #[error("account mismatch: predicted {predicted}, {view} returned {resolved}")]
    AccountMismatch {
        predicted: Address,
        resolved: Address,
        view: &'static str,
    },
}

impl IcaError {
    pub(crate) fn chain_call(
        operation: &'static str,
        context: impl Into<String>,
    ) -> impl FnOnce(ChainCallError) -> Self {
        let context = context.into();
        move |source| Self::ChainCall {
            operation,
            context,
            source,
        }
    }
}
