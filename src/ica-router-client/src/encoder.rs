//! Router payloads for the two dispatch entry points.
//!
//! - `callRemote`: destination, calls, hook metadata. Uses the router/ISM enrolled for the
//!   destination.
//! - `callRemoteWithOverrides`: destination, router, ISM, calls. Pins router and ISM for this
//!   dispatch only.
//!
//! The shapes are alternatives; a single payload never combines overrides with hook metadata.
//! Encoding is deterministic, since the bytes end up hashed and signed downstream.

use alloy_primitives::{Bytes, B256};
use alloy_sol_types::SolCall;
use ica_types::{Call, Domain, RoutingOverride};
use tracing::debug;

use crate::{
    errors::EncodingError,
    router::{constants::MAX_CALL_DATA_LEN, interfaces},
    utils::bytes::address_to_bytes32,
};

/// Encode a `callRemote` payload.
pub fn encode_default(
    destination: Domain,
    hook_metadata: &[u8],
    calls: &[Call],
) -> Result<Bytes, EncodingError> {
    let call = interfaces::IInterchainAccountRouter::callRemoteCall {
        destination,
        calls: to_router_calls(calls)?,
        hookMetadata: Bytes::copy_from_slice(hook_metadata),
    };
    let data = Bytes::from(call.abi_encode());
    debug!(destination, calls = calls.len(), len = data.len(), "encoded callRemote");
    Ok(data)
}

/// Encode a `callRemoteWithOverrides` payload.
pub fn encode_override(
    destination: Domain,
    routing: RoutingOverride,
    calls: &[Call],
) -> Result<Bytes, EncodingError> {
    let call = interfaces::IInterchainAccountRouter::callRemoteWithOverridesCall {
        destination,
        router: address_to_bytes32(routing.router),
        ism: address_to_bytes32(routing.ism),
        calls: to_router_calls(calls)?,
    };
    let data = Bytes::from(call.abi_encode());
    debug!(
        destination,
        router = %routing.router,
        ism = %routing.ism,
        calls = calls.len(),
        len = data.len(),
        "encoded callRemoteWithOverrides"
    );
    Ok(data)
}

/// Reject empty batches and oversized payloads before anything is encoded.
pub fn validate_batch(calls: &[Call]) -> Result<(), EncodingError> {
    if calls.is_empty() {
        return Err(EncodingError::EmptyBatch);
    }
    for (index, call) in calls.iter().enumerate() {
        if call.data.len() > MAX_CALL_DATA_LEN {
            return Err(EncodingError::CallDataTooLarge {
                index,
                len: call.data.len(),
                max: MAX_CALL_DATA_LEN,
            });
        }
    }
    Ok(())
}

fn to_router_calls(calls: &[Call]) -> Result<Vec<interfaces::Call>, EncodingError> {
    validate_batch(calls)?;
    Ok(calls
        .iter()
        .map(|c| interfaces::Call {
            to: address_to_bytes32(c.to),
            value: c.value_or_zero(),
            data: c.data.clone(),
        })
        .collect())
}

/// Word offset of the first call's `to` inside a single-call `callRemoteWithOverrides` payload.
///
/// selector, destination, router, ism, offset(calls), len(calls), offset(calls[0]), then the tuple.
#[cfg(test)]
pub(crate) const FIRST_OVERRIDE_TARGET_OFFSET: usize = 4 + 32 * 6;

#[cfg(test)]
pub(crate) fn word_at(data: &[u8], offset: usize) -> B256 {
    B256::from_slice(&data[offset..offset + 32])
}
