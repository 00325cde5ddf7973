use alloy_primitives::Bytes;
use alloy_sol_types::SolCall;
use ica_types::{Call, Domain, RoutingOverride};

use crate::{
    errors::DecodeError,
    router::interfaces::{self, IInterchainAccountRouter},
    utils::bytes::bytes32_to_address,
};

/// A decoded router payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouterMessage {
    Default {
        destination: Domain,
        calls: Vec<Call>,
        hook_metadata: Bytes,
    },
    Override {
        destination: Domain,
        routing: RoutingOverride,
        calls: Vec<Call>,
    },
}

/// Decode either entry point, dispatching on the selector.
pub fn decode_message(data: &[u8]) -> Result<RouterMessage, DecodeError> {
    let selector: [u8; 4] = data
        .get(..4)
        .and_then(|s| s.try_into().ok())
        .ok_or(DecodeError::Truncated)?;

    match selector {
        IInterchainAccountRouter::callRemoteCall::SELECTOR => {
            let (destination, calls, hook_metadata) = decode_default(data)?;
            Ok(RouterMessage::Default {
                destination,
                calls,
                hook_metadata,
            })
        }
        IInterchainAccountRouter::callRemoteWithOverridesCall::SELECTOR => {
            let (destination, routing, calls) = decode_override(data)?;
            Ok(RouterMessage::Override {
                destination,
                routing,
                calls,
            })
        }
        other => Err(DecodeError::UnknownSelector(other)),
    }
}

/// Decode a `callRemote` payload into `(destination, calls, hook_metadata)`.
pub fn decode_default(data: &[u8]) -> Result<(Domain, Vec<Call>, Bytes), DecodeError> {
    let call = IInterchainAccountRouter::callRemoteCall::abi_decode(data, true)
        .map_err(|e| DecodeError::Abi(e.to_string()))?;
    Ok((call.destination, from_router_calls(call.calls)?, call.hookMetadata))
}

/// Decode a `callRemoteWithOverrides` payload into `(destination, routing, calls)`.
///
/// Router and ISM must be left-padded addresses; zero call values come back as `Some(0)`.
pub fn decode_override(data: &[u8]) -> Result<(Domain, RoutingOverride, Vec<Call>), DecodeError> {
    let call = IInterchainAccountRouter::callRemoteWithOverridesCall::abi_decode(data, true)
        .map_err(|e| DecodeError::Abi(e.to_string()))?;
    let router = bytes32_to_address(call.router)
        .ok_or_else(|| DecodeError::Abi("router override is not an address".into()))?;
    let ism = bytes32_to_address(call.ism)
        .ok_or_else(|| DecodeError::Abi("ism override is not an address".into()))?;
    Ok((
        call.destination,
        RoutingOverride { router, ism },
        from_router_calls(call.calls)?,
    ))
}

fn from_router_calls(calls: Vec<interfaces::Call>) -> Result<Vec<Call>, DecodeError> {
    calls
        .into_iter()
        .enumerate()
        .map(|(index, c)| {
            let to = bytes32_to_address(c.to).ok_or(DecodeError::NonAddressTarget { index })?;
            Ok(Call {
                to,
                value: Some(c.value),
                data: c.data,
            })
        })
        .collect()
}
