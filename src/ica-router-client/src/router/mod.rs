//! Hyperlane interchain account router compatibility.
//!
//! Keeps the ABI the router expects and the constants of its account deployment scheme in one
//! place; the derivation and encoding logic lives elsewhere.

pub mod constants;
pub mod interfaces;

use alloy_primitives::Address;
use alloy_sol_types::SolCall;
use ica_types::{ChainCallError, ChainReader};

use crate::errors::IcaError;

/// Run `call` as a view against `target` and decode its return.
///
/// Transport failures and malformed returns both surface as [`IcaError::ChainCall`] tagged with
/// `operation` and `context`.
pub(crate) async fn view_call<C, R>(
    client: &R,
    target: Address,
    call: &C,
    operation: &'static str,
    context: String,
) -> Result<C::Return, IcaError>
where
    C: SolCall,
    R: ChainReader,
{
    let mut args = Vec::with_capacity(call.abi_encoded_size());
    call.abi_encode_raw(&mut args);

    let out = client
        .read_view(target, C::SELECTOR, &args)
        .await
        .map_err(IcaError::chain_call(operation, context.clone()))?;

    C::abi_decode_returns(&out, true).map_err(|_| IcaError::ChainCall {
        operation,
        context,
        source: ChainCallError::MalformedReturn { target },
    })
}
