//! Value parsers for the command line.

use std::str::FromStr;

use alloy_primitives::{Address, Bytes, U256};
use ica_router_client::FeePolicy;
use ica_types::Call;

/// `0x`-prefixed or bare hex.
pub fn parse_hex_bytes(raw: &str) -> Result<Bytes, String> {
    hex::decode(raw.trim().trim_start_matches("0x"))
        .map(Bytes::from)
        .map_err(|e| format!("invalid hex `{raw}`: {e}"))
}

pub fn parse_address(raw: &str) -> Result<Address, String> {
    Address::from_str(raw.trim()).map_err(|e| format!("invalid address `{raw}`: {e}"))
}

/// Decimal or `0x` hex amount in wei.
pub fn parse_wei(raw: &str) -> Result<U256, String> {
    U256::from_str(raw.trim()).map_err(|e| format!("invalid amount `{raw}`: {e}"))
}

/// `to[:value[:data]]`; an empty value leaves it unset.
pub fn parse_call(raw: &str) -> Result<Call, String> {
    let mut parts = raw.splitn(3, ':');
    let to = parse_address(parts.next().unwrap_or_default())?;
    let value = match parts.next() {
        Some("") | None => None,
        Some(v) => Some(parse_wei(v)?),
    };
    let data = match parts.next() {
        Some(d) => parse_hex_bytes(d)?,
        None => Bytes::new(),
    };
    Ok(Call { to, value, data })
}

/// `fixed:<wei>`, `quote:<bps>` or `placeholder`.
pub fn parse_fee(raw: &str) -> Result<FeePolicy, String> {
    match raw.trim().split_once(':') {
        Some(("fixed", wei)) => Ok(FeePolicy::Fixed(parse_wei(wei)?)),
        Some(("quote", bps)) => bps
            .parse::<u32>()
            .map(|margin_bps| FeePolicy::Quoted { margin_bps })
            .map_err(|e| format!("invalid margin `{bps}`: {e}")),
        None if raw.trim() == "placeholder" => Ok(FeePolicy::placeholder()),
        _ => Err(format!(
            "invalid fee `{raw}`: expected fixed:<wei>, quote:<bps> or placeholder"
        )),
    }
}
