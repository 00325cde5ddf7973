//! Interchain gas payment quotes.
//!
//! The price of a dispatch depends only on the destination and the remote gas limit, so the
//! router is asked with an empty message body. Quotes are returned raw; any safety margin is the
//! caller's choice and is applied through [`FeePolicy`].

use alloy_primitives::{Address, Bytes, U256};
use ica_types::{ChainReader, Domain};
use tracing::debug;

use crate::{
    errors::IcaError,
    router::{
        constants::{BPS_DENOMINATOR, PLACEHOLDER_FEE},
        interfaces::IInterchainAccountRouter,
        view_call,
    },
};

/// Native amount the origin router charges to relay `gas_limit` worth of execution to
/// `destination`.
pub async fn quote_gas_payment<R: ChainReader>(
    origin_client: &R,
    origin_router: Address,
    destination: Domain,
    gas_limit: u64,
) -> Result<U256, IcaError> {
    let call = IInterchainAccountRouter::quoteGasPaymentCall {
        destination,
        messageBody: Bytes::new(),
        gasLimit: U256::from(gas_limit),
    };
    let quote = view_call(
        origin_client,
        origin_router,
        &call,
        "quoteGasPayment",
        format!("router {origin_router}, destination {destination}, gas limit {gas_limit}"),
    )
    .await?
    ._0;
    debug!(%origin_router, destination, gas_limit, %quote, "quoted gas payment");
    Ok(quote)
}

/// Scale `quote` by `margin_bps / 10_000`, rounding up and saturating at `U256::MAX`.
///
/// Split as `(q / d) * m + ceil((q % d) * m / d)` so the product never overflows before the
/// division; a margin of at least 100% never yields less than `quote`.
pub fn apply_margin(quote: U256, margin_bps: u32) -> U256 {
    let denominator = U256::from(BPS_DENOMINATOR);
    let margin = U256::from(margin_bps);
    let (whole, rem) = quote.div_rem(denominator);

    // rem < 10_000 and margin < 2^32, so this cannot overflow.
    let (part, part_rem) = (rem * margin).div_rem(denominator);
    let part = if part_rem.is_zero() {
        part
    } else {
        part + U256::from(1)
    };

    whole
        .checked_mul(margin)
        .and_then(|scaled| scaled.checked_add(part))
        .unwrap_or(U256::MAX)
}

/// How the dispatch fee is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeePolicy {
    /// Attach exactly this amount.
    Fixed(U256),
    /// Quote the router for the resolved remote gas limit and scale by `margin_bps`.
    Quoted { margin_bps: u32 },
}

impl FeePolicy {
    /// The fixed 0.001 ether fee used when no quote is taken.
    pub const fn placeholder() -> Self {
        Self::Fixed(PLACEHOLDER_FEE)
    }

    /// Resolve the fee for one dispatch.
    pub async fn resolve<R: ChainReader>(
        &self,
        origin_client: &R,
        origin_router: Address,
        destination: Domain,
        gas_limit: u64,
    ) -> Result<U256, IcaError> {
        match *self {
            Self::Fixed(fee) => Ok(fee),
            Self::Quoted { margin_bps } => {
                let quote =
                    quote_gas_payment(origin_client, origin_router, destination, gas_limit).await?;
                Ok(apply_margin(quote, margin_bps))
            }
        }
    }
}
