//! Hyperlane interchain account (ICA) client core.
//!
//! Derives the deterministic address of an owner's interchain account, cross-checks it against
//! the routers' own views, encodes router call batches, quotes relay fees and drives a single
//! dispatch through the origin router. Chain access goes through the collaborator traits in
//! [`ica_types`]; nothing here signs or talks to a node directly.

pub mod account;
pub mod create2;
pub mod decoder;
pub mod dispatch;
pub mod encoder;
pub mod errors;
pub mod events;
pub mod quote;
pub mod resolver;
pub mod router;
pub mod salt;
pub mod utils;

#[cfg(test)]
mod mock;
#[cfg(test)]
mod tests;

pub use account::{Account, Capability, InterchainAccount};
pub use create2::{account_address, create2_address, create2_address_from_hash, predict_remote_account};
pub use decoder::{decode_default, decode_message, decode_override, RouterMessage};
pub use dispatch::{build, send_transaction, AwaitingRelay, DispatchRequest};
pub use encoder::{encode_default, encode_override};
pub use errors::{ChainCallError, DecodeError, EncodingError, IcaError};
pub use events::{dispatch_message_ids, wait_for_message_id};
pub use quote::{apply_margin, quote_gas_payment, FeePolicy};
pub use resolver::{
    default_ism, resolve_and_verify, resolve_local_account, resolve_remote_account, verify_account,
    AccountRoute,
};
pub use salt::account_salt;
