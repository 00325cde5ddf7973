//! Shared types for account keys, call batches and the chain collaborators the core talks to.

#![allow(async_fn_in_trait)]

pub mod account;
pub mod call;
pub mod chain;

pub use account::{AccountKey, ChainAddresses, Domain, RoutingOverride};
pub use call::{Call, LogEntry, TransactionRequest};
pub use chain::{ChainCallError, ChainReader, ChainRegistry, ChainWriter, EventSource, RegistryError};
