//! Following a dispatch through the origin mailbox.

use alloy_primitives::{Address, B256};
use alloy_sol_types::SolEvent;
use ica_types::{EventSource, LogEntry};
use tracing::{debug, warn};

use crate::{errors::IcaError, router::interfaces::IMailbox};

/// Message ids from every `DispatchId` event `mailbox` emitted in `logs`, in log order.
///
/// Events with the same signature from any other contract are ignored.
pub fn dispatch_message_ids(mailbox: Address, logs: &[LogEntry]) -> Vec<B256> {
    logs.iter()
        .filter(|log| log.address == mailbox)
        .filter(|log| log.topics.first() == Some(&IMailbox::DispatchId::SIGNATURE_HASH))
        .filter_map(|log| log.topics.get(1).copied())
        .collect()
}

/// Message id of the dispatch `tx_hash` made through `mailbox`.
///
/// `Ok(None)` while the transaction is unmined or if it emitted no dispatch. A transaction that
/// dispatched more than once yields the first id.
pub async fn wait_for_message_id<S: EventSource>(
    source: &S,
    mailbox: Address,
    tx_hash: B256,
) -> Result<Option<B256>, IcaError> {
    let Some(logs) = source
        .receipt_logs(tx_hash)
        .await
        .map_err(IcaError::chain_call("receipt_logs", format!("transaction {tx_hash}")))?
    else {
        debug!(%tx_hash, "dispatch transaction not mined yet");
        return Ok(None);
    };

    let ids = dispatch_message_ids(mailbox, &logs);
    if ids.len() > 1 {
        warn!(%tx_hash, count = ids.len(), "transaction dispatched several messages");
    }
    Ok(ids.first().copied())
}
