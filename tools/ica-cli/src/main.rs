mod args;
mod chain;
mod record;
mod registry;

use std::{path::PathBuf, time::Duration};

use alloy_primitives::{Address, Bytes, B256, U256};
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use ethers::providers::{Http, Provider};
use ica_router_client::{
    account_salt, apply_margin, encode_default, encode_override, predict_remote_account,
    quote_gas_payment, resolve_and_verify, send_transaction, wait_for_message_id, Account,
    AccountRoute, DispatchRequest, FeePolicy, InterchainAccount,
};
use ica_types::{
    AccountKey, Call, ChainAddresses, ChainRegistry, Domain, EventSource, RoutingOverride,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    args::{parse_address, parse_call, parse_fee, parse_hex_bytes, parse_wei},
    chain::EthersChain,
    record::{append_record, DispatchRecord},
    registry::JsonRegistry,
};

/// Derive, verify, quote, encode and dispatch Hyperlane interchain account calls.
///
/// Chain names resolve through a JSON registry holding each chain's RPC URL, mailbox,
/// interchain account router and ISM.
#[derive(Parser, Debug)]
#[command(name = "ica", author, version, about)]
struct Cli {
    /// Chain registry JSON.
    #[arg(long, env = "ICA_REGISTRY", default_value = "registry.json", global = true)]
    registry: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the account salt for a key.
    Salt {
        #[arg(long)]
        origin: Domain,
        #[arg(long, value_parser = parse_address)]
        owner: Address,
        /// Origin-side router bound into the salt.
        #[arg(long, value_parser = parse_address)]
        router: Address,
        #[arg(long, value_parser = parse_address)]
        ism: Address,
    },
    /// Predict an owner's remote account address without touching a chain.
    Predict {
        #[arg(long)]
        origin: Domain,
        #[arg(long, value_parser = parse_address)]
        owner: Address,
        #[arg(long, value_parser = parse_address)]
        origin_router: Address,
        #[arg(long, value_parser = parse_address)]
        remote_router: Address,
        #[arg(long, value_parser = parse_address)]
        remote_ism: Address,
    },
    /// Resolve an owner's account from both routers and check it against the prediction.
    Account {
        #[arg(long)]
        origin_chain: String,
        #[arg(long)]
        remote_chain: String,
        #[arg(long, value_parser = parse_address)]
        owner: Address,
    },
    /// Quote the relay fee for a remote gas limit.
    Quote {
        #[arg(long)]
        origin_chain: String,
        #[arg(long)]
        remote_chain: String,
        #[arg(long)]
        gas_limit: u64,
        /// Also print the quote scaled by this margin (10000 = 100%).
        #[arg(long)]
        margin_bps: Option<u32>,
    },
    /// Print a router payload.
    Encode {
        #[arg(long)]
        destination: Domain,
        /// Router override; requires --ism.
        #[arg(long, value_parser = parse_address, requires = "ism", conflicts_with = "hook_metadata")]
        router: Option<Address>,
        #[arg(long, value_parser = parse_address, requires = "router")]
        ism: Option<Address>,
        /// Hook metadata for the default (non-override) entry point.
        #[arg(long, value_parser = parse_hex_bytes)]
        hook_metadata: Option<Bytes>,
        /// Call as `to[:value[:data]]`; repeat for a batch.
        #[arg(long = "call", value_parser = parse_call, required = true)]
        calls: Vec<Call>,
    },
    /// Dispatch one call through the owner's interchain account.
    Send {
        #[arg(long)]
        origin_chain: String,
        #[arg(long)]
        remote_chain: String,
        /// Owner key on the origin chain.
        #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
        #[arg(long, value_parser = parse_address)]
        to: Address,
        #[arg(long, value_parser = parse_wei)]
        value: Option<U256>,
        #[arg(long, value_parser = parse_hex_bytes, default_value = "0x")]
        data: Bytes,
        /// Remote gas limit; estimated on the remote chain when omitted.
        #[arg(long)]
        gas: Option<u64>,
        /// `fixed:<wei>`, `quote:<bps>` or `placeholder` (0.001 ether).
        #[arg(long, value_parser = parse_fee, default_value = "placeholder")]
        fee: FeePolicy,
        /// Poll the origin receipt and print the dispatched message id.
        #[arg(long)]
        wait: bool,
        /// Seconds to poll for the receipt with --wait.
        #[arg(long, default_value_t = 120)]
        wait_timeout: u64,
        /// Append the dispatch to this JSON file.
        #[arg(long)]
        record: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Salt {
            origin,
            owner,
            router,
            ism,
        } => {
            println!("{}", account_salt(&AccountKey::new(origin, owner, router, ism)));
        }
        Command::Predict {
            origin,
            owner,
            origin_router,
            remote_router,
            remote_ism,
        } => {
            let account =
                predict_remote_account(origin, owner, origin_router, remote_router, remote_ism);
            println!("{account}");
        }
        Command::Account {
            origin_chain,
            remote_chain,
            owner,
        } => {
            let registry = JsonRegistry::load(&cli.registry)?;
            let origin = Endpoint::read_only(&registry, &origin_chain)?;
            let remote = Endpoint::read_only(&registry, &remote_chain)?;
            let route = AccountRoute {
                origin_domain: origin.domain().await?,
                owner,
                origin_router: origin.addresses.router,
                remote_router: remote.addresses.router,
                remote_ism: remote.addresses.ism,
            };
            let account = resolve_and_verify(&origin.chain, &remote.chain, &route).await?;
            info!(%owner, %account, %origin_chain, %remote_chain, "account verified against both routers");
            println!("{account}");
        }
        Command::Quote {
            origin_chain,
            remote_chain,
            gas_limit,
            margin_bps,
        } => {
            let registry = JsonRegistry::load(&cli.registry)?;
            let origin = Endpoint::read_only(&registry, &origin_chain)?;
            let remote = Endpoint::read_only(&registry, &remote_chain)?;
            let destination = remote.domain().await?;
            let quote =
                quote_gas_payment(&origin.chain, origin.addresses.router, destination, gas_limit)
                    .await?;
            println!("{quote}");
            if let Some(bps) = margin_bps {
                println!("{}", apply_margin(quote, bps));
            }
        }
        Command::Encode {
            destination,
            router,
            ism,
            hook_metadata,
            calls,
        } => {
            let payload = match (router, ism) {
                (Some(router), Some(ism)) => {
                    encode_override(destination, RoutingOverride { router, ism }, &calls)?
                }
                (None, None) => {
                    let hook_metadata = hook_metadata.unwrap_or_default();
                    encode_default(destination, &hook_metadata, &calls)?
                }
                _ => bail!("--router and --ism go together"),
            };
            println!("{payload}");
        }
        Command::Send {
            origin_chain,
            remote_chain,
            private_key,
            to,
            value,
            data,
            gas,
            fee,
            wait,
            wait_timeout,
            record,
        } => {
            let registry = JsonRegistry::load(&cli.registry)?;
            let origin_addresses = registry.lookup_chain_addresses(&origin_chain)?;
            let origin = EthersChain::connect_signer(
                registry.rpc_url(&origin_chain)?,
                registry.domain_id(&origin_chain)?,
                &private_key,
            )
            .await?;
            let remote = Endpoint::read_only(&registry, &remote_chain)?;

            let owner = origin.signer_address();
            let origin_domain = origin.domain().await?;
            let account = InterchainAccount::resolve(
                &remote.chain,
                &remote.addresses,
                origin_domain,
                owner,
                origin_addresses.router,
                origin,
            )
            .await?;
            info!(%owner, account = %account.address(), %origin_chain, %remote_chain, "interchain account bound");

            let request = DispatchRequest {
                to,
                value,
                data,
                gas,
            };
            let relay = send_transaction(Some(&account), &remote.chain, request, &fee).await?;
            println!("{}", relay.origin_tx_hash);

            let message_id = if wait {
                let id = poll_message_id(
                    account.origin_client(),
                    origin_addresses.mailbox,
                    relay.origin_tx_hash,
                    Duration::from_secs(wait_timeout),
                )
                .await?;
                println!("{id}");
                Some(id.to_string())
            } else {
                None
            };

            if let Some(path) = record {
                let entry = DispatchRecord {
                    origin_chain,
                    remote_chain,
                    account: account.address().to_string(),
                    origin_router: account.origin_router().to_string(),
                    origin_tx_hash: relay.origin_tx_hash.to_string(),
                    destination: relay.destination,
                    fee_wei: relay.fee.to_string(),
                    remote_gas_limit: relay.remote_gas_limit,
                    message_id,
                };
                append_record(&path, &entry)?;
                info!(path = %path.display(), "dispatch recorded");
            }
        }
    }
    Ok(())
}

/// A registry chain with a read-only client.
struct Endpoint {
    chain: EthersChain<Provider<Http>>,
    addresses: ChainAddresses,
}

impl Endpoint {
    fn read_only(registry: &JsonRegistry, name: &str) -> Result<Self> {
        let addresses = registry.lookup_chain_addresses(name)?;
        let chain = EthersChain::connect(registry.rpc_url(name)?, registry.domain_id(name)?)?;
        Ok(Self { chain, addresses })
    }

    async fn domain(&self) -> Result<Domain> {
        Ok(self.chain.domain().await?)
    }
}

/// Poll the origin receipt until a dispatch from `mailbox` shows up or `timeout` passes.
async fn poll_message_id<S: EventSource>(
    source: &S,
    mailbox: Address,
    tx_hash: B256,
    timeout: Duration,
) -> Result<B256> {
    const POLL_INTERVAL: Duration = Duration::from_secs(3);

    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if let Some(id) = wait_for_message_id(source, mailbox, tx_hash).await? {
            return Ok(id);
        }
        if tokio::time::Instant::now() >= deadline {
            warn!(%tx_hash, "no dispatch seen before timeout");
            bail!("timed out waiting for the dispatch of {tx_hash}; it may still be pending");
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    const ADDR: &str = "0x1111111111111111111111111111111111111111";

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_encode_overrides_go_together() {
        let partial = Cli::try_parse_from([
            "ica", "encode", "--destination", "1", "--router", ADDR, "--call", ADDR,
        ]);
        assert!(partial.is_err());

        let mixed = Cli::try_parse_from([
            "ica", "encode", "--destination", "1", "--router", ADDR, "--ism", ADDR,
            "--hook-metadata", "0x01", "--call", ADDR,
        ]);
        assert!(mixed.is_err());

        let with_value = format!("{ADDR}:1:0xab");
        let ok = Cli::try_parse_from([
            "ica", "encode", "--destination", "1", "--router", ADDR, "--ism", ADDR, "--call",
            with_value.as_str(), "--call", ADDR,
        ])
        .unwrap();
        match ok.command {
            Command::Encode { calls, .. } => assert_eq!(calls.len(), 2),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_send_defaults_to_placeholder_fee() {
        let cli = Cli::try_parse_from([
            "ica", "send", "--origin-chain", "a", "--remote-chain", "b", "--private-key", "0x01",
            "--to", ADDR,
        ])
        .unwrap();
        match cli.command {
            Command::Send { fee, gas, data, .. } => {
                assert_eq!(fee, FeePolicy::placeholder());
                assert_eq!(gas, None);
                assert!(data.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
