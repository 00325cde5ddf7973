//! Chain registry file.
//!
//! ```json
//! {
//!   "chains": {
//!     "bsctestnet": {
//!       "domainId": 97,
//!       "rpcUrl": "https://...",
//!       "mailbox": "0x...",
//!       "interchainAccountIsm": "0x...",
//!       "interchainAccountRouter": "0x..."
//!     }
//!   }
//! }
//! ```

use std::{collections::BTreeMap, fs, path::Path, str::FromStr};

use alloy_primitives::Address;
use anyhow::{Context, Result};
use ica_types::{ChainAddresses, ChainRegistry, Domain, RegistryError};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct JsonRegistry {
    #[serde(default)]
    chains: BTreeMap<String, ChainEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChainEntry {
    domain_id: Option<Domain>,
    rpc_url: Option<String>,
    mailbox: Option<String>,
    interchain_account_ism: Option<String>,
    interchain_account_router: Option<String>,
}

impl JsonRegistry {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed reading registry {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("failed parsing registry {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    fn entry(&self, chain: &str) -> Result<&ChainEntry, RegistryError> {
        self.chains
            .get(chain)
            .ok_or_else(|| RegistryError::UnknownChain(chain.to_string()))
    }

    pub fn rpc_url(&self, chain: &str) -> Result<&str, RegistryError> {
        self.entry(chain)?
            .rpc_url
            .as_deref()
            .ok_or(RegistryError::MissingField {
                chain: chain.to_string(),
                field: "rpcUrl",
            })
    }

    /// Explicit protocol domain, when it differs from (or should not be read as) the chain id.
    pub fn domain_id(&self, chain: &str) -> Result<Option<Domain>, RegistryError> {
        Ok(self.entry(chain)?.domain_id)
    }
}

impl ChainRegistry for JsonRegistry {
    fn lookup_chain_addresses(&self, chain_name: &str) -> Result<ChainAddresses, RegistryError> {
        let entry = self.entry(chain_name)?;
        let address = |value: &Option<String>, field: &'static str| -> Result<Address, RegistryError> {
            let raw = value.as_deref().ok_or(RegistryError::MissingField {
                chain: chain_name.to_string(),
                field,
            })?;
            Address::from_str(raw).map_err(|e| RegistryError::Invalid {
                chain: chain_name.to_string(),
                reason: format!("{field} `{raw}`: {e}"),
            })
        };

        Ok(ChainAddresses {
            mailbox: address(&entry.mailbox, "mailbox")?,
            ism: address(&entry.interchain_account_ism, "interchainAccountIsm")?,
            router: address(&entry.interchain_account_router, "interchainAccountRouter")?,
        })
    }
}
