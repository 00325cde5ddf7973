//! Dispatch record file.
//!
//! Every `send` can append what it dispatched to a JSON file so operators can follow messages
//! after the process exits. Writes go to a staging file next to it, which is synced and then renamed into place.

use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// One dispatch as it is written to the record file.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchRecord {
    pub origin_chain: String,
    pub remote_chain: String,
    pub account: String,
    pub origin_router: String,
    pub origin_tx_hash: String,
    pub destination: u32,
    pub fee_wei: String,
    pub remote_gas_limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

/// Append `record` under `dispatches` in the file at `path`, creating it if needed.
///
/// A file that exists but is not a dispatch record (a non-object root, or a `dispatches` key
/// that is not an array) is refused and left untouched.
pub fn append_record(path: &Path, record: &DispatchRecord) -> Result<()> {
    let now = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let file = RecordFile::new(path);
    let mut root = file.load()?;

    let mut entry = serde_json::to_value(record).context("failed serialising dispatch record")?;
    entry["recorded_at"] = json!(now);
    root.insert("updated_at".into(), json!(now));
    match root
        .entry("dispatches")
        .or_insert_with(|| json!([]))
        .as_array_mut()
    {
        Some(dispatches) => dispatches.push(entry),
        None => bail!("{}: `dispatches` is not an array", path.display()),
    }

    file.store(&root)
}

/// Location of a record file and the staging file next to it.
struct RecordFile<'a> {
    path: &'a Path,
}

impl<'a> RecordFile<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// Existing records, or an empty object for a missing or blank file.
    fn load(&self) -> Result<Map<String, Value>> {
        let existing = match fs::read_to_string(self.path) {
            Ok(existing) => existing,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed reading {}", self.path.display()))
            }
        };
        if existing.trim().is_empty() {
            return Ok(Map::new());
        }

        let root: Value = serde_json::from_str(&existing)
            .with_context(|| format!("failed parsing JSON in {}", self.path.display()))?;
        let Value::Object(root) = root else {
            bail!("{} is not a dispatch record file", self.path.display());
        };
        if root.get("dispatches").is_some_and(|d| !d.is_array()) {
            bail!("{}: `dispatches` is not an array", self.path.display());
        }
        Ok(root)
    }

    /// Write `root` to the staging file, flush it to disk, then rename it over the record file.
    fn store(&self, root: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating directory {}", parent.display()))?;
        }

        let staging = self.staging_path();
        let mut out = File::create(&staging)
            .with_context(|| format!("failed creating {}", staging.display()))?;
        serde_json::to_writer_pretty(&mut out, root)
            .with_context(|| format!("failed writing dispatch records to {}", staging.display()))?;
        out.write_all(b"\n")
            .and_then(|()| out.sync_all())
            .with_context(|| format!("failed flushing {}", staging.display()))?;
        drop(out);

        fs::rename(&staging, self.path)
            .with_context(|| format!("failed replacing {}", self.path.display()))
    }

    /// Sibling of the record file, unique per process so concurrent runs do not share it.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.staging", std::process::id()));
        self.path.with_file_name(name)
    }
}
