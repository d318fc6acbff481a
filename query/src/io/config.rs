//! Debug-tool configuration stored as TOML (default `query.toml`).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::check::ViolationPolicy;
use crate::core::dump::DumpOptions;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "query.toml";

/// Configuration for checking and dumping result trees.
///
/// Missing fields default to the historic behaviour: return the first
/// violation, no base indent, no destination uids in dumps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct QueryDebugConfig {
    /// How `validate` reacts to an unsorted uid list.
    pub policy: ViolationPolicy,

    /// Prefix for every dumped line.
    pub indent: String,

    pub dump: DumpOptions,
}

impl QueryDebugConfig {
    pub fn validate(&self) -> Result<()> {
        if self.indent.chars().any(|ch| ch != ' ' && ch != '\t') {
            return Err(anyhow!("indent must contain only spaces or tabs"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `QueryDebugConfig::default()`.
pub fn load_config(path: &Path) -> Result<QueryDebugConfig> {
    if !path.exists() {
        return Ok(QueryDebugConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: QueryDebugConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &QueryDebugConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
