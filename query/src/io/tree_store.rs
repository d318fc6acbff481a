//! Result tree load/save helpers with JSON Schema validation.
//!
//! Loading never reorders uid lists; sortedness is checked separately by
//! [`crate::core::invariants`].

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde_json::Value;
use tracing::debug;

use crate::tree::ResultNode;

/// JSON Schema for serialized result trees.
pub const V1_SCHEMA: &str = include_str!("../../../schemas/result_tree/v1.schema.json");

/// Load a result tree from disk and check it against [`V1_SCHEMA`].
pub fn load_tree(tree_path: &Path) -> Result<ResultNode> {
    let contents = fs::read_to_string(tree_path)
        .with_context(|| format!("read tree {}", tree_path.display()))?;
    let tree = parse_tree(&contents).with_context(|| format!("load tree {}", tree_path.display()))?;
    debug!(path = %tree_path.display(), nodes = tree.node_count(), "loaded result tree");
    Ok(tree)
}

/// Parse a result tree from JSON text and check it against [`V1_SCHEMA`].
pub fn parse_tree(raw: &str) -> Result<ResultNode> {
    let value: Value = serde_json::from_str(raw).context("parse tree json")?;
    validate_schema(&value)?;
    let tree: ResultNode = serde_json::from_value(value).context("deserialize tree")?;
    Ok(tree)
}

/// Write tree to disk as pretty JSON with a trailing newline.
pub fn write_tree(tree_path: &Path, tree: &ResultNode) -> Result<()> {
    let mut buf = serde_json::to_string_pretty(tree)?;
    buf.push('\n');
    fs::write(tree_path, buf).with_context(|| format!("write tree {}", tree_path.display()))
}

fn validate_schema(tree: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(V1_SCHEMA).context("parse result tree schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(tree) {
        let messages = compiled
            .iter_errors(tree)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!(
            "tree schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}
