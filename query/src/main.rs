//! Diagnostic CLI for serialized query result trees.
//!
//! Loads a result tree from JSON, then either proves every uid list is
//! strictly increasing (`validate`) or prints the indented debug trace
//! (`dump`).

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use query::check::{ViolationPolicy, check_result_tree, trace_result_tree};
use query::core::dump::dump;
use query::core::invariants::collect_sorted_violations;
use query::exit_codes;
use query::io::config::{DEFAULT_CONFIG_FILE, load_config};
use query::io::tree_store::load_tree;
use query::logging;

#[derive(Parser)]
#[command(
    name = "query",
    version,
    about = "Check and dump graph-query result trees"
)]
struct Cli {
    /// Config file; missing means defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that every src/dest uid list in the tree is strictly increasing.
    Validate {
        /// Result tree JSON file.
        tree: PathBuf,
        /// Report every unsorted list instead of only the first.
        #[arg(long)]
        all: bool,
        /// Override the configured violation policy.
        #[arg(long, value_enum)]
        policy: Option<ViolationPolicy>,
    },
    /// Print the indented debug trace of the tree.
    Dump {
        /// Result tree JSON file.
        tree: PathBuf,
        /// Prefix for every line (overrides config).
        #[arg(long)]
        indent: Option<String>,
        /// Also print destination uids.
        #[arg(long)]
        dest_uids: bool,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Validate { tree, all, policy } => cmd_validate(&cli.config, &tree, all, policy),
        Command::Dump {
            tree,
            indent,
            dest_uids,
        } => cmd_dump(&cli.config, &tree, indent, dest_uids),
    }
}

fn cmd_validate(
    config_path: &Path,
    tree_path: &Path,
    all: bool,
    policy: Option<ViolationPolicy>,
) -> Result<i32> {
    let cfg = load_config(config_path).context("load config")?;
    let tree = load_tree(tree_path)?;
    trace_result_tree(Some(&tree), &cfg.dump);

    match check_result_tree(Some(&tree), policy.unwrap_or(cfg.policy)) {
        Ok(report) if report.is_clean() => {
            println!("ok ({} nodes)", report.nodes);
            Ok(exit_codes::OK)
        }
        Ok(report) => {
            println!(
                "{} unsorted list(s) logged ({} nodes)",
                report.violations.len(),
                report.nodes
            );
            Ok(exit_codes::OK)
        }
        Err(err) => {
            if all {
                for violation in collect_sorted_violations(&tree) {
                    eprintln!("{violation}");
                }
            } else {
                eprintln!("{err}");
            }
            Ok(exit_codes::UNSORTED)
        }
    }
}

fn cmd_dump(
    config_path: &Path,
    tree_path: &Path,
    indent: Option<String>,
    dest_uids: bool,
) -> Result<i32> {
    let cfg = load_config(config_path).context("load config")?;
    let tree = load_tree(tree_path)?;

    let mut options = cfg.dump;
    options.dest_uids |= dest_uids;
    let indent = indent.unwrap_or(cfg.indent);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dump(Some(&tree), &indent, &mut out, &options).context("write dump")?;
    out.flush().context("flush stdout")?;
    Ok(exit_codes::OK)
}
