//! CLI tests for `query validate`.
//!
//! Spawns the query binary and verifies exit codes and reports for sorted,
//! unsorted, and malformed trees.

use std::process::Command;

use query::exit_codes;
use query::test_support::{TreeDir, forum_tree, leaf, node_with_children, unsorted_forum_tree};

fn query_cmd(dir: &TreeDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_query"));
    cmd.current_dir(dir.root()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn sorted_tree_exits_ok() {
    let dir = TreeDir::new().expect("tempdir");
    let path = dir.write_tree("forum", &forum_tree()).expect("write tree");

    let output = query_cmd(&dir)
        .arg("validate")
        .arg(&path)
        .output()
        .expect("query validate");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "ok (2 nodes)\n");
}

#[test]
fn unsorted_tree_exits_with_unsorted_code() {
    let dir = TreeDir::new().expect("tempdir");
    let path = dir
        .write_tree("forum", &unsorted_forum_tree())
        .expect("write tree");

    let output = query_cmd(&dir)
        .arg("validate")
        .arg(&path)
        .output()
        .expect("query validate");

    assert_eq!(output.status.code(), Some(exit_codes::UNSORTED));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("dest uid list not sorted"));
    assert!(stderr.contains("[11 10]"));
}

#[test]
fn all_flag_reports_every_violation() {
    let dir = TreeDir::new().expect("tempdir");
    let tree = node_with_children("root", &[2, 1], vec![leaf("a", &[], &[4, 4])]);
    let path = dir.write_tree("tree", &tree).expect("write tree");

    let output = query_cmd(&dir)
        .args(["validate", "--all"])
        .arg(&path)
        .output()
        .expect("query validate");

    assert_eq!(output.status.code(), Some(exit_codes::UNSORTED));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("src uid list not sorted at index 0 in root"));
    assert!(stderr.contains("dest uid list not sorted at index 0 in root/a[0]"));
}

#[test]
fn log_policy_from_config_exits_ok() {
    let dir = TreeDir::new().expect("tempdir");
    dir.write_raw("query.toml", "policy = \"log\"\n")
        .expect("write config");
    let path = dir
        .write_tree("forum", &unsorted_forum_tree())
        .expect("write tree");

    let output = query_cmd(&dir)
        .arg("validate")
        .arg(&path)
        .output()
        .expect("query validate");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(String::from_utf8_lossy(&output.stdout).contains("1 unsorted list(s) logged"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("dest uid list not sorted"));
}

#[test]
fn malformed_tree_exits_invalid() {
    let dir = TreeDir::new().expect("tempdir");
    let path = dir
        .write_raw("bad.json", r#"{"attr": 7}"#)
        .expect("write tree");

    let status = query_cmd(&dir)
        .arg("validate")
        .arg(&path)
        .status()
        .expect("query validate");

    assert_eq!(status.code(), Some(exit_codes::INVALID));
}

#[test]
fn dump_target_log_filter_traces_tree() {
    let dir = TreeDir::new().expect("tempdir");
    let path = dir.write_tree("forum", &forum_tree()).expect("write tree");

    let output = query_cmd(&dir)
        .env("RUST_LOG", "query::dump=debug")
        .arg("validate")
        .arg(&path)
        .output()
        .expect("query validate");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SrcUids=[1 5 9]"));
    assert!(stderr.contains("SrcUids=[2 4]"));
}
