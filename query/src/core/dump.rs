//! Indented, human-readable trace of a result tree.
//!
//! The line format is consumed by existing log scrapers and must stay stable:
//!
//! ```text
//! Attr="forum"
//!   SrcUids=[1 5 9]
//!   Child=0
//!     Attr="thread"
//!       SrcUids=[2 4]
//! ```

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::core::walk::walk;
use crate::tree::ResultNode;

/// Extra indentation added per tree level.
pub const INDENT_STEP: &str = "    ";

/// Verbosity knobs for [`dump`].
///
/// The default reproduces the historic trace exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpOptions {
    /// Emit a `DestUids=` line after `SrcUids=` for every node.
    pub dest_uids: bool,
}

/// Write the trace of `tree` to `out`, prefixing every line with `indent`.
///
/// An absent tree writes nothing. Errors come only from the sink.
pub fn dump<W: Write>(
    tree: Option<&ResultNode>,
    indent: &str,
    out: &mut W,
    options: &DumpOptions,
) -> io::Result<()> {
    let Some(root) = tree else {
        return Ok(());
    };
    for visit in walk(root) {
        if let Some(index) = visit.child_index {
            let parent_indent = level_indent(indent, visit.depth - 1);
            writeln!(out, "{parent_indent}  Child={index}")?;
        }
        let node_indent = level_indent(indent, visit.depth);
        writeln!(out, "{node_indent}Attr={}", quote_attr(&visit.node.attr))?;
        writeln!(out, "{node_indent}  SrcUids={}", format_uids(&visit.node.src_uids))?;
        if options.dest_uids {
            writeln!(
                out,
                "{node_indent}  DestUids={}",
                format_uids(&visit.node.dest_uids)
            )?;
        }
    }
    Ok(())
}

/// Render the trace into a `String`.
pub fn dump_to_string(
    tree: Option<&ResultNode>,
    indent: &str,
    options: &DumpOptions,
) -> io::Result<String> {
    let mut buf = Vec::new();
    dump(tree, indent, &mut buf, options)?;
    String::from_utf8(buf).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

/// Double-quote `attr` with Go `%q` escaping, which existing trace
/// scrapers expect.
///
/// Printable characters pass through; `\a \b \f \n \r \t \v` use short
/// escapes, other ASCII controls `\xNN`, other non-printables `\uNNNN` or
/// `\UNNNNNNNN`.
pub fn quote_attr(attr: &str) -> String {
    let mut quoted = String::with_capacity(attr.len() + 2);
    quoted.push('"');
    for ch in attr.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\u{07}' => quoted.push_str("\\a"),
            '\u{08}' => quoted.push_str("\\b"),
            '\u{0c}' => quoted.push_str("\\f"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{0b}' => quoted.push_str("\\v"),
            ch if is_printable(ch) => quoted.push(ch),
            ch if ch.is_ascii() => quoted.push_str(&format!("\\x{:02x}", ch as u32)),
            ch if (ch as u32) < 0x1_0000 => quoted.push_str(&format!("\\u{:04x}", ch as u32)),
            ch => quoted.push_str(&format!("\\U{:08x}", ch as u32)),
        }
    }
    quoted.push('"');
    quoted
}

fn is_printable(ch: char) -> bool {
    if ch == ' ' {
        return true;
    }
    !(ch.is_control() || ch.is_whitespace() || is_format_or_private_use(ch))
}

// Format (Cf), private-use and noncharacter code points.
fn is_format_or_private_use(ch: char) -> bool {
    matches!(
        ch as u32,
        0x00AD
            | 0x0600..=0x0605
            | 0x061C
            | 0x06DD
            | 0x070F
            | 0x180E
            | 0x200B..=0x200F
            | 0x202A..=0x202E
            | 0x2060..=0x2064
            | 0x2066..=0x206F
            | 0xE000..=0xF8FF
            | 0xFEFF
            | 0xFFF9..=0xFFFB
            | 0xFFFE..=0xFFFF
            | 0xF_0000..=0x10_FFFF
    )
}

/// Render a uid list as `[a b c]`.
pub fn format_uids(uids: &[u64]) -> String {
    let items: Vec<String> = uids.iter().map(u64::to_string).collect();
    format!("[{}]", items.join(" "))
}

fn level_indent(base: &str, depth: usize) -> String {
    let mut indent = String::with_capacity(base.len() + INDENT_STEP.len() * depth);
    indent.push_str(base);
    for _ in 0..depth {
        indent.push_str(INDENT_STEP);
    }
    indent
}
