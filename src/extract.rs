//! Comment-block scanner — line-by-line over C-comment-syntax sources.
//!
//! Groups consecutive `//`-family lines (and `/* ... */` regions) into
//! blocks, strips the comment markers, and keeps only blocks whose first
//! line carries an `openapi:` directive. Indentation after the marker is
//! preserved — it is significant YAML.

use regex::Regex;
use std::sync::LazyLock;

/// Marker that gates a comment block into the annotation pipeline.
pub const DIRECTIVE_MARKER: &str = "openapi:";

// `//`, `///`, `//!` followed by at most one space of padding.
static RE_LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*//[/!]*\x20?(.*)$").unwrap());

static RE_BLOCK_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*/\*\x20?(.*)$").unwrap());

static RE_BLOCK_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?)\s*\*/").unwrap());

/// Extract qualifying annotation blocks from one source file, in order.
///
/// Each returned block has markers stripped, tabs normalized to 4 spaces,
/// and blank lines dropped, per the assembler's input contract.
pub fn annotation_blocks(source: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<String>> = None;
    let mut in_block_comment = false;

    for line in source.lines() {
        if in_block_comment {
            if let Some(caps) = RE_BLOCK_CLOSE.captures(line) {
                push_line(&mut current, &caps[1]);
                in_block_comment = false;
                finish_group(&mut current, &mut blocks);
            } else {
                push_line(&mut current, line);
            }
            continue;
        }

        if let Some(caps) = RE_BLOCK_OPEN.captures(line) {
            finish_group(&mut current, &mut blocks);
            let rest = caps.get(1).map_or("", |m| m.as_str());
            if let Some(end) = RE_BLOCK_CLOSE.captures(rest) {
                // one-line /* ... */ comment
                push_line(&mut current, &end[1]);
                finish_group(&mut current, &mut blocks);
            } else {
                push_line(&mut current, rest);
                in_block_comment = true;
            }
        } else if let Some(caps) = RE_LINE_COMMENT.captures(line) {
            push_line(&mut current, &caps[1]);
        } else {
            finish_group(&mut current, &mut blocks);
        }
    }
    finish_group(&mut current, &mut blocks);

    blocks
}

fn push_line(current: &mut Option<Vec<String>>, text: &str) {
    let normalized = text.replace('\t', "    ");
    if normalized.trim().is_empty() {
        return;
    }
    current.get_or_insert_with(Vec::new).push(normalized);
}

/// Close the open comment group; keep it only if its first line is a directive.
fn finish_group(current: &mut Option<Vec<String>>, blocks: &mut Vec<String>) {
    if let Some(lines) = current.take() {
        if lines
            .first()
            .is_some_and(|l| l.trim_start().starts_with(DIRECTIVE_MARKER))
        {
            blocks.push(lines.join("\n"));
        }
    }
}
