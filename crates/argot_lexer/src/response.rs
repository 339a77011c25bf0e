//! Response-file expansion.
//!
//! `@path` elements expand to the file's contents: blank lines and
//! `#`-prefixed comment lines are skipped, remaining lines become one
//! argument each (`LineSeparated`) or are split like a command-line string
//! (`SpaceSeparated`). Nested references expand recursively through the
//! tokenizer's work queue; each produced element's location chains back to
//! the reference that pulled it in.
use std::fs;

use argot_model::ResponseFileMode;
use argot_syntax::{Location, split_command_line};

/// Nesting limit for `@file` references; a chain this deep is a cycle.
const MAX_NESTING: usize = 16;

pub(crate) fn expand_response_file(
    path: &str,
    mode: ResponseFileMode,
    reference: &Location,
) -> Result<Vec<(String, Location)>, String> {
    if nesting_depth(reference) >= MAX_NESTING {
        return Err(format!("nesting deeper than {MAX_NESTING} levels"));
    }
    let text = fs::read_to_string(path).map_err(|e| e.to_string())?;

    let mut out: Vec<(String, Location)> = Vec::new();
    let mut offset = 0u32;
    for line in text.lines() {
        let line_offset = offset;
        // +1 for the newline; the final line may not have one, which only
        // affects offsets past the end of the file.
        offset += line.len() as u32 + 1;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match mode {
            ResponseFileMode::LineSeparated => {
                out.push((
                    trimmed.to_string(),
                    Location::response(path, line_offset, reference.clone()),
                ));
            }
            ResponseFileMode::SpaceSeparated => {
                for (arg, col) in split_command_line(line) {
                    out.push((
                        arg,
                        Location::response(path, line_offset + col, reference.clone()),
                    ));
                }
            }
            ResponseFileMode::Disabled => unreachable!("expansion called while disabled"),
        }
    }
    Ok(out)
}

fn nesting_depth(reference: &Location) -> usize {
    let mut depth = 0;
    let mut loc = reference;
    while let Some(outer) = &loc.outer {
        depth += 1;
        loc = outer;
    }
    depth
}
