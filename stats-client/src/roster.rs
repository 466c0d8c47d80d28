//! The combined roster artifact: one full name per line, sorted and
//! deduplicated, rewritten only when the content actually changed.

use dugout_core::CoreError;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterWrite {
    /// The file was (re)written with this many names.
    Written { names: usize },
    /// The existing file already had identical content.
    Unchanged,
}

/// Write the roster file idempotently. The `BTreeSet` already carries the
/// sort order and deduplication; content is newline-joined with no
/// trailing newline, so a repeat run with identical upstream data is a
/// byte-identical no-op.
pub fn write_roster_file(path: &Path, names: &BTreeSet<String>) -> Result<RosterWrite, CoreError> {
    let content = names.iter().cloned().collect::<Vec<_>>().join("\n");

    if let Ok(existing) = fs::read_to_string(path) {
        if existing == content {
            debug!("Roster file {} unchanged", path.display());
            return Ok(RosterWrite::Unchanged);
        }
    }

    fs::write(path, &content)?;
    Ok(RosterWrite::Written { names: names.len() })
}
