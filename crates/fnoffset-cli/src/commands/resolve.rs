//! Resolve command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use fnoffset_core::load_signatures;
use tracing::debug;

use super::{report, resolve_offset};

/// Run the resolve command
pub fn run(signatures_path: &Path, name: &str) -> Result<()> {
    let set = load_signatures(signatures_path)
        .with_context(|| format!("failed to load signature set from {:?}", signatures_path))?;
    debug!(
        "Loaded {} signature entries from {:?}",
        set.entries.len(),
        signatures_path
    );

    let entry = set
        .entry(name)
        .with_context(|| format!("no entry named '{}' in signature set", name))?;

    let strategy = entry.strategy()?;
    report(&entry.module, resolve_offset(&entry.module, &strategy))
}
