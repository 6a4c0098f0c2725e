//! Export command implementation.

use anyhow::Result;
use fnoffset_core::ExportLookup;

use super::{report, resolve_offset};

/// Run the export command
pub fn run(module: &str, symbol: &str) -> Result<()> {
    let strategy = ExportLookup::new(symbol);
    report(module, resolve_offset(module, &strategy))
}
