//! CLI command implementations.
//!
//! Each subcommand lives in its own module with a `run` entry point.
//! Actual module loading goes through the platform loader, which only
//! exists on Windows; other platforms get a clear error instead.

pub mod export;
pub mod hex;
pub mod resolve;
pub mod scan;

use anyhow::Result;
use fnoffset_core::ResolveStrategy;
use owo_colors::OwoColorize;

#[cfg(windows)]
pub fn resolve_offset<S: ResolveStrategy>(module: &str, strategy: &S) -> Result<u64> {
    let resolver = fnoffset_core::OffsetResolver::system();
    Ok(resolver.resolve(module, strategy)?)
}

#[cfg(not(windows))]
pub fn resolve_offset<S: ResolveStrategy>(_module: &str, _strategy: &S) -> Result<u64> {
    anyhow::bail!("module inspection requires the Windows platform loader")
}

/// Print a resolved offset, or a highlighted miss for genuine not-found.
pub fn report(module: &str, result: Result<u64>) -> Result<()> {
    match result {
        Ok(offset) => {
            println!("{} {:#x} ({})", "Found:".green(), offset, module);
            Ok(())
        }
        Err(e) => {
            let not_found = e
                .downcast_ref::<fnoffset_core::Error>()
                .is_some_and(fnoffset_core::Error::is_not_found);
            if not_found {
                println!("{} {}", "Not found:".red(), e);
                Ok(())
            } else {
                Err(e)
            }
        }
    }
}
