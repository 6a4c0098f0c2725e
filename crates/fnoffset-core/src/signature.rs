//! Named signature sets persisted as JSON.
//!
//! A set maps stable names to a module plus either an export symbol or a
//! hex pattern, so callers can ship known fingerprints alongside a binary
//! instead of hardcoding them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::image::LoadedImage;
use crate::pattern::Signature;
use crate::resolver::{ExportLookup, ResolveStrategy, SignatureScan};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureEntry {
    pub name: String,
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl SignatureEntry {
    /// Build the resolution strategy this entry describes.
    ///
    /// An export symbol takes precedence over a pattern; an entry carrying
    /// neither is an [`Error::InvalidPattern`].
    pub fn strategy(&self) -> Result<EntryStrategy> {
        if let Some(symbol) = &self.export {
            return Ok(EntryStrategy::Export(ExportLookup::new(symbol)));
        }
        if let Some(pattern) = &self.pattern {
            return Ok(EntryStrategy::Scan(SignatureScan::new(Signature::parse(
                pattern,
            )?)));
        }
        Err(Error::InvalidPattern(format!(
            "entry '{}' has neither an export nor a pattern",
            self.name
        )))
    }
}

/// Strategy built from a [`SignatureEntry`].
#[derive(Debug, Clone)]
pub enum EntryStrategy {
    Export(ExportLookup),
    Scan(SignatureScan),
}

impl ResolveStrategy for EntryStrategy {
    fn resolve<I: LoadedImage>(&self, image: &I) -> Result<u64> {
        match self {
            EntryStrategy::Export(lookup) => lookup.resolve(image),
            EntryStrategy::Scan(scan) => scan.resolve(image),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignatureSet {
    #[serde(default)]
    pub version: String,
    pub entries: Vec<SignatureEntry>,
}

impl SignatureSet {
    pub fn entry(&self, name: &str) -> Option<&SignatureEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }
}

pub fn load_signatures<P: AsRef<Path>>(path: P) -> Result<SignatureSet> {
    let content = fs::read_to_string(&path)?;
    let data = serde_json::from_str(&content)?;
    Ok(data)
}

pub fn save_signatures<P: AsRef<Path>>(path: P, signatures: &SignatureSet) -> Result<()> {
    let content = serde_json::to_string_pretty(signatures)?;
    fs::write(path, content)?;
    Ok(())
}
