//! Offset resolution engine composing export lookup and signature scanning.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::image::{ImageLoader, LoadedImage};
use crate::pattern::Signature;

/// One way of locating a function inside a loaded image.
///
/// Export lookup and signature scanning are the two implementations; the
/// engine drives either through the same call site.
pub trait ResolveStrategy {
    fn resolve<I: LoadedImage>(&self, image: &I) -> Result<u64>;
}

/// Resolve via the image's export table.
#[derive(Debug, Clone)]
pub struct ExportLookup {
    symbol: String,
}

impl ExportLookup {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl ResolveStrategy for ExportLookup {
    fn resolve<I: LoadedImage>(&self, image: &I) -> Result<u64> {
        image.export_offset(&self.symbol)
    }
}

/// Resolve by scanning the full image for a masked byte signature.
#[derive(Debug, Clone)]
pub struct SignatureScan {
    signature: Signature,
}

impl SignatureScan {
    pub fn new(signature: Signature) -> Self {
        Self { signature }
    }
}

impl ResolveStrategy for SignatureScan {
    fn resolve<I: LoadedImage>(&self, image: &I) -> Result<u64> {
        let size = image.size();
        let buffer = image.read_bytes(0, size)?;
        if buffer.len() != size {
            // No partial-buffer scanning; a short read is a failure.
            return Err(Error::ReadFailed {
                offset: 0,
                len: size,
                message: format!("short read: got {} of {} bytes", buffer.len(), size),
            });
        }

        debug!("Scanning {} bytes for pattern {}", size, self.signature);
        match self.signature.find_in(&buffer) {
            Some(pos) => Ok(pos as u64),
            None => Err(Error::NotFound(format!(
                "no match for pattern {}",
                self.signature
            ))),
        }
    }
}

/// The resolution engine.
///
/// Each call loads the named module in non-executing form, runs one strategy
/// against it, and releases the mapping before returning. No state persists
/// across calls.
pub struct OffsetResolver<L: ImageLoader> {
    loader: L,
}

impl<L: ImageLoader> OffsetResolver<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Resolve an offset in `module` with the given strategy.
    pub fn resolve<S: ResolveStrategy>(&self, module: &str, strategy: &S) -> Result<u64> {
        debug!("Loading module {:?} for inspection", module);
        let image = self.loader.load(module)?;
        let offset = strategy.resolve(&image)?;
        debug!("Resolved offset {:#x} in {:?}", offset, module);
        Ok(offset)
    }

    /// Find the module-relative offset of an exported function.
    pub fn resolve_by_export(&self, module: &str, symbol: &str) -> Result<u64> {
        self.resolve(module, &ExportLookup::new(symbol))
    }

    /// Find the module-relative offset of an unexported function by its
    /// instruction-byte fingerprint.
    ///
    /// `needle` and `mask` must have equal length; the mask uses `x` for
    /// literal bytes and `?` for wildcards. Validation happens before the
    /// module is loaded.
    pub fn resolve_by_signature(&self, module: &str, needle: &[u8], mask: &str) -> Result<u64> {
        let signature = Signature::from_parts(needle, mask)?;
        self.resolve(module, &SignatureScan::new(signature))
    }

    /// Legacy boundary for [`resolve_by_export`](Self::resolve_by_export):
    /// any failure becomes `0`.
    pub fn resolve_by_export_or_zero(&self, module: &str, symbol: &str) -> u64 {
        match self.resolve_by_export(module, symbol) {
            Ok(offset) => offset,
            Err(e) => {
                warn!("Export resolution failed for {:?}: {}", symbol, e);
                0
            }
        }
    }

    /// Legacy boundary for
    /// [`resolve_by_signature`](Self::resolve_by_signature): any failure
    /// becomes `0`.
    pub fn resolve_by_signature_or_zero(&self, module: &str, needle: &[u8], mask: &str) -> u64 {
        match self.resolve_by_signature(module, needle, mask) {
            Ok(offset) => offset,
            Err(e) => {
                warn!("Signature resolution failed in {:?}: {}", module, e);
                0
            }
        }
    }
}

#[cfg(target_os = "windows")]
impl OffsetResolver<crate::image::SystemLoader> {
    /// Resolver backed by the platform loader.
    pub fn system() -> Self {
        Self::new(crate::image::SystemLoader)
    }
}
