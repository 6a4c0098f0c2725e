//! Module image abstraction: non-executing loading and in-image reads.

#[cfg(target_os = "windows")]
mod windows;

#[cfg(test)]
pub mod mock;

#[cfg(target_os = "windows")]
pub use windows::{DataImage, SystemLoader};

use crate::error::Result;

/// A module image mapped into the current process for inspection only.
///
/// The mapping is released when the value is dropped, so an image never
/// outlives the resolution call that loaded it. Offsets are relative to the
/// start of the mapping.
pub trait LoadedImage {
    /// Mapped size of the image in bytes.
    fn size(&self) -> usize;

    /// Look up a symbol in the image's export table and return its
    /// module-relative offset, or [`Error::NotFound`] if the export is
    /// absent.
    ///
    /// [`Error::NotFound`]: crate::Error::NotFound
    fn export_offset(&self, symbol: &str) -> Result<u64>;

    /// Copy `len` bytes starting at `offset` into an owned buffer.
    ///
    /// A read that cannot deliver exactly `len` bytes is a failure; callers
    /// never see a partially filled buffer.
    fn read_bytes(&self, offset: u64, len: usize) -> Result<Vec<u8>>;
}

/// Capability to map a named module without running its initializers.
///
/// Loading through this trait must never execute the module's entry point,
/// TLS callbacks, or static constructors. The mapping exists purely to read
/// the image's structure and bytes.
pub trait ImageLoader {
    type Image: LoadedImage;

    fn load(&self, name: &str) -> Result<Self::Image>;
}
