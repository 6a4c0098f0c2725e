//! # fnoffset-core
//!
//! Core library for resolving the module-relative offset of a function
//! inside a loaded binary image.
//!
//! This crate provides:
//! - Non-executing module image loading (mapped for inspection only)
//! - Export table lookup
//! - Masked byte-signature scanning ("egg hunting") for unexported code
//! - An offset resolution engine composing both strategies
//! - Named signature sets persisted as JSON
//!
//! Offsets are relative to the module's base address. The typed API returns
//! `Result<u64, Error>` so a match at offset 0 is distinguishable from a
//! failed lookup; the `*_or_zero` methods on [`OffsetResolver`] preserve the
//! legacy convention of collapsing every failure to `0`.

pub mod error;
pub mod image;
pub mod pattern;
pub mod resolver;
pub mod signature;

pub use error::{Error, Result};
pub use image::{ImageLoader, LoadedImage};
#[cfg(target_os = "windows")]
pub use image::{DataImage, SystemLoader};
pub use pattern::Signature;
pub use resolver::{ExportLookup, OffsetResolver, ResolveStrategy, SignatureScan};
pub use signature::{
    EntryStrategy, SignatureEntry, SignatureSet, load_signatures, save_signatures,
};
