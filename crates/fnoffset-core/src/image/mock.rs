//! In-memory image loader for tests.

use std::collections::HashMap;

use super::{ImageLoader, LoadedImage};
use crate::error::{Error, Result};

/// Failure mode injected into a [`MockImage`]'s reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadBehavior {
    #[default]
    Normal,
    /// Every read returns one byte fewer than requested.
    Short,
    /// Every read fails outright.
    Fail,
}

#[derive(Debug, Clone, Default)]
pub struct MockImage {
    bytes: Vec<u8>,
    exports: HashMap<String, u64>,
    read_behavior: ReadBehavior,
}

impl MockImage {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            ..Default::default()
        }
    }

    pub fn with_export(mut self, symbol: &str, offset: u64) -> Self {
        self.exports.insert(symbol.to_string(), offset);
        self
    }

    pub fn with_read_behavior(mut self, behavior: ReadBehavior) -> Self {
        self.read_behavior = behavior;
        self
    }
}

impl LoadedImage for MockImage {
    fn size(&self) -> usize {
        self.bytes.len()
    }

    fn export_offset(&self, symbol: &str) -> Result<u64> {
        self.exports
            .get(symbol)
            .copied()
            .ok_or_else(|| Error::NotFound(format!("no export named {symbol:?}")))
    }

    fn read_bytes(&self, offset: u64, len: usize) -> Result<Vec<u8>> {
        if self.read_behavior == ReadBehavior::Fail {
            return Err(Error::ReadFailed {
                offset,
                len,
                message: "injected read failure".to_string(),
            });
        }

        let start = offset as usize;
        let end = start.checked_add(len).filter(|&e| e <= self.bytes.len());
        let Some(end) = end else {
            return Err(Error::ReadFailed {
                offset,
                len,
                message: format!("range exceeds image size {:#x}", self.bytes.len()),
            });
        };

        let mut data = self.bytes[start..end].to_vec();
        if self.read_behavior == ReadBehavior::Short {
            data.pop();
        }
        Ok(data)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockLoader {
    images: HashMap<String, MockImage>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, name: &str, image: MockImage) -> Self {
        self.images.insert(name.to_string(), image);
        self
    }
}

impl ImageLoader for MockLoader {
    type Image = MockImage;

    fn load(&self, name: &str) -> Result<MockImage> {
        self.images
            .get(name)
            .cloned()
            .ok_or_else(|| Error::LoadFailed(format!("no such module: {name:?}")))
    }
}
