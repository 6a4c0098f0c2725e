//! Scan command implementation.

use anyhow::Result;
use fnoffset_core::{Signature, SignatureScan};

use super::{report, resolve_offset};
use super::hex::parse_hex_bytes;

/// Run the scan command.
///
/// With `--mask`, the pattern arguments are joined into one contiguous hex
/// needle and paired with the mask; otherwise they form a space-separated
/// pattern like `48 8B ?? ?? C3`.
pub fn run(module: &str, pattern: &[String], mask: Option<&str>) -> Result<()> {
    let signature = match mask {
        Some(mask) => {
            let needle = parse_hex_bytes(&pattern.join(""))?;
            Signature::from_parts(&needle, mask)?
        }
        None => Signature::parse(&pattern.join(" "))?,
    };

    println!("Scanning {} for pattern {}", module, signature);
    let strategy = SignatureScan::new(signature);
    report(module, resolve_offset(module, &strategy))
}
