//! Hex needle parsing utilities.

use anyhow::Result;

/// Parse a contiguous hex byte string (with or without 0x prefix).
///
/// # Examples
///
/// ```
/// use fnoffset::commands::hex::parse_hex_bytes;
///
/// assert_eq!(parse_hex_bytes("8B42B7").unwrap(), vec![0x8B, 0x42, 0xB7]);
/// ```
pub fn parse_hex_bytes(s: &str) -> Result<Vec<u8>> {
    let s = s.trim_start_matches("0x").trim_start_matches("0X");
    if s.len() % 2 != 0 {
        anyhow::bail!("hex needle has odd length: {}", s.len());
    }

    (0..s.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&s[i..i + 2], 16)
                .map_err(|e| anyhow::anyhow!("invalid hex byte '{}': {}", &s[i..i + 2], e))
        })
        .collect()
}
