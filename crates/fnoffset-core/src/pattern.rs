//! Masked byte signatures and the first-match scanner.

use std::fmt;

use crate::error::{Error, Result};

/// A byte pattern with wildcard positions.
///
/// Each element is either a literal byte that must match or a wildcard that
/// matches anything. Signatures are built either from a needle/mask pair
/// (`b"\x8B\x42\x00\x00\x00\xB7\xC9"` with mask `"xx???xx"`) or from the
/// space-separated hex form (`"8B 42 ?? ?? ?? B7 C9"`).
///
/// # Examples
///
/// ```
/// use fnoffset_core::Signature;
///
/// let sig = Signature::parse("22 ?? 44").unwrap();
/// assert_eq!(sig.find_in(&[0x11, 0x22, 0x33, 0x44, 0x55]), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    bytes: Vec<Option<u8>>,
}

impl Signature {
    /// Build a signature from a needle and an equal-length mask string.
    ///
    /// Mask characters: `x` requires a literal match, `?` is a wildcard.
    /// A length mismatch or any other mask character is an
    /// [`Error::InvalidPattern`].
    pub fn from_parts(needle: &[u8], mask: &str) -> Result<Self> {
        if needle.is_empty() {
            return Err(Error::InvalidPattern("pattern is empty".to_string()));
        }
        if needle.len() != mask.len() {
            return Err(Error::InvalidPattern(format!(
                "needle is {} bytes but mask is {} characters",
                needle.len(),
                mask.len()
            )));
        }

        let mut bytes = Vec::with_capacity(needle.len());
        for (&value, marker) in needle.iter().zip(mask.chars()) {
            match marker {
                'x' => bytes.push(Some(value)),
                '?' => bytes.push(None),
                other => {
                    return Err(Error::InvalidPattern(format!(
                        "invalid mask character '{}' (expected 'x' or '?')",
                        other
                    )));
                }
            }
        }

        Ok(Self { bytes })
    }

    /// Parse a space-separated hex pattern, e.g. `"48 8D 0D ?? ?? ?? ??"`.
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut bytes = Vec::new();
        for token in pattern.split_whitespace() {
            if token == "??" || token == "?" {
                bytes.push(None);
                continue;
            }

            let value = u8::from_str_radix(token, 16).map_err(|e| {
                Error::InvalidPattern(format!("invalid pattern token '{}': {}", token, e))
            })?;
            bytes.push(Some(value));
        }

        if bytes.is_empty() {
            return Err(Error::InvalidPattern("pattern is empty".to_string()));
        }

        Ok(Self { bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Find the first (lowest-offset) match of this signature in `haystack`.
    ///
    /// Returns `None` when the pattern is longer than the haystack or no
    /// candidate position matches. When the signature starts with a literal
    /// byte, candidate positions are narrowed with `memchr`; match order is
    /// unchanged because candidates are visited in ascending order.
    pub fn find_in(&self, haystack: &[u8]) -> Option<usize> {
        if haystack.len() < self.bytes.len() {
            return None;
        }

        let last = haystack.len() - self.bytes.len();
        match self.bytes[0] {
            Some(first) => memchr::memchr_iter(first, &haystack[..=last])
                .find(|&i| self.matches_at(&haystack[i..i + self.bytes.len()])),
            None => (0..=last).find(|&i| self.matches_at(&haystack[i..i + self.bytes.len()])),
        }
    }

    /// Compare one candidate window, bailing on the first literal mismatch.
    fn matches_at(&self, window: &[u8]) -> bool {
        for (j, byte) in self.bytes.iter().enumerate() {
            if let Some(value) = byte
                && window[j] != *value
            {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self
            .bytes
            .iter()
            .map(|b| match b {
                Some(value) => format!("{:02X}", value),
                None => "??".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ");
        f.write_str(&formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_builds_pairs() {
        let sig = Signature::from_parts(&[0x8B, 0x42, 0x00, 0xB7], "xx?x").unwrap();
        assert_eq!(sig.len(), 4);
        assert_eq!(sig.to_string(), "8B 42 ?? B7");
    }

    #[test]
    fn test_from_parts_length_mismatch() {
        let err = Signature::from_parts(&[0x8B, 0x42], "xxx").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }

    #[test]
    fn test_from_parts_rejects_empty() {
        let err = Signature::from_parts(&[], "").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }

    #[test]
    fn test_from_parts_rejects_unknown_mask_character() {
        let err = Signature::from_parts(&[0x8B, 0x42], "xy").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }

    #[test]
    fn test_parse_with_wildcards() {
        let sig = Signature::parse("48 8D 0D ?? ?? ?? ??").unwrap();
        assert_eq!(sig.len(), 7);
        assert_eq!(sig.to_string(), "48 8D 0D ?? ?? ?? ??");
    }

    #[test]
    fn test_parse_rejects_bad_token() {
        let err = Signature::parse("48 GG").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }

    #[test]
    fn test_parse_rejects_empty() {
        let err = Signature::parse("   ").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }

    #[test]
    fn test_find_masked_match() {
        // haystack 11 22 33 44 55, needle 22 ?? 44 -> offset 1
        let sig = Signature::from_parts(&[0x22, 0x00, 0x44], "x?x").unwrap();
        assert_eq!(sig.find_in(&[0x11, 0x22, 0x33, 0x44, 0x55]), Some(1));
    }

    #[test]
    fn test_find_first_match_wins() {
        let haystack = [0xCC, 0xAA, 0xBB, 0x00, 0xAA, 0xBB, 0x01];
        let sig = Signature::from_parts(&[0xAA, 0xBB, 0x00], "xx?").unwrap();
        assert_eq!(sig.find_in(&haystack), Some(1));
    }

    #[test]
    fn test_find_match_at_offset_zero() {
        let sig = Signature::parse("11 22").unwrap();
        assert_eq!(sig.find_in(&[0x11, 0x22, 0x33]), Some(0));
    }

    #[test]
    fn test_find_pattern_longer_than_haystack() {
        let sig = Signature::from_parts(&[0x11, 0x22, 0x33], "xxx").unwrap();
        assert_eq!(sig.find_in(&[0x11, 0x22]), None);
    }

    #[test]
    fn test_find_all_wildcard_matches_at_start() {
        let sig = Signature::from_parts(&[0x00, 0x00, 0x00], "???").unwrap();
        assert_eq!(sig.find_in(&[0xDE, 0xAD, 0xBE, 0xEF]), Some(0));
    }

    #[test]
    fn test_find_no_match() {
        let sig = Signature::parse("FE ED").unwrap();
        assert_eq!(sig.find_in(&[0x11, 0x22, 0x33, 0x44]), None);
    }

    #[test]
    fn test_find_rejects_false_memchr_candidates() {
        // First byte occurs twice, but only the second occurrence is a
        // full match.
        let haystack = [0xAA, 0x01, 0xAA, 0x02, 0x03];
        let sig = Signature::parse("AA 02").unwrap();
        assert_eq!(sig.find_in(&haystack), Some(2));
    }

    #[test]
    fn test_find_wildcard_leading_byte() {
        let haystack = [0x10, 0x20, 0x30, 0x40];
        let sig = Signature::from_parts(&[0x00, 0x30], "?x").unwrap();
        assert_eq!(sig.find_in(&haystack), Some(1));
    }
}
