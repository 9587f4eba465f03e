//! XYZType tag
//!
//! An array of XYZNumber values. Colorant, white-point, and black-point
//! tags hold exactly one; luminance-style tags may hold several.

use crate::error::{ProfileError, Result};
use crate::types::XyzNumber;

/// Decoded XYZType payload
#[derive(Debug, Clone, PartialEq)]
pub struct XyzTag {
    /// XYZ triples, in wire order
    pub values: Vec<XyzNumber>,
}

impl XyzTag {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < XyzNumber::WIDTH {
            return Err(ProfileError::MalformedVariant(format!(
                "XYZ tag: {} bytes cannot hold a triple",
                data.len()
            )));
        }

        let count = data.len() / XyzNumber::WIDTH;
        let mut values = Vec::with_capacity(count);
        for chunk in data.chunks_exact(XyzNumber::WIDTH).take(count) {
            values.push(XyzNumber::from_slice(chunk)?);
        }

        Ok(Self { values })
    }

    /// First triple; the whole payload for single-value tags
    pub fn first(&self) -> Option<&XyzNumber> {
        self.values.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_triple() {
        let data: [u8; 12] = [
            0x00, 0x00, 0xF6, 0xD6, // X ≈ 0.9642
            0x00, 0x01, 0x00, 0x00, // Y = 1.0
            0x00, 0x00, 0xD3, 0x2D, // Z ≈ 0.8249
        ];
        let tag = XyzTag::parse(&data).unwrap();
        assert_eq!(tag.values.len(), 1);
        let xyz = tag.first().unwrap().to_xyz();
        assert!((xyz.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_multiple_triples_ignore_trailing() {
        // Two triples plus 4 stray padding bytes
        let mut data = vec![0u8; 24];
        data[4..8].copy_from_slice(&0x00010000u32.to_be_bytes());
        data.extend_from_slice(&[0u8; 4]);
        let tag = XyzTag::parse(&data).unwrap();
        assert_eq!(tag.values.len(), 2);
    }

    #[test]
    fn test_too_small() {
        assert!(XyzTag::parse(&[0u8; 4]).is_err());
    }
}
