//! Homogeneous array tags and small scalar records
//!
//! Covers the fixed-point and integer array types (`sf32`, `uf32`,
//! `ui08`..`ui64`), plus `sig `, `data`, and `dtim`. Array lengths are
//! derived from the remaining slice length, never from a declared count.

use crate::error::{ProfileError, Result};
use crate::types::{be_u16, be_u32, be_u64, DateTimeNumber, S15Fixed16, TagSignature, U16Fixed16};

/// Parse an s15Fixed16ArrayType payload into floats
pub fn parse_s15_fixed16_array(data: &[u8]) -> Result<Vec<f64>> {
    Ok(data
        .chunks_exact(S15Fixed16::WIDTH)
        .map(|c| S15Fixed16::from_be_bytes([c[0], c[1], c[2], c[3]]).to_f64())
        .collect())
}

/// Parse a u16Fixed16ArrayType payload into floats
pub fn parse_u16_fixed16_array(data: &[u8]) -> Result<Vec<f64>> {
    Ok(data
        .chunks_exact(U16Fixed16::WIDTH)
        .map(|c| U16Fixed16::from_be_bytes([c[0], c[1], c[2], c[3]]).to_f64())
        .collect())
}

/// Parse a uInt16ArrayType payload
pub fn parse_u16_array(data: &[u8]) -> Result<Vec<u16>> {
    Ok(data.chunks_exact(2).map(|c| be_u16(c, 0)).collect())
}

/// Parse a uInt32ArrayType payload
pub fn parse_u32_array(data: &[u8]) -> Result<Vec<u32>> {
    Ok(data.chunks_exact(4).map(|c| be_u32(c, 0)).collect())
}

/// Parse a uInt64ArrayType payload
pub fn parse_u64_array(data: &[u8]) -> Result<Vec<u64>> {
    Ok(data.chunks_exact(8).map(|c| be_u64(c, 0)).collect())
}

/// Parse a signatureType payload
pub fn parse_signature(data: &[u8]) -> Result<TagSignature> {
    if data.len() < 4 {
        return Err(ProfileError::MalformedVariant(
            "signature tag: fewer than 4 bytes".into(),
        ));
    }
    Ok(TagSignature(be_u32(data, 0)))
}

/// Parse a dateTimeType payload
pub fn parse_date_time(data: &[u8]) -> Result<DateTimeNumber> {
    DateTimeNumber::from_slice(data)
        .map_err(|_| ProfileError::MalformedVariant("dateTime tag: fewer than 12 bytes".into()))
}

/// Payload interpretation of a dataType tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    /// Flag 0: ASCII data
    Ascii,
    /// Flag 1: binary data
    Binary,
    /// Any other flag value
    Other(u32),
}

/// Decoded dataType payload
#[derive(Debug, Clone, PartialEq)]
pub struct DataTag {
    /// How the payload is meant to be interpreted
    pub kind: DataKind,
    /// The raw payload bytes
    pub bytes: Vec<u8>,
}

impl DataTag {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(ProfileError::MalformedVariant(
                "data tag: missing type flag".into(),
            ));
        }
        let kind = match be_u32(data, 0) {
            0 => DataKind::Ascii,
            1 => DataKind::Binary,
            other => DataKind::Other(other),
        };
        Ok(Self {
            kind,
            bytes: data[4..].to_vec(),
        })
    }

    /// The payload as text, when the flag says ASCII
    pub fn as_ascii(&self) -> Option<String> {
        if self.kind != DataKind::Ascii {
            return None;
        }
        Some(
            self.bytes
                .iter()
                .take_while(|&&b| b != 0)
                .map(|&b| b as char)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s15_array() {
        let mut data = Vec::new();
        data.extend_from_slice(&0x00010000u32.to_be_bytes()); // 1.0
        data.extend_from_slice(&0xFFFF0000u32.to_be_bytes()); // -1.0
        data.extend_from_slice(&0x00008000u32.to_be_bytes()); // 0.5
        let vals = parse_s15_fixed16_array(&data).unwrap();
        assert_eq!(vals.len(), 3);
        assert!((vals[0] - 1.0).abs() < 1e-9);
        assert!((vals[1] + 1.0).abs() < 1e-9);
        assert!((vals[2] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_integer_arrays() {
        assert_eq!(parse_u16_array(&[0x12, 0x34, 0x56, 0x78]).unwrap(), vec![0x1234, 0x5678]);
        assert_eq!(parse_u32_array(&[0, 0, 0, 7]).unwrap(), vec![7]);
        assert_eq!(
            parse_u64_array(&[0, 0, 0, 0, 0, 0, 0, 9]).unwrap(),
            vec![9]
        );
        // Trailing partial element is dropped, not read past
        assert_eq!(parse_u32_array(&[0, 0, 0, 7, 0xFF]).unwrap(), vec![7]);
    }

    #[test]
    fn test_signature_payload() {
        let sig = parse_signature(b"CRT junk").unwrap();
        assert_eq!(sig, TagSignature::from_bytes(*b"CRT "));
        assert!(parse_signature(b"ab").is_err());
    }

    #[test]
    fn test_data_tag() {
        let mut data = vec![0, 0, 0, 0];
        data.extend_from_slice(b"hello\0");
        let tag = DataTag::parse(&data).unwrap();
        assert_eq!(tag.kind, DataKind::Ascii);
        assert_eq!(tag.as_ascii().unwrap(), "hello");

        let bin = DataTag::parse(&[0, 0, 0, 1, 0xDE, 0xAD]).unwrap();
        assert_eq!(bin.kind, DataKind::Binary);
        assert_eq!(bin.bytes, vec![0xDE, 0xAD]);
        assert!(bin.as_ascii().is_none());
    }

    #[test]
    fn test_date_time_payload() {
        let mut data = vec![0u8; 12];
        data[0..2].copy_from_slice(&2024u16.to_be_bytes());
        data[2..4].copy_from_slice(&2u16.to_be_bytes());
        data[4..6].copy_from_slice(&29u16.to_be_bytes());
        let dt = parse_date_time(&data).unwrap();
        assert_eq!((dt.year, dt.month, dt.day), (2024, 2, 29));
        assert!(parse_date_time(&data[..8]).is_err());
    }
}
