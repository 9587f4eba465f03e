//! Profile sequence description tag (`pseq`)
//!
//! Describes the chain of profiles a device-link was built from. Each
//! record embeds two description sub-records (manufacturer and model),
//! themselves complete `desc`- or `mluc`-typed values: the same
//! "type signature + reserved + body" shape as a top-level tag, read here
//! against the surrounding slice with a running cursor.

use crate::error::{ProfileError, Result};
use crate::tags::text::{DescriptionTag, MlucTag};
use crate::types::{be_u32, be_u64, TagSignature, TypeSignature};

/// One profile of the sequence
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSequenceRecord {
    /// Device manufacturer signature
    pub manufacturer: TagSignature,
    /// Device model signature
    pub model: TagSignature,
    /// Device attributes
    pub attributes: u64,
    /// Technology signature (may be zero)
    pub technology: TagSignature,
    /// Manufacturer description from the embedded sub-record
    pub manufacturer_desc: Option<String>,
    /// Model description from the embedded sub-record
    pub model_desc: Option<String>,
}

/// Decoded profileSequenceDescType payload
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSequenceTag {
    /// Records in processing order
    pub records: Vec<ProfileSequenceRecord>,
}

impl ProfileSequenceTag {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(ProfileError::MalformedVariant(
                "profile sequence: missing count".into(),
            ));
        }
        let count = be_u32(data, 0) as usize;

        let mut records = Vec::with_capacity(count);
        let mut cursor = 4usize;

        for i in 0..count {
            if data.len() < cursor + 20 {
                return Err(ProfileError::MalformedVariant(format!(
                    "profile sequence: record {i} header truncated at {cursor}"
                )));
            }

            let manufacturer = TagSignature(be_u32(data, cursor));
            let model = TagSignature(be_u32(data, cursor + 4));
            let attributes = be_u64(data, cursor + 8);
            let technology = TagSignature(be_u32(data, cursor + 16));
            cursor += 20;

            let (manufacturer_desc, consumed) = read_embedded_description(&data[cursor..], i)?;
            cursor += consumed;
            let (model_desc, consumed) = read_embedded_description(&data[cursor..], i)?;
            cursor += consumed;

            records.push(ProfileSequenceRecord {
                manufacturer,
                model,
                attributes,
                technology,
                manufacturer_desc,
                model_desc,
            });
        }

        Ok(Self { records })
    }
}

/// Read one embedded description sub-record at the head of `data`
///
/// Returns the decoded text and the total bytes consumed, including the
/// sub-record's own 8-byte type header.
fn read_embedded_description(data: &[u8], record: usize) -> Result<(Option<String>, usize)> {
    if data.len() < 8 {
        return Err(ProfileError::MalformedVariant(format!(
            "profile sequence: record {record} embedded description header truncated"
        )));
    }

    let type_sig = TypeSignature(be_u32(data, 0));
    let body = &data[8..];

    match type_sig {
        TypeSignature::DESC => {
            let (desc, consumed) = DescriptionTag::parse_embedded(body)?;
            let text = (!desc.ascii.is_empty()).then_some(desc.ascii);
            Ok((text, 8 + consumed))
        }
        TypeSignature::MLUC => {
            let (mluc, consumed) = MlucTag::parse_embedded(body)?;
            Ok((mluc.text().map(str::to_owned), 8 + consumed))
        }
        other => Err(ProfileError::MalformedVariant(format!(
            "profile sequence: record {record} embeds unsupported type '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode a minimal embedded desc sub-record
    fn embedded_desc(text: &str) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"desc");
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(&((text.len() + 1) as u32).to_be_bytes());
        out.extend_from_slice(text.as_bytes());
        out.push(0);
        out.extend_from_slice(&[0u8; 8]); // unicode code + count
        out.extend_from_slice(&[0u8; 70]); // scriptcode trailer
        out
    }

    fn sequence_fixture() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&2u32.to_be_bytes());
        for (mfr, model, text) in [(b"EPSO", b"1234", "Printer"), (b"ACME", b"5678", "Scanner")] {
            data.extend_from_slice(mfr);
            data.extend_from_slice(model);
            data.extend_from_slice(&0u64.to_be_bytes());
            data.extend_from_slice(b"CRT ");
            data.extend_from_slice(&embedded_desc(text));
            data.extend_from_slice(&embedded_desc(""));
        }
        data
    }

    #[test]
    fn test_two_records_with_nested_descriptions() {
        let tag = ProfileSequenceTag::parse(&sequence_fixture()).unwrap();
        assert_eq!(tag.records.len(), 2);

        let first = &tag.records[0];
        assert_eq!(first.manufacturer, TagSignature::from_bytes(*b"EPSO"));
        assert_eq!(first.technology, TagSignature::from_bytes(*b"CRT "));
        assert_eq!(first.manufacturer_desc.as_deref(), Some("Printer"));
        assert_eq!(first.model_desc, None);

        assert_eq!(tag.records[1].manufacturer_desc.as_deref(), Some("Scanner"));
    }

    #[test]
    fn test_truncated_nested_record_fails() {
        let mut data = sequence_fixture();
        data.truncate(data.len() - 40);
        assert!(ProfileSequenceTag::parse(&data).is_err());
    }

    #[test]
    fn test_unsupported_embedded_type_fails() {
        let mut data = Vec::new();
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(b"EPSO");
        data.extend_from_slice(b"1234");
        data.extend_from_slice(&0u64.to_be_bytes());
        data.extend_from_slice(b"CRT ");
        data.extend_from_slice(b"text");
        data.extend_from_slice(&[0u8; 12]);
        assert!(ProfileSequenceTag::parse(&data).is_err());
    }
}
