//! Text-bearing tags
//!
//! Three encodings: `text` (null-terminated ASCII), `desc` (the legacy
//! non-localized profile description record), and `mluc` (multi-localized
//! Unicode with per-locale records).
//!
//! `desc` and `mluc` also appear embedded inside profile-sequence records;
//! the `parse_embedded` constructors additionally report how many bytes
//! the sub-record occupies so a surrounding cursor can advance past it.

use crate::error::{ProfileError, Result};
use crate::types::be_u32;

/// Decoded textType payload
#[derive(Debug, Clone, PartialEq)]
pub struct TextTag {
    /// Text up to the first null byte
    pub text: String,
}

impl TextTag {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8]) -> Result<Self> {
        Ok(Self {
            text: ascii_until_nul(data),
        })
    }
}

/// Decoded textDescriptionType payload (legacy, non-localized)
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionTag {
    /// The ASCII description
    pub ascii: String,
}

impl DescriptionTag {
    /// Parse from the bytes following the type header
    ///
    /// Only the ASCII portion is interpreted; the Unicode and ScriptCode
    /// trailers are frequently absent or broken in real profiles and are
    /// tolerated here.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(ProfileError::MalformedVariant(
                "description: missing ASCII count".into(),
            ));
        }
        let ascii_count = be_u32(data, 0) as usize;
        if data.len() < 4 + ascii_count {
            return Err(ProfileError::MalformedVariant(format!(
                "description: ASCII count {ascii_count} exceeds {} remaining bytes",
                data.len() - 4
            )));
        }
        Ok(Self {
            ascii: ascii_until_nul(&data[4..4 + ascii_count]),
        })
    }

    /// Strict parse that also returns the record's full encoded length
    ///
    /// The legacy layout after the ASCII block is: Unicode language code
    /// (4), Unicode count (4), UTF-16 data, ScriptCode code (2), Macintosh
    /// count (1), 67 bytes of Macintosh description. Embedded records
    /// must carry the whole layout for the cursor to advance correctly.
    pub fn parse_embedded(data: &[u8]) -> Result<(Self, usize)> {
        let desc = Self::parse(data)?;
        let ascii_count = be_u32(data, 0) as usize;

        let unicode_header = 4 + ascii_count;
        if data.len() < unicode_header + 8 {
            return Err(ProfileError::MalformedVariant(
                "embedded description: Unicode header truncated".into(),
            ));
        }
        let unicode_count = be_u32(data, unicode_header + 4) as usize;

        let script_header = unicode_header + 8 + unicode_count * 2;
        let total = script_header + 2 + 1 + 67;
        if data.len() < total {
            return Err(ProfileError::MalformedVariant(format!(
                "embedded description: {total} bytes declared, {} available",
                data.len()
            )));
        }

        Ok((desc, total))
    }
}

/// One localized string of a multiLocalizedUnicodeType tag
#[derive(Debug, Clone, PartialEq)]
pub struct MlucRecord {
    /// ISO 639-1 language code
    pub language: String,
    /// ISO 3166-1 country code
    pub country: String,
    /// The decoded UTF-16BE text
    pub text: String,
}

/// Decoded multiLocalizedUnicodeType payload
#[derive(Debug, Clone, PartialEq)]
pub struct MlucTag {
    /// Per-locale records, in wire order
    pub records: Vec<MlucRecord>,
}

impl MlucTag {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8]) -> Result<Self> {
        Ok(Self::parse_inner(data)?.0)
    }

    /// Parse and return the record's full encoded length (for embedding)
    pub fn parse_embedded(data: &[u8]) -> Result<(Self, usize)> {
        Self::parse_inner(data)
    }

    fn parse_inner(data: &[u8]) -> Result<(Self, usize)> {
        if data.len() < 8 {
            return Err(ProfileError::MalformedVariant(
                "mluc: missing record header".into(),
            ));
        }

        let count = be_u32(data, 0) as usize;
        let record_size = be_u32(data, 4) as usize;
        if record_size < 12 {
            return Err(ProfileError::MalformedVariant(format!(
                "mluc: record size {record_size} below minimum 12"
            )));
        }

        let table_end = 8usize
            .checked_add(count.checked_mul(record_size).ok_or_else(|| {
                ProfileError::MalformedVariant("mluc: record table size overflow".into())
            })?)
            .ok_or_else(|| ProfileError::MalformedVariant("mluc: record table size overflow".into()))?;
        if data.len() < table_end {
            return Err(ProfileError::MalformedVariant(format!(
                "mluc: {count} records of {record_size} bytes exceed {} available",
                data.len()
            )));
        }

        let mut records = Vec::with_capacity(count);
        let mut end = table_end;

        for i in 0..count {
            let rec = &data[8 + i * record_size..];
            let language = ascii_pair(rec[0], rec[1]);
            let country = ascii_pair(rec[2], rec[3]);
            let str_len = be_u32(rec, 4) as usize;
            // String offsets count from the start of the tag, 8 bytes
            // before this slice.
            let str_offset = (be_u32(rec, 8) as usize).checked_sub(8).ok_or_else(|| {
                ProfileError::MalformedVariant("mluc: string offset inside type header".into())
            })?;

            let str_end = str_offset.checked_add(str_len).ok_or_else(|| {
                ProfileError::MalformedVariant("mluc: string extent overflow".into())
            })?;
            if str_end > data.len() {
                return Err(ProfileError::MalformedVariant(format!(
                    "mluc: string {i} extends to {str_end}, only {} bytes present",
                    data.len()
                )));
            }

            let text = decode_utf16be(&data[str_offset..str_end]).ok_or_else(|| {
                ProfileError::MalformedVariant(format!("mluc: string {i} is not valid UTF-16BE"))
            })?;
            end = end.max(str_end);

            records.push(MlucRecord {
                language,
                country,
                text,
            });
        }

        Ok((Self { records }, end))
    }

    /// The preferred display text: an English record if present, else the
    /// first record
    pub fn text(&self) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.language == "en")
            .or_else(|| self.records.first())
            .map(|r| r.text.as_str())
    }

    /// Find the text for a specific language code
    pub fn for_language(&self, language: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.language == language)
            .map(|r| r.text.as_str())
    }
}

/// Collect ASCII characters up to the first null byte
fn ascii_until_nul(data: &[u8]) -> String {
    data.iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect()
}

fn ascii_pair(a: u8, b: u8) -> String {
    format!("{}{}", a as char, b as char)
}

/// Decode UTF-16BE bytes, stopping at a null terminator if present
fn decode_utf16be(data: &[u8]) -> Option<String> {
    if data.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .take_while(|&c| c != 0)
        .collect();
    String::from_utf16(&units).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_tag() {
        let tag = TextTag::parse(b"Hello, World!\0junk").unwrap();
        assert_eq!(tag.text, "Hello, World!");
    }

    #[test]
    fn test_description_ascii() {
        let mut data = vec![0, 0, 0, 5];
        data.extend_from_slice(b"sRGB\0");
        let tag = DescriptionTag::parse(&data).unwrap();
        assert_eq!(tag.ascii, "sRGB");
    }

    #[test]
    fn test_description_count_overrun() {
        let data = [0, 0, 1, 0, b'x'];
        assert!(DescriptionTag::parse(&data).is_err());
    }

    #[test]
    fn test_description_embedded_length() {
        let mut data = vec![0, 0, 0, 5];
        data.extend_from_slice(b"sRGB\0");
        data.extend_from_slice(&[0u8; 8]); // unicode code + count = 0
        data.extend_from_slice(&[0u8; 2 + 1 + 67]); // scriptcode trailer
        let (desc, consumed) = DescriptionTag::parse_embedded(&data).unwrap();
        assert_eq!(desc.ascii, "sRGB");
        assert_eq!(consumed, data.len());
    }

    fn mluc_fixture() -> Vec<u8> {
        let mut data = vec![
            0, 0, 0, 1, // record count
            0, 0, 0, 12, // record size
        ];
        data.extend_from_slice(b"enUS");
        data.extend_from_slice(&8u32.to_be_bytes()); // length
        data.extend_from_slice(&28u32.to_be_bytes()); // offset from tag start
        data.extend_from_slice(&[0x00, b'T', 0x00, b'e', 0x00, b's', 0x00, b't']);
        data
    }

    #[test]
    fn test_mluc_records() {
        let tag = MlucTag::parse(&mluc_fixture()).unwrap();
        assert_eq!(tag.records.len(), 1);
        assert_eq!(tag.records[0].language, "en");
        assert_eq!(tag.records[0].country, "US");
        assert_eq!(tag.text(), Some("Test"));
        assert_eq!(tag.for_language("de"), None);
    }

    #[test]
    fn test_mluc_embedded_length() {
        let data = mluc_fixture();
        let (_, consumed) = MlucTag::parse_embedded(&data).unwrap();
        assert_eq!(consumed, data.len());
    }

    #[test]
    fn test_mluc_string_overrun() {
        let mut data = mluc_fixture();
        data.truncate(data.len() - 2);
        assert!(MlucTag::parse(&data).is_err());
    }

    #[test]
    fn test_decode_utf16be() {
        let data = [0x00, 0x48, 0x00, 0x69, 0x00, 0x00, 0x00, 0x21];
        assert_eq!(decode_utf16be(&data).unwrap(), "Hi");
        assert!(decode_utf16be(&[0x00]).is_none());
    }
}
