//! Profile orchestration
//!
//! `Profile::parse` runs the whole pipeline: header, tag directory, then
//! one factory dispatch per directory entry. Directory entries are
//! transient; only the validated tag map survives. A header or directory
//! failure aborts the parse; a single bad entry is logged and excluded
//! without disturbing the others.

use std::collections::BTreeMap;

use crate::color::{self, Xyz};
use crate::error::{ProfileError, Result};
use crate::header::{ProfileHeader, HEADER_SIZE};
use crate::math::{adaptation_matrix, Matrix3x3};
use crate::tags::{CurveTag, Tag};
use crate::types::{be_u32, TagSignature};

/// Tag directory entry; exists only while parsing
#[derive(Debug, Clone, Copy)]
struct TagTableEntry {
    signature: TagSignature,
    /// Byte offset from the start of the profile
    offset: u32,
    /// Byte size of the tag data
    size: u32,
}

/// A parsed ICC profile
///
/// Constructed once from a byte buffer, immutable thereafter; safe for
/// unsynchronized concurrent reads. Every entry of the tag map passed the
/// signature/type compatibility check at construction time.
#[derive(Debug, Clone)]
pub struct Profile {
    /// The 128-byte header
    pub header: ProfileHeader,
    /// Validated tags, keyed and ordered by tag signature
    tags: BTreeMap<TagSignature, Tag>,
    /// Source filename, when known
    filename: Option<String>,
}

impl Profile {
    /// Parse a profile from bytes
    ///
    /// `filename` is retained for diagnostics and cache keying only; the
    /// parse itself is a pure function of `data`.
    pub fn parse(data: &[u8], filename: Option<&str>) -> Result<Self> {
        let header = ProfileHeader::parse(data)?;

        if header.size as usize != data.len() {
            log::debug!(
                "profile {:?}: header declares {} bytes, buffer holds {}",
                filename.unwrap_or("<memory>"),
                header.size,
                data.len()
            );
        }

        let entries = read_tag_table(data)?;

        let mut tags = BTreeMap::new();
        for entry in entries {
            let end = entry.offset as u64 + entry.size as u64;
            if end > data.len() as u64 {
                let err = ProfileError::TagOutOfBounds {
                    tag: entry.signature,
                    offset: entry.offset,
                    size: entry.size,
                    profile_size: data.len(),
                };
                log::warn!("excluding tag: {err}");
                continue;
            }

            let slice = &data[entry.offset as usize..end as usize];
            if let Some(tag) = Tag::parse(entry.signature, slice) {
                tags.insert(entry.signature, tag);
            }
        }

        Ok(Self {
            header,
            tags,
            filename: filename.map(str::to_owned),
        })
    }

    /// The source filename, when the profile was read from disk
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Look up a tag by signature
    pub fn find(&self, sig: TagSignature) -> Option<&Tag> {
        self.tags.get(&sig)
    }

    /// Whether a tag is present (and passed validation)
    pub fn has_tag(&self, sig: TagSignature) -> bool {
        self.tags.contains_key(&sig)
    }

    /// Present tag signatures, in alphabetical (byte) order
    pub fn tags(&self) -> Vec<TagSignature> {
        self.tags.keys().copied().collect()
    }

    /// Number of validated tags
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// The media white point, or D50 when the tag is absent
    pub fn white_point(&self) -> Xyz {
        self.xyz_tag_or(TagSignature::MEDIA_WHITE_POINT, color::D50.xyz)
    }

    /// The media black point, or (0, 0, 0) when the tag is absent
    pub fn black_point(&self) -> Xyz {
        self.xyz_tag_or(TagSignature::MEDIA_BLACK_POINT, Xyz::default())
    }

    /// The PCS illuminant from the header (always D50 after parsing)
    pub fn illuminant(&self) -> Xyz {
        self.header.illuminant.to_xyz()
    }

    /// The chromatic adaptation matrix
    ///
    /// Returns the 3x3 matrix of the `chad` tag when present. Otherwise,
    /// display-class profiles get a computed adaptation from the PCS
    /// illuminant to the media white point; all other classes get the
    /// identity.
    pub fn chromatic_adaptation(&self) -> Matrix3x3 {
        if let Some(Tag::S15Fixed16Array(values)) = self.find(TagSignature::CHROMATIC_ADAPTATION) {
            if let Some(matrix) = Matrix3x3::from_rows(values) {
                return matrix;
            }
            log::warn!(
                "chromatic adaptation tag holds {} values, expected 9; ignoring",
                values.len()
            );
        }

        if self.header.is_display_class() {
            adaptation_matrix(self.illuminant(), self.white_point())
        } else {
            Matrix3x3::identity()
        }
    }

    /// The profile description text, when present
    pub fn description(&self) -> Option<&str> {
        self.find(TagSignature::PROFILE_DESC).and_then(Tag::as_text)
    }

    /// The copyright text, when present
    pub fn copyright(&self) -> Option<&str> {
        self.find(TagSignature::COPYRIGHT).and_then(Tag::as_text)
    }

    /// Red primary colorant XYZ, when present
    pub fn red_colorant(&self) -> Option<Xyz> {
        self.xyz_tag(TagSignature::RED_COLORANT)
    }

    /// Green primary colorant XYZ, when present
    pub fn green_colorant(&self) -> Option<Xyz> {
        self.xyz_tag(TagSignature::GREEN_COLORANT)
    }

    /// Blue primary colorant XYZ, when present
    pub fn blue_colorant(&self) -> Option<Xyz> {
        self.xyz_tag(TagSignature::BLUE_COLORANT)
    }

    /// Red tone reproduction curve, when present as a `curv` tag
    pub fn red_trc(&self) -> Option<&CurveTag> {
        self.find(TagSignature::RED_TRC).and_then(Tag::as_curve)
    }

    /// Green tone reproduction curve, when present as a `curv` tag
    pub fn green_trc(&self) -> Option<&CurveTag> {
        self.find(TagSignature::GREEN_TRC).and_then(Tag::as_curve)
    }

    /// Blue tone reproduction curve, when present as a `curv` tag
    pub fn blue_trc(&self) -> Option<&CurveTag> {
        self.find(TagSignature::BLUE_TRC).and_then(Tag::as_curve)
    }

    /// Gray tone reproduction curve, when present as a `curv` tag
    pub fn gray_trc(&self) -> Option<&CurveTag> {
        self.find(TagSignature::GRAY_TRC).and_then(Tag::as_curve)
    }

    /// Whether the profile carries the full matrix/TRC tag set
    pub fn is_matrix_shaper(&self) -> bool {
        [
            TagSignature::RED_COLORANT,
            TagSignature::GREEN_COLORANT,
            TagSignature::BLUE_COLORANT,
            TagSignature::RED_TRC,
            TagSignature::GREEN_TRC,
            TagSignature::BLUE_TRC,
        ]
        .iter()
        .all(|&sig| self.has_tag(sig))
    }

    fn xyz_tag(&self, sig: TagSignature) -> Option<Xyz> {
        self.find(sig)
            .and_then(Tag::as_xyz)
            .and_then(|t| t.first())
            .map(|n| n.to_xyz())
    }

    fn xyz_tag_or(&self, sig: TagSignature, default: Xyz) -> Xyz {
        self.xyz_tag(sig).unwrap_or(default)
    }
}

/// Read the tag directory that follows the header
///
/// A directory that extends past the buffer is unrecoverable: nothing
/// after it can be trusted.
fn read_tag_table(data: &[u8]) -> Result<Vec<TagTableEntry>> {
    let table_start = HEADER_SIZE + 4;
    if data.len() < table_start {
        return Err(ProfileError::Truncated {
            expected: table_start,
            actual: data.len(),
        });
    }

    let count = be_u32(data, HEADER_SIZE) as usize;
    let entry_size = 12;
    let required = table_start + count.checked_mul(entry_size).ok_or_else(|| {
        ProfileError::MalformedVariant("tag directory: entry count overflow".into())
    })?;
    if data.len() < required {
        return Err(ProfileError::Truncated {
            expected: required,
            actual: data.len(),
        });
    }

    let mut entries = Vec::with_capacity(count);
    for i in 0..count {
        let base = table_start + i * entry_size;
        entries.push(TagTableEntry {
            signature: TagSignature(be_u32(data, base)),
            offset: be_u32(data, base + 4),
            size: be_u32(data, base + 8),
        });
    }

    Ok(entries)
}
