//! Colorant and named-color tags
//!
//! `chrm` (device chromaticities), `clro` (colorant ordering), `clrt`
//! (colorant names with PCS coordinates), and `ncl2` (named color lists
//! with PCS and optional device coordinates). Name fields are fixed
//! 32-byte null-terminated ASCII.

use crate::error::{ProfileError, Result};
use crate::types::{be_u16, be_u32, U16Fixed16};

/// Fixed width of embedded name fields
const NAME_FIELD: usize = 32;

/// The phosphor/colorant system of a chromaticityType tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorantSystem {
    Unknown,
    ItuR709,
    SmpteRp145,
    EbuTech3213,
    P22,
    /// Encoded value outside the ICC.1 table
    Other(u16),
}

impl ColorantSystem {
    fn from_u16(val: u16) -> Self {
        match val {
            0 => Self::Unknown,
            1 => Self::ItuR709,
            2 => Self::SmpteRp145,
            3 => Self::EbuTech3213,
            4 => Self::P22,
            other => Self::Other(other),
        }
    }
}

/// Decoded chromaticityType payload
#[derive(Debug, Clone, PartialEq)]
pub struct ChromaticityTag {
    /// The colorant system the coordinates belong to
    pub colorant_system: ColorantSystem,
    /// Per-channel CIE (x, y) chromaticity coordinates
    pub coordinates: Vec<(f64, f64)>,
}

impl ChromaticityTag {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(ProfileError::MalformedVariant(
                "chromaticity: missing channel count".into(),
            ));
        }
        let channels = be_u16(data, 0) as usize;
        let colorant_system = ColorantSystem::from_u16(be_u16(data, 2));

        let required = 4 + channels * 8;
        if data.len() < required {
            return Err(ProfileError::MalformedVariant(format!(
                "chromaticity: {channels} channels need {required} bytes, have {}",
                data.len()
            )));
        }

        let mut coordinates = Vec::with_capacity(channels);
        for i in 0..channels {
            let base = 4 + i * 8;
            let x = U16Fixed16::from_slice(&data[base..])?.to_f64();
            let y = U16Fixed16::from_slice(&data[base + 4..])?.to_f64();
            coordinates.push((x, y));
        }

        Ok(Self {
            colorant_system,
            coordinates,
        })
    }
}

/// Decoded colorantOrderType payload
#[derive(Debug, Clone, PartialEq)]
pub struct ColorantOrderTag {
    /// Colorant indices in laydown order
    pub order: Vec<u8>,
}

impl ColorantOrderTag {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(ProfileError::MalformedVariant(
                "colorant order: missing count".into(),
            ));
        }
        let count = be_u32(data, 0) as usize;
        if data.len() < 4 + count {
            return Err(ProfileError::MalformedVariant(format!(
                "colorant order: {count} entries exceed {} remaining bytes",
                data.len() - 4
            )));
        }
        Ok(Self {
            order: data[4..4 + count].to_vec(),
        })
    }
}

/// One colorant of a colorantTableType tag
#[derive(Debug, Clone, PartialEq)]
pub struct ColorantEntry {
    /// Colorant name
    pub name: String,
    /// PCS coordinate as three encoded uInt16 values
    pub pcs: [u16; 3],
}

/// Decoded colorantTableType payload
#[derive(Debug, Clone, PartialEq)]
pub struct ColorantTableTag {
    /// Colorants in wire order
    pub colorants: Vec<ColorantEntry>,
}

impl ColorantTableTag {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(ProfileError::MalformedVariant(
                "colorant table: missing count".into(),
            ));
        }
        let count = be_u32(data, 0) as usize;
        let entry_size = NAME_FIELD + 6;
        let required = 4 + count * entry_size;
        if data.len() < required {
            return Err(ProfileError::MalformedVariant(format!(
                "colorant table: {count} entries need {required} bytes, have {}",
                data.len()
            )));
        }

        let mut colorants = Vec::with_capacity(count);
        for i in 0..count {
            let base = 4 + i * entry_size;
            let name = fixed_name(&data[base..base + NAME_FIELD]);
            let pcs = [
                be_u16(data, base + NAME_FIELD),
                be_u16(data, base + NAME_FIELD + 2),
                be_u16(data, base + NAME_FIELD + 4),
            ];
            colorants.push(ColorantEntry { name, pcs });
        }

        Ok(Self { colorants })
    }
}

/// One color of a namedColor2Type tag
#[derive(Debug, Clone, PartialEq)]
pub struct NamedColorEntry {
    /// Root color name (without prefix/suffix)
    pub name: String,
    /// PCS coordinate as three encoded uInt16 values
    pub pcs: [u16; 3],
    /// Optional device coordinates
    pub device: Vec<u16>,
}

/// Decoded namedColor2Type payload
#[derive(Debug, Clone, PartialEq)]
pub struct NamedColor2Tag {
    /// Vendor-specific flags
    pub vendor_flags: u32,
    /// Prefix prepended to every color name
    pub prefix: String,
    /// Suffix appended to every color name
    pub suffix: String,
    /// Colors in wire order
    pub colors: Vec<NamedColorEntry>,
}

impl NamedColor2Tag {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8]) -> Result<Self> {
        let fixed_header = 12 + 2 * NAME_FIELD;
        if data.len() < fixed_header {
            return Err(ProfileError::MalformedVariant(format!(
                "named color: header needs {fixed_header} bytes, have {}",
                data.len()
            )));
        }

        let vendor_flags = be_u32(data, 0);
        let count = be_u32(data, 4) as usize;
        let device_coords = be_u32(data, 8) as usize;
        let prefix = fixed_name(&data[12..12 + NAME_FIELD]);
        let suffix = fixed_name(&data[12 + NAME_FIELD..12 + 2 * NAME_FIELD]);

        let entry_size = NAME_FIELD + 6 + device_coords * 2;
        let required = fixed_header
            + count.checked_mul(entry_size).ok_or_else(|| {
                ProfileError::MalformedVariant("named color: entry size overflow".into())
            })?;
        if data.len() < required {
            return Err(ProfileError::MalformedVariant(format!(
                "named color: {count} entries need {required} bytes, have {}",
                data.len()
            )));
        }

        let mut colors = Vec::with_capacity(count);
        for i in 0..count {
            let base = fixed_header + i * entry_size;
            let name = fixed_name(&data[base..base + NAME_FIELD]);
            let pcs = [
                be_u16(data, base + NAME_FIELD),
                be_u16(data, base + NAME_FIELD + 2),
                be_u16(data, base + NAME_FIELD + 4),
            ];
            let mut device = Vec::with_capacity(device_coords);
            for j in 0..device_coords {
                device.push(be_u16(data, base + NAME_FIELD + 6 + j * 2));
            }
            colors.push(NamedColorEntry { name, pcs, device });
        }

        Ok(Self {
            vendor_flags,
            prefix,
            suffix,
            colors,
        })
    }

    /// Number of device coordinates per color
    pub fn device_coord_count(&self) -> usize {
        self.colors.first().map_or(0, |c| c.device.len())
    }
}

/// Decode a fixed 32-byte null-terminated ASCII name field
fn fixed_name(data: &[u8]) -> String {
    data.iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect()
}
