//! Measurement and viewing-condition tags
//!
//! `meas` records how a profile's colorimetry was measured; `view` records
//! the assumed viewing environment. Enum fields outside the ICC.1 tables
//! are preserved as raw values rather than rejected.

use crate::color::Xyz;
use crate::error::{ProfileError, Result};
use crate::types::{be_u32, U16Fixed16, XyzNumber};

/// CIE standard observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardObserver {
    Unknown,
    Cie1931TwoDegree,
    Cie1964TenDegree,
    Other(u32),
}

impl StandardObserver {
    fn from_u32(val: u32) -> Self {
        match val {
            0 => Self::Unknown,
            1 => Self::Cie1931TwoDegree,
            2 => Self::Cie1964TenDegree,
            other => Self::Other(other),
        }
    }
}

/// Measurement geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementGeometry {
    Unknown,
    /// 0°/45° or 45°/0°
    Deg45,
    /// 0°/d or d/0°
    Diffuse,
    Other(u32),
}

impl MeasurementGeometry {
    fn from_u32(val: u32) -> Self {
        match val {
            0 => Self::Unknown,
            1 => Self::Deg45,
            2 => Self::Diffuse,
            other => Self::Other(other),
        }
    }
}

/// Standard illuminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardIlluminant {
    Unknown,
    D50,
    D65,
    D93,
    F2,
    D55,
    A,
    EquiPower,
    F8,
    Other(u32),
}

impl StandardIlluminant {
    fn from_u32(val: u32) -> Self {
        match val {
            0 => Self::Unknown,
            1 => Self::D50,
            2 => Self::D65,
            3 => Self::D93,
            4 => Self::F2,
            5 => Self::D55,
            6 => Self::A,
            7 => Self::EquiPower,
            8 => Self::F8,
            other => Self::Other(other),
        }
    }
}

/// Decoded measurementType payload (36 bytes)
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementTag {
    /// Standard observer used for the measurement
    pub observer: StandardObserver,
    /// XYZ of the measurement backing
    pub backing: Xyz,
    /// Measurement geometry
    pub geometry: MeasurementGeometry,
    /// Flare fraction (u16Fixed16, 0.0 - 1.0)
    pub flare: f64,
    /// Illuminant the measurement was taken under
    pub illuminant: StandardIlluminant,
}

impl MeasurementTag {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 28 {
            return Err(ProfileError::MalformedVariant(format!(
                "measurement: needs 28 bytes, have {}",
                data.len()
            )));
        }

        Ok(Self {
            observer: StandardObserver::from_u32(be_u32(data, 0)),
            backing: XyzNumber::from_slice(&data[4..16])?.to_xyz(),
            geometry: MeasurementGeometry::from_u32(be_u32(data, 16)),
            flare: U16Fixed16::from_slice(&data[20..])?.to_f64(),
            illuminant: StandardIlluminant::from_u32(be_u32(data, 24)),
        })
    }
}

/// Decoded viewingConditionsType payload (28 bytes)
#[derive(Debug, Clone, PartialEq)]
pub struct ViewingConditionsTag {
    /// Absolute XYZ of the illuminant, in cd/m²
    pub illuminant: Xyz,
    /// Absolute XYZ of the surround, in cd/m²
    pub surround: Xyz,
    /// Illuminant type from the measurement table
    pub illuminant_type: StandardIlluminant,
}

impl ViewingConditionsTag {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 28 {
            return Err(ProfileError::MalformedVariant(format!(
                "viewing conditions: needs 28 bytes, have {}",
                data.len()
            )));
        }

        Ok(Self {
            illuminant: XyzNumber::from_slice(&data[0..12])?.to_xyz(),
            surround: XyzNumber::from_slice(&data[12..24])?.to_xyz(),
            illuminant_type: StandardIlluminant::from_u32(be_u32(data, 24)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement_fixture() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&1u32.to_be_bytes()); // CIE 1931
        data.extend_from_slice(&0x0000F6D6u32.to_be_bytes());
        data.extend_from_slice(&0x00010000u32.to_be_bytes());
        data.extend_from_slice(&0x0000D32Du32.to_be_bytes());
        data.extend_from_slice(&2u32.to_be_bytes()); // 0/d
        data.extend_from_slice(&0x00008000u32.to_be_bytes()); // flare 0.5
        data.extend_from_slice(&1u32.to_be_bytes()); // D50
        data
    }

    #[test]
    fn test_measurement() {
        let tag = MeasurementTag::parse(&measurement_fixture()).unwrap();
        assert_eq!(tag.observer, StandardObserver::Cie1931TwoDegree);
        assert_eq!(tag.geometry, MeasurementGeometry::Diffuse);
        assert_eq!(tag.illuminant, StandardIlluminant::D50);
        assert!((tag.flare - 0.5).abs() < 1e-9);
        assert!((tag.backing.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_measurement_unknown_enums_preserved() {
        let mut data = measurement_fixture();
        data[0..4].copy_from_slice(&77u32.to_be_bytes());
        let tag = MeasurementTag::parse(&data).unwrap();
        assert_eq!(tag.observer, StandardObserver::Other(77));
    }

    #[test]
    fn test_measurement_truncated() {
        assert!(MeasurementTag::parse(&[0u8; 20]).is_err());
    }

    #[test]
    fn test_viewing_conditions() {
        let mut data = Vec::new();
        for raw in [
            0x00010000u32, 0x00010000, 0x00010000, // illuminant (1,1,1)
            0x00008000, 0x00008000, 0x00008000, // surround (.5,.5,.5)
        ] {
            data.extend_from_slice(&raw.to_be_bytes());
        }
        data.extend_from_slice(&2u32.to_be_bytes()); // D65

        let tag = ViewingConditionsTag::parse(&data).unwrap();
        assert!((tag.illuminant.x - 1.0).abs() < 1e-9);
        assert!((tag.surround.z - 0.5).abs() < 1e-9);
        assert_eq!(tag.illuminant_type, StandardIlluminant::D65);
    }
}
