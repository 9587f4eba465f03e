//! ICC Profile Header
//!
//! The profile header is exactly 128 bytes of fixed-offset fields. Parsing
//! fails only on truncation or a bad magic number; every other field
//! decodes totally, with unrecognized signatures preserved as raw values.

use crate::error::{ProfileError, Result};
use crate::types::{be_u32, be_u64, DateTimeNumber, XyzNumber};

/// Profile file magic - must be 'acsp' (0x61637370)
pub const PROFILE_MAGIC: u32 = 0x61637370;

/// Header length; also the minimum valid profile size
pub const HEADER_SIZE: usize = 128;

/// ICC Profile Header (128 bytes)
///
/// Immutable once parsed. The PCS illuminant field is normalized to the
/// D50 constant; see [`ProfileHeader::parse`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileHeader {
    /// Profile size in bytes, as declared in the file
    pub size: u32,
    /// Preferred CMM type signature
    pub cmm_type: u32,
    /// Profile version
    pub version: ProfileVersion,
    /// Profile/device class
    pub device_class: ProfileClass,
    /// Color space of device data
    pub color_space: ColorSpace,
    /// Profile connection space (XYZ or Lab)
    pub pcs: ColorSpace,
    /// Creation date and time
    pub creation_date: DateTimeNumber,
    /// Primary platform signature
    pub platform: u32,
    /// Device manufacturer signature
    pub manufacturer: u32,
    /// Device model signature
    pub model: u32,
    /// Device attributes (two big-endian uint32 words)
    pub attributes: u64,
    /// Rendering intent
    pub rendering_intent: RenderingIntent,
    /// PCS illuminant; always the D50 constant after parsing
    pub illuminant: XyzNumber,
    /// Profile creator signature
    pub creator: u32,
    /// Low 4 bytes of the profile MD5 checksum
    pub checksum: u32,
}

impl ProfileHeader {
    /// Parse the 128-byte header
    ///
    /// Fails with `Truncated` when fewer than 128 bytes are available and
    /// with `BadMagic` when the signature field is not 'acsp'. The encoded
    /// PCS illuminant is decoded for diagnostics but the stored value is
    /// the D50 constant: the connection space is defined against D50 and
    /// every derived query assumes it.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(ProfileError::Truncated {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let magic = be_u32(data, 36);
        if magic != PROFILE_MAGIC {
            return Err(ProfileError::BadMagic(magic));
        }

        let size = be_u32(data, 0);
        let cmm_type = be_u32(data, 4);

        let version = ProfileVersion {
            major: data[8],
            minor: data[9] >> 4,
            bugfix: data[9] & 0x0F,
        };

        let device_class = ProfileClass::from_u32(be_u32(data, 12));
        let color_space = ColorSpace::from_u32(be_u32(data, 16));
        let pcs = ColorSpace::from_u32(be_u32(data, 20));

        let creation_date = DateTimeNumber::from_slice(&data[24..36])?;

        let platform = be_u32(data, 40);
        let manufacturer = be_u32(data, 48);
        let model = be_u32(data, 52);
        let attributes = be_u64(data, 56);

        let intent_value = be_u32(data, 64);
        let rendering_intent = RenderingIntent::from_u32(intent_value).unwrap_or_else(|| {
            log::warn!("unknown rendering intent {intent_value}, assuming perceptual");
            RenderingIntent::Perceptual
        });

        let encoded_illuminant = XyzNumber::from_slice(&data[68..80])?;
        if encoded_illuminant != XyzNumber::D50 {
            log::debug!(
                "PCS illuminant encoded as {:?}, normalizing to D50",
                encoded_illuminant.to_xyz()
            );
        }

        let creator = be_u32(data, 80);
        let checksum = be_u32(data, 84);

        Ok(Self {
            size,
            cmm_type,
            version,
            device_class,
            color_space,
            pcs,
            creation_date,
            platform,
            manufacturer,
            model,
            attributes,
            rendering_intent,
            illuminant: XyzNumber::D50,
            creator,
            checksum,
        })
    }

    /// Whether this is a display-class profile
    ///
    /// Display profiles lacking a chromatic-adaptation tag get a computed
    /// adaptation matrix instead of the identity.
    pub fn is_display_class(&self) -> bool {
        self.device_class == ProfileClass::Display
    }
}

/// ICC Profile Version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileVersion {
    pub major: u8,
    pub minor: u8,
    pub bugfix: u8,
}

impl ProfileVersion {
    /// Check if the version is at least major.minor
    pub fn at_least(&self, major: u8, minor: u8) -> bool {
        self.major > major || (self.major == major && self.minor >= minor)
    }

    /// Check if this is a v4 profile
    pub fn is_v4(&self) -> bool {
        self.major == 4
    }

    /// Check if this is a v2 profile
    pub fn is_v2(&self) -> bool {
        self.major == 2
    }
}

/// ICC Profile Class (Device Class)
///
/// Unrecognized signatures are preserved rather than rejected; a strange
/// class never aborts the header parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileClass {
    /// Input device (scanner, camera)
    Input,
    /// Display device (monitor)
    Display,
    /// Output device (printer)
    Output,
    /// Device link
    DeviceLink,
    /// Color space conversion
    ColorSpace,
    /// Abstract profile
    Abstract,
    /// Named color profile
    NamedColor,
    /// Signature not defined by ICC.1
    Unknown(u32),
}

impl ProfileClass {
    pub fn from_u32(val: u32) -> Self {
        match &val.to_be_bytes() {
            b"scnr" => Self::Input,
            b"mntr" => Self::Display,
            b"prtr" => Self::Output,
            b"link" => Self::DeviceLink,
            b"spac" => Self::ColorSpace,
            b"abst" => Self::Abstract,
            b"nmcl" => Self::NamedColor,
            _ => Self::Unknown(val),
        }
    }

    pub fn to_u32(&self) -> u32 {
        match self {
            Self::Input => u32::from_be_bytes(*b"scnr"),
            Self::Display => u32::from_be_bytes(*b"mntr"),
            Self::Output => u32::from_be_bytes(*b"prtr"),
            Self::DeviceLink => u32::from_be_bytes(*b"link"),
            Self::ColorSpace => u32::from_be_bytes(*b"spac"),
            Self::Abstract => u32::from_be_bytes(*b"abst"),
            Self::NamedColor => u32::from_be_bytes(*b"nmcl"),
            Self::Unknown(val) => *val,
        }
    }
}

/// ICC Color Space signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Xyz,
    Lab,
    Luv,
    YCbCr,
    Yxy,
    Rgb,
    Gray,
    Hsv,
    Hls,
    Cmyk,
    Cmy,
    Color2,
    Color3,
    Color4,
    Color5,
    Color6,
    Color7,
    Color8,
    Color9,
    Color10,
    Color11,
    Color12,
    Color13,
    Color14,
    Color15,
    /// Signature not defined by ICC.1
    Unknown(u32),
}

impl ColorSpace {
    pub fn from_u32(val: u32) -> Self {
        match &val.to_be_bytes() {
            b"XYZ " => Self::Xyz,
            b"Lab " => Self::Lab,
            b"Luv " => Self::Luv,
            b"YCbr" => Self::YCbCr,
            b"Yxy " => Self::Yxy,
            b"RGB " => Self::Rgb,
            b"GRAY" => Self::Gray,
            b"HSV " => Self::Hsv,
            b"HLS " => Self::Hls,
            b"CMYK" => Self::Cmyk,
            b"CMY " => Self::Cmy,
            b"2CLR" => Self::Color2,
            b"3CLR" => Self::Color3,
            b"4CLR" => Self::Color4,
            b"5CLR" => Self::Color5,
            b"6CLR" => Self::Color6,
            b"7CLR" => Self::Color7,
            b"8CLR" => Self::Color8,
            b"9CLR" => Self::Color9,
            b"ACLR" => Self::Color10,
            b"BCLR" => Self::Color11,
            b"CCLR" => Self::Color12,
            b"DCLR" => Self::Color13,
            b"ECLR" => Self::Color14,
            b"FCLR" => Self::Color15,
            _ => Self::Unknown(val),
        }
    }

    /// Number of channels for this color space, when known
    pub fn channels(&self) -> Option<usize> {
        match self {
            Self::Gray => Some(1),
            Self::Color2 => Some(2),
            Self::Xyz
            | Self::Lab
            | Self::Luv
            | Self::YCbCr
            | Self::Yxy
            | Self::Rgb
            | Self::Hsv
            | Self::Hls
            | Self::Cmy
            | Self::Color3 => Some(3),
            Self::Cmyk | Self::Color4 => Some(4),
            Self::Color5 => Some(5),
            Self::Color6 => Some(6),
            Self::Color7 => Some(7),
            Self::Color8 => Some(8),
            Self::Color9 => Some(9),
            Self::Color10 => Some(10),
            Self::Color11 => Some(11),
            Self::Color12 => Some(12),
            Self::Color13 => Some(13),
            Self::Color14 => Some(14),
            Self::Color15 => Some(15),
            Self::Unknown(_) => None,
        }
    }
}

/// ICC Rendering Intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderingIntent {
    /// Perceptual
    #[default]
    Perceptual,
    /// Media-relative colorimetric
    MediaRelative,
    /// Saturation
    Saturation,
    /// ICC-absolute colorimetric
    IccAbsolute,
}

impl RenderingIntent {
    pub fn from_u32(val: u32) -> Option<Self> {
        match val {
            0 => Some(Self::Perceptual),
            1 => Some(Self::MediaRelative),
            2 => Some(Self::Saturation),
            3 => Some(Self::IccAbsolute),
            _ => None,
        }
    }

    pub fn to_u32(&self) -> u32 {
        match self {
            Self::Perceptual => 0,
            Self::MediaRelative => 1,
            Self::Saturation => 2,
            Self::IccAbsolute => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_header() -> Vec<u8> {
        let mut data = vec![0u8; HEADER_SIZE];
        data[0..4].copy_from_slice(&(HEADER_SIZE as u32).to_be_bytes());
        data[8] = 4;
        data[9] = 0x30;
        data[12..16].copy_from_slice(b"mntr");
        data[16..20].copy_from_slice(b"RGB ");
        data[20..24].copy_from_slice(b"XYZ ");
        data[36..40].copy_from_slice(&PROFILE_MAGIC.to_be_bytes());
        data
    }

    #[test]
    fn test_parse_minimal() {
        let header = ProfileHeader::parse(&minimal_header()).unwrap();
        assert_eq!(header.version.major, 4);
        assert_eq!(header.version.minor, 3);
        assert_eq!(header.version.bugfix, 0);
        assert_eq!(header.device_class, ProfileClass::Display);
        assert_eq!(header.color_space, ColorSpace::Rgb);
        assert_eq!(header.pcs, ColorSpace::Xyz);
        assert_eq!(header.rendering_intent, RenderingIntent::Perceptual);
    }

    #[test]
    fn test_truncated() {
        for len in [0, 1, 64, 127] {
            let result = ProfileHeader::parse(&vec![0u8; len]);
            assert!(matches!(
                result,
                Err(ProfileError::Truncated { expected: 128, .. })
            ));
        }
    }

    #[test]
    fn test_bad_magic() {
        let mut data = minimal_header();
        data[36..40].copy_from_slice(b"nope");
        assert!(matches!(
            ProfileHeader::parse(&data),
            Err(ProfileError::BadMagic(_))
        ));
    }

    #[test]
    fn test_unknown_class_does_not_abort() {
        let mut data = minimal_header();
        data[12..16].copy_from_slice(b"wat?");
        let header = ProfileHeader::parse(&data).unwrap();
        assert_eq!(
            header.device_class,
            ProfileClass::Unknown(u32::from_be_bytes(*b"wat?"))
        );
        assert!(!header.is_display_class());
    }

    #[test]
    fn test_unknown_intent_falls_back() {
        let mut data = minimal_header();
        data[64..68].copy_from_slice(&99u32.to_be_bytes());
        let header = ProfileHeader::parse(&data).unwrap();
        assert_eq!(header.rendering_intent, RenderingIntent::Perceptual);
    }

    #[test]
    fn test_illuminant_normalized_to_d50() {
        let mut data = minimal_header();
        // Encode a D65-ish illuminant; the header must still report D50
        data[68..72].copy_from_slice(&0x0000F333u32.to_be_bytes());
        data[72..76].copy_from_slice(&0x00010000u32.to_be_bytes());
        data[76..80].copy_from_slice(&0x000116C7u32.to_be_bytes());
        let header = ProfileHeader::parse(&data).unwrap();
        assert_eq!(header.illuminant, XyzNumber::D50);
    }

    #[test]
    fn test_all_intents() {
        for i in 0..4u32 {
            let mut data = minimal_header();
            data[64..68].copy_from_slice(&i.to_be_bytes());
            let header = ProfileHeader::parse(&data).unwrap();
            assert_eq!(header.rendering_intent.to_u32(), i);
        }
    }

    #[test]
    fn test_version_helpers() {
        let v2 = ProfileVersion {
            major: 2,
            minor: 4,
            bugfix: 0,
        };
        assert!(v2.is_v2());
        assert!(!v2.is_v4());
        assert!(v2.at_least(2, 4));
        assert!(!v2.at_least(2, 5));
    }

    #[test]
    fn test_color_space_channels() {
        assert_eq!(ColorSpace::Gray.channels(), Some(1));
        assert_eq!(ColorSpace::Rgb.channels(), Some(3));
        assert_eq!(ColorSpace::Cmyk.channels(), Some(4));
        assert_eq!(ColorSpace::Color15.channels(), Some(15));
        assert_eq!(ColorSpace::Unknown(0).channels(), None);
    }

    #[test]
    fn test_profile_class_roundtrip() {
        for class in [
            ProfileClass::Input,
            ProfileClass::Display,
            ProfileClass::Output,
            ProfileClass::DeviceLink,
            ProfileClass::ColorSpace,
            ProfileClass::Abstract,
            ProfileClass::NamedColor,
        ] {
            assert_eq!(ProfileClass::from_u32(class.to_u32()), class);
        }
    }
}
