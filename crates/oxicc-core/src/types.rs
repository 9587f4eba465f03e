//! Wire-level ICC number encodings and signatures
//!
//! Every multi-byte integer in a profile is big-endian regardless of host
//! byte order. Each checked `from_slice` constructor validates the
//! available length and fails with [`ProfileError::Truncated`] instead of
//! reading past the slice.

use std::fmt;

use crate::color::Xyz;
use crate::error::{ProfileError, Result};

/// Require `len` bytes at the head of `data`
#[inline]
fn need(data: &[u8], len: usize) -> Result<()> {
    if data.len() < len {
        return Err(ProfileError::Truncated {
            expected: len,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Read a big-endian u16 at `offset` (caller has checked bounds)
#[inline]
pub(crate) fn be_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([data[offset], data[offset + 1]])
}

/// Read a big-endian u32 at `offset` (caller has checked bounds)
#[inline]
pub(crate) fn be_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Read a big-endian u64 at `offset` (caller has checked bounds)
#[inline]
pub(crate) fn be_u64(data: &[u8], offset: usize) -> u64 {
    let mut b = [0u8; 8];
    b.copy_from_slice(&data[offset..offset + 8]);
    u64::from_be_bytes(b)
}

/// ICC tag signature: the 4-byte identifier of a tag's semantic role
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagSignature(pub u32);

impl TagSignature {
    /// Create from 4 ASCII characters
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(b))
    }

    // Tag signatures the compatibility table knows about
    pub const A2B0: Self = Self::from_bytes(*b"A2B0");
    pub const A2B1: Self = Self::from_bytes(*b"A2B1");
    pub const A2B2: Self = Self::from_bytes(*b"A2B2");
    pub const B2A0: Self = Self::from_bytes(*b"B2A0");
    pub const B2A1: Self = Self::from_bytes(*b"B2A1");
    pub const B2A2: Self = Self::from_bytes(*b"B2A2");
    pub const BLUE_COLORANT: Self = Self::from_bytes(*b"bXYZ");
    pub const BLUE_TRC: Self = Self::from_bytes(*b"bTRC");
    pub const CALIBRATION_DATE_TIME: Self = Self::from_bytes(*b"calt");
    pub const CHAR_TARGET: Self = Self::from_bytes(*b"targ");
    pub const CHROMATIC_ADAPTATION: Self = Self::from_bytes(*b"chad");
    pub const CHROMATICITY: Self = Self::from_bytes(*b"chrm");
    pub const COLORANT_ORDER: Self = Self::from_bytes(*b"clro");
    pub const COLORANT_TABLE: Self = Self::from_bytes(*b"clrt");
    pub const COLORANT_TABLE_OUT: Self = Self::from_bytes(*b"clot");
    pub const COPYRIGHT: Self = Self::from_bytes(*b"cprt");
    pub const DEVICE_MFG_DESC: Self = Self::from_bytes(*b"dmnd");
    pub const DEVICE_MODEL_DESC: Self = Self::from_bytes(*b"dmdd");
    pub const GAMUT: Self = Self::from_bytes(*b"gamt");
    pub const GRAY_TRC: Self = Self::from_bytes(*b"kTRC");
    pub const GREEN_COLORANT: Self = Self::from_bytes(*b"gXYZ");
    pub const GREEN_TRC: Self = Self::from_bytes(*b"gTRC");
    pub const LUMINANCE: Self = Self::from_bytes(*b"lumi");
    pub const MEASUREMENT: Self = Self::from_bytes(*b"meas");
    pub const MEDIA_BLACK_POINT: Self = Self::from_bytes(*b"bkpt");
    pub const MEDIA_WHITE_POINT: Self = Self::from_bytes(*b"wtpt");
    pub const NAMED_COLOR2: Self = Self::from_bytes(*b"ncl2");
    pub const OUTPUT_RESPONSE: Self = Self::from_bytes(*b"resp");
    pub const PREVIEW0: Self = Self::from_bytes(*b"pre0");
    pub const PREVIEW1: Self = Self::from_bytes(*b"pre1");
    pub const PREVIEW2: Self = Self::from_bytes(*b"pre2");
    pub const PROFILE_DESC: Self = Self::from_bytes(*b"desc");
    pub const PROFILE_SEQUENCE_DESC: Self = Self::from_bytes(*b"pseq");
    pub const RED_COLORANT: Self = Self::from_bytes(*b"rXYZ");
    pub const RED_TRC: Self = Self::from_bytes(*b"rTRC");
    pub const TECHNOLOGY: Self = Self::from_bytes(*b"tech");
    pub const VIEWING_CONDITIONS: Self = Self::from_bytes(*b"view");
    pub const VIEWING_COND_DESC: Self = Self::from_bytes(*b"vued");
}

impl fmt::Display for TagSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0.to_be_bytes()))
    }
}

/// ICC type signature: the 4-byte identifier of a tag's wire encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeSignature(pub u32);

impl TypeSignature {
    /// Create from 4 ASCII characters
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(b))
    }

    pub const CHROMATICITY: Self = Self::from_bytes(*b"chrm");
    pub const COLORANT_ORDER: Self = Self::from_bytes(*b"clro");
    pub const COLORANT_TABLE: Self = Self::from_bytes(*b"clrt");
    pub const CURVE: Self = Self::from_bytes(*b"curv");
    pub const DATA: Self = Self::from_bytes(*b"data");
    pub const DATE_TIME: Self = Self::from_bytes(*b"dtim");
    pub const DESC: Self = Self::from_bytes(*b"desc");
    pub const LUT16: Self = Self::from_bytes(*b"mft2");
    pub const LUT8: Self = Self::from_bytes(*b"mft1");
    pub const LUT_A2B: Self = Self::from_bytes(*b"mAB ");
    pub const LUT_B2A: Self = Self::from_bytes(*b"mBA ");
    pub const MEASUREMENT: Self = Self::from_bytes(*b"meas");
    pub const MLUC: Self = Self::from_bytes(*b"mluc");
    pub const NAMED_COLOR2: Self = Self::from_bytes(*b"ncl2");
    pub const PARAMETRIC_CURVE: Self = Self::from_bytes(*b"para");
    pub const PROFILE_SEQUENCE_DESC: Self = Self::from_bytes(*b"pseq");
    pub const RESPONSE_CURVE_SET16: Self = Self::from_bytes(*b"rcs2");
    pub const S15_FIXED16_ARRAY: Self = Self::from_bytes(*b"sf32");
    pub const SIGNATURE: Self = Self::from_bytes(*b"sig ");
    pub const TEXT: Self = Self::from_bytes(*b"text");
    pub const U16_FIXED16_ARRAY: Self = Self::from_bytes(*b"uf32");
    pub const UINT16_ARRAY: Self = Self::from_bytes(*b"ui16");
    pub const UINT32_ARRAY: Self = Self::from_bytes(*b"ui32");
    pub const UINT64_ARRAY: Self = Self::from_bytes(*b"ui64");
    pub const UINT8_ARRAY: Self = Self::from_bytes(*b"ui08");
    pub const VIEWING_CONDITIONS: Self = Self::from_bytes(*b"view");
    pub const XYZ: Self = Self::from_bytes(*b"XYZ ");
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0.to_be_bytes()))
    }
}

/// s15Fixed16Number: signed 16-bit integer part, 16-bit fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct S15Fixed16(pub i32);

impl S15Fixed16 {
    /// Wire width in bytes
    pub const WIDTH: usize = 4;

    /// Create from raw fixed-point bits
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Parse from 4 big-endian bytes
    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(i32::from_be_bytes(bytes))
    }

    /// Checked parse from the head of a slice
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        need(data, Self::WIDTH)?;
        Ok(Self::from_be_bytes([data[0], data[1], data[2], data[3]]))
    }

    /// Convert to f64
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 65536.0
    }

    /// Encode an f64 (used by fixtures and round-trip tests)
    pub fn from_f64(val: f64) -> Self {
        Self((val * 65536.0) as i32)
    }
}

/// u16Fixed16Number: unsigned 16-bit integer part, 16-bit fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct U16Fixed16(pub u32);

impl U16Fixed16 {
    pub const WIDTH: usize = 4;

    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    pub fn from_slice(data: &[u8]) -> Result<Self> {
        need(data, Self::WIDTH)?;
        Ok(Self::from_be_bytes([data[0], data[1], data[2], data[3]]))
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 65536.0
    }
}

/// u8Fixed8Number: unsigned 8-bit integer part, 8-bit fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct U8Fixed8(pub u16);

impl U8Fixed8 {
    pub const WIDTH: usize = 2;

    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    pub fn from_slice(data: &[u8]) -> Result<Self> {
        need(data, Self::WIDTH)?;
        Ok(Self::from_be_bytes([data[0], data[1]]))
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 256.0
    }
}

/// u1Fixed15Number: unsigned 1-bit integer part, 15-bit fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct U1Fixed15(pub u16);

impl U1Fixed15 {
    pub const WIDTH: usize = 2;

    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    pub fn from_slice(data: &[u8]) -> Result<Self> {
        need(data, Self::WIDTH)?;
        Ok(Self::from_be_bytes([data[0], data[1]]))
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 32768.0
    }
}

/// uInt16Number interpreted as value/65535 in [0, 1]
#[inline]
pub fn normalized_u16(raw: u16) -> f64 {
    raw as f64 / 65535.0
}

/// XYZNumber: three consecutive s15Fixed16 values (12 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XyzNumber {
    pub x: S15Fixed16,
    pub y: S15Fixed16,
    pub z: S15Fixed16,
}

impl XyzNumber {
    pub const WIDTH: usize = 12;

    /// The D50 PCS illuminant as encoded in profile headers
    pub const D50: Self = Self {
        x: S15Fixed16(0x0000F6D6),
        y: S15Fixed16(0x00010000),
        z: S15Fixed16(0x0000D32D),
    };

    /// Checked parse from the head of a slice
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        need(data, Self::WIDTH)?;
        Ok(Self {
            x: S15Fixed16::from_be_bytes([data[0], data[1], data[2], data[3]]),
            y: S15Fixed16::from_be_bytes([data[4], data[5], data[6], data[7]]),
            z: S15Fixed16::from_be_bytes([data[8], data[9], data[10], data[11]]),
        })
    }

    /// Convert to floating-point XYZ
    pub fn to_xyz(&self) -> Xyz {
        Xyz::new(self.x.to_f64(), self.y.to_f64(), self.z.to_f64())
    }
}

/// dateTimeNumber: six big-endian uint16 fields (12 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTimeNumber {
    pub year: u16,
    pub month: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

impl DateTimeNumber {
    pub const WIDTH: usize = 12;

    /// Checked parse from the head of a slice
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        need(data, Self::WIDTH)?;
        Ok(Self {
            year: be_u16(data, 0),
            month: be_u16(data, 2),
            day: be_u16(data, 4),
            hour: be_u16(data, 6),
            minute: be_u16(data, 8),
            second: be_u16(data, 10),
        })
    }
}

/// response16Number: device code + measured response (8 bytes)
///
/// Two reserved bytes sit between the device code and the measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response16Number {
    /// Encoded device value
    pub device: u16,
    /// Measured response as s15Fixed16
    pub measurement: S15Fixed16,
}

impl Response16Number {
    pub const WIDTH: usize = 8;

    pub fn from_slice(data: &[u8]) -> Result<Self> {
        need(data, Self::WIDTH)?;
        Ok(Self {
            device: be_u16(data, 0),
            measurement: S15Fixed16::from_be_bytes([data[4], data[5], data[6], data[7]]),
        })
    }
}
