//! Tag decoding
//!
//! Each tag's payload starts with a 4-byte type signature and 4 reserved
//! bytes; the type-specific body follows. [`Tag::parse`] validates the
//! (tag signature, type signature) pair against a closed compatibility
//! table, then dispatches to the matching variant decoder. Tags that fail
//! validation or decoding are reported to the diagnostics sink and
//! omitted; the resulting map never holds a tag type illegal for its
//! signature.

mod arrays;
mod curves;
mod lut;
mod measurement;
mod named;
mod response;
mod sequence;
mod text;
mod xyz;

pub use arrays::{DataKind, DataTag};
pub use curves::{CurveTag, ParametricCurveTag, PARAMETRIC_SAMPLES};
pub use lut::{
    Lut16Tag, Lut8Tag, LutDirection, StageClut, StageCurve, StageMatrix, StagedLut,
};
pub use measurement::{
    MeasurementGeometry, MeasurementTag, StandardIlluminant, StandardObserver,
    ViewingConditionsTag,
};
pub use named::{
    ChromaticityTag, ColorantEntry, ColorantOrderTag, ColorantSystem, ColorantTableTag,
    NamedColor2Tag, NamedColorEntry,
};
pub use response::{ChannelResponse, ResponseCurve, ResponseCurveSetTag};
pub use sequence::{ProfileSequenceRecord, ProfileSequenceTag};
pub use text::{DescriptionTag, MlucRecord, MlucTag, TextTag};
pub use xyz::XyzTag;

use crate::error::{ProfileError, Result};
use crate::types::{be_u32, DateTimeNumber, TagSignature, TypeSignature};

/// A decoded tag value, one case per supported type signature
///
/// Each case owns only the data decoded from its slice. Type signatures
/// not modeled here land in [`Tag::Unknown`], preserving their bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Chromaticity(ChromaticityTag),
    ColorantOrder(ColorantOrderTag),
    ColorantTable(ColorantTableTag),
    Curve(CurveTag),
    ParametricCurve(ParametricCurveTag),
    Data(DataTag),
    DateTime(DateTimeNumber),
    Lut8(Lut8Tag),
    Lut16(Lut16Tag),
    LutAToB(StagedLut),
    LutBToA(StagedLut),
    Measurement(MeasurementTag),
    MultiLocalizedUnicode(MlucTag),
    NamedColor2(NamedColor2Tag),
    ProfileDescription(DescriptionTag),
    ProfileSequenceDesc(ProfileSequenceTag),
    ResponseCurveSet16(ResponseCurveSetTag),
    S15Fixed16Array(Vec<f64>),
    U16Fixed16Array(Vec<f64>),
    UInt8Array(Vec<u8>),
    UInt16Array(Vec<u16>),
    UInt32Array(Vec<u32>),
    UInt64Array(Vec<u64>),
    Signature(TagSignature),
    Text(TextTag),
    ViewingConditions(ViewingConditionsTag),
    Xyz(XyzTag),
    /// Fallback for type signatures not otherwise modeled
    Unknown { type_sig: TypeSignature, data: Vec<u8> },
}

/// Whether `type_sig` is a legal encoding for `tag_sig`
///
/// The table is closed over the tag signatures the decoder knows; tag
/// signatures absent from it are permissive, tolerating private and
/// extension tags.
pub fn compatible(tag_sig: TagSignature, type_sig: TypeSignature) -> bool {
    use TagSignature as T;
    use TypeSignature as Y;

    match tag_sig {
        T::MEDIA_WHITE_POINT
        | T::MEDIA_BLACK_POINT
        | T::RED_COLORANT
        | T::GREEN_COLORANT
        | T::BLUE_COLORANT
        | T::LUMINANCE => type_sig == Y::XYZ,

        T::RED_TRC | T::GREEN_TRC | T::BLUE_TRC | T::GRAY_TRC => {
            matches!(type_sig, Y::CURVE | Y::PARAMETRIC_CURVE)
        }

        T::A2B0 | T::A2B1 | T::A2B2 => matches!(type_sig, Y::LUT8 | Y::LUT16 | Y::LUT_A2B),
        T::B2A0 | T::B2A1 | T::B2A2 | T::GAMUT => {
            matches!(type_sig, Y::LUT8 | Y::LUT16 | Y::LUT_B2A)
        }
        T::PREVIEW0 | T::PREVIEW1 | T::PREVIEW2 => {
            matches!(type_sig, Y::LUT8 | Y::LUT16 | Y::LUT_A2B | Y::LUT_B2A)
        }

        T::CHROMATIC_ADAPTATION => type_sig == Y::S15_FIXED16_ARRAY,
        T::COPYRIGHT | T::CHAR_TARGET => matches!(type_sig, Y::TEXT | Y::MLUC),
        T::PROFILE_DESC | T::DEVICE_MFG_DESC | T::DEVICE_MODEL_DESC | T::VIEWING_COND_DESC => {
            matches!(type_sig, Y::DESC | Y::MLUC)
        }
        T::TECHNOLOGY => type_sig == Y::SIGNATURE,
        T::VIEWING_CONDITIONS => type_sig == Y::VIEWING_CONDITIONS,
        T::MEASUREMENT => type_sig == Y::MEASUREMENT,
        T::NAMED_COLOR2 => type_sig == Y::NAMED_COLOR2,
        T::COLORANT_ORDER => type_sig == Y::COLORANT_ORDER,
        T::COLORANT_TABLE | T::COLORANT_TABLE_OUT => type_sig == Y::COLORANT_TABLE,
        T::CHROMATICITY => type_sig == Y::CHROMATICITY,
        T::PROFILE_SEQUENCE_DESC => type_sig == Y::PROFILE_SEQUENCE_DESC,
        T::CALIBRATION_DATE_TIME => type_sig == Y::DATE_TIME,
        T::OUTPUT_RESPONSE => type_sig == Y::RESPONSE_CURVE_SET16,

        _ => true,
    }
}

impl Tag {
    /// Decode one tag payload
    ///
    /// `data` is the directory entry's slice: type signature, 4 reserved
    /// bytes, then the type-specific body. Validation or decode failures
    /// are logged and yield `None`; the caller omits the entry.
    pub fn parse(tag_sig: TagSignature, data: &[u8]) -> Option<Self> {
        match Self::try_parse(tag_sig, data) {
            Ok(tag) => Some(tag),
            Err(err) => {
                log::warn!("dropping tag '{tag_sig}': {err}");
                None
            }
        }
    }

    fn try_parse(tag_sig: TagSignature, data: &[u8]) -> Result<Self> {
        if data.len() < 8 {
            return Err(ProfileError::Truncated {
                expected: 8,
                actual: data.len(),
            });
        }

        let type_sig = TypeSignature(be_u32(data, 0));
        // bytes 4-7 reserved
        if !compatible(tag_sig, type_sig) {
            return Err(ProfileError::TypeMismatch { tag: tag_sig, type_sig });
        }

        let body = &data[8..];

        let tag = match type_sig {
            TypeSignature::XYZ => Self::Xyz(XyzTag::parse(body)?),
            TypeSignature::CURVE => Self::Curve(CurveTag::parse(body)?),
            TypeSignature::PARAMETRIC_CURVE => {
                Self::ParametricCurve(ParametricCurveTag::parse(body)?)
            }
            TypeSignature::TEXT => Self::Text(TextTag::parse(body)?),
            TypeSignature::DESC => Self::ProfileDescription(DescriptionTag::parse(body)?),
            TypeSignature::MLUC => Self::MultiLocalizedUnicode(MlucTag::parse(body)?),
            TypeSignature::LUT8 => Self::Lut8(Lut8Tag::parse(body)?),
            TypeSignature::LUT16 => Self::Lut16(Lut16Tag::parse(body)?),
            TypeSignature::LUT_A2B => {
                Self::LutAToB(StagedLut::parse(body, LutDirection::DeviceToPcs)?)
            }
            TypeSignature::LUT_B2A => {
                Self::LutBToA(StagedLut::parse(body, LutDirection::PcsToDevice)?)
            }
            TypeSignature::MEASUREMENT => Self::Measurement(MeasurementTag::parse(body)?),
            TypeSignature::VIEWING_CONDITIONS => {
                Self::ViewingConditions(ViewingConditionsTag::parse(body)?)
            }
            TypeSignature::NAMED_COLOR2 => Self::NamedColor2(NamedColor2Tag::parse(body)?),
            TypeSignature::CHROMATICITY => Self::Chromaticity(ChromaticityTag::parse(body)?),
            TypeSignature::COLORANT_ORDER => Self::ColorantOrder(ColorantOrderTag::parse(body)?),
            TypeSignature::COLORANT_TABLE => Self::ColorantTable(ColorantTableTag::parse(body)?),
            TypeSignature::PROFILE_SEQUENCE_DESC => {
                Self::ProfileSequenceDesc(ProfileSequenceTag::parse(body)?)
            }
            TypeSignature::RESPONSE_CURVE_SET16 => {
                Self::ResponseCurveSet16(ResponseCurveSetTag::parse(body)?)
            }
            TypeSignature::S15_FIXED16_ARRAY => {
                Self::S15Fixed16Array(arrays::parse_s15_fixed16_array(body)?)
            }
            TypeSignature::U16_FIXED16_ARRAY => {
                Self::U16Fixed16Array(arrays::parse_u16_fixed16_array(body)?)
            }
            TypeSignature::UINT8_ARRAY => Self::UInt8Array(body.to_vec()),
            TypeSignature::UINT16_ARRAY => Self::UInt16Array(arrays::parse_u16_array(body)?),
            TypeSignature::UINT32_ARRAY => Self::UInt32Array(arrays::parse_u32_array(body)?),
            TypeSignature::UINT64_ARRAY => Self::UInt64Array(arrays::parse_u64_array(body)?),
            TypeSignature::SIGNATURE => Self::Signature(arrays::parse_signature(body)?),
            TypeSignature::DATA => Self::Data(DataTag::parse(body)?),
            TypeSignature::DATE_TIME => Self::DateTime(arrays::parse_date_time(body)?),
            _ => Self::Unknown {
                type_sig,
                data: body.to_vec(),
            },
        };

        Ok(tag)
    }

    /// One-line human-readable summary of the decoded value
    pub fn describe(&self) -> String {
        match self {
            Self::Chromaticity(t) => {
                format!("chromaticity: {} channels", t.coordinates.len())
            }
            Self::ColorantOrder(t) => format!("colorant order: {:?}", t.order),
            Self::ColorantTable(t) => format!("colorant table: {} colorants", t.colorants.len()),
            Self::Curve(CurveTag::Identity) => "curve: identity".into(),
            Self::Curve(CurveTag::Gamma(g)) => format!("curve: gamma {g:.4}"),
            Self::Curve(CurveTag::Table(t)) => format!("curve: {} samples", t.len()),
            Self::ParametricCurve(t) => {
                format!("parametric curve: {:?} g={:.4}", t.formula.kind, t.formula.g)
            }
            Self::Data(t) => format!("data: {:?}, {} bytes", t.kind, t.bytes.len()),
            Self::DateTime(t) => format!(
                "date-time: {:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                t.year, t.month, t.day, t.hour, t.minute, t.second
            ),
            Self::Lut8(t) => format!(
                "lut8: {}→{} channels, {} grid points",
                t.input_channels, t.output_channels, t.grid_points
            ),
            Self::Lut16(t) => format!(
                "lut16: {}→{} channels, {} grid points",
                t.input_channels, t.output_channels, t.grid_points
            ),
            Self::LutAToB(t) => format!(
                "lutAToB: {}→{} channels",
                t.input_channels, t.output_channels
            ),
            Self::LutBToA(t) => format!(
                "lutBToA: {}→{} channels",
                t.input_channels, t.output_channels
            ),
            Self::Measurement(t) => format!(
                "measurement: observer {:?}, illuminant {:?}",
                t.observer, t.illuminant
            ),
            Self::MultiLocalizedUnicode(t) => format!(
                "localized text: {:?} ({} locales)",
                t.text().unwrap_or(""),
                t.records.len()
            ),
            Self::NamedColor2(t) => format!("named colors: {} entries", t.colors.len()),
            Self::ProfileDescription(t) => format!("description: {:?}", t.ascii),
            Self::ProfileSequenceDesc(t) => {
                format!("profile sequence: {} profiles", t.records.len())
            }
            Self::ResponseCurveSet16(t) => format!(
                "response curves: {} channels, {} measurement units",
                t.channel_count,
                t.curves.len()
            ),
            Self::S15Fixed16Array(v) => format!("s15Fixed16 array: {} values", v.len()),
            Self::U16Fixed16Array(v) => format!("u16Fixed16 array: {} values", v.len()),
            Self::UInt8Array(v) => format!("uInt8 array: {} values", v.len()),
            Self::UInt16Array(v) => format!("uInt16 array: {} values", v.len()),
            Self::UInt32Array(v) => format!("uInt32 array: {} values", v.len()),
            Self::UInt64Array(v) => format!("uInt64 array: {} values", v.len()),
            Self::Signature(sig) => format!("signature: '{sig}'"),
            Self::Text(t) => format!("text: {:?}", t.text),
            Self::ViewingConditions(t) => {
                format!("viewing conditions: illuminant {:?}", t.illuminant_type)
            }
            Self::Xyz(t) => format!("XYZ: {} triples", t.values.len()),
            Self::Unknown { type_sig, data } => {
                format!("unknown type '{type_sig}': {} bytes", data.len())
            }
        }
    }

    /// The XYZ payload, when this is an XYZ tag
    pub fn as_xyz(&self) -> Option<&XyzTag> {
        match self {
            Self::Xyz(t) => Some(t),
            _ => None,
        }
    }

    /// The curve payload, when this is a `curv` tag
    pub fn as_curve(&self) -> Option<&CurveTag> {
        match self {
            Self::Curve(t) => Some(t),
            _ => None,
        }
    }

    /// The parametric-curve payload, when this is a `para` tag
    pub fn as_parametric_curve(&self) -> Option<&ParametricCurveTag> {
        match self {
            Self::ParametricCurve(t) => Some(t),
            _ => None,
        }
    }

    /// Display text, when this is any of the text-bearing tags
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(&t.text),
            Self::ProfileDescription(t) => Some(&t.ascii),
            Self::MultiLocalizedUnicode(t) => t.text(),
            _ => None,
        }
    }

    /// Whether this is one of the LUT variants
    pub fn is_lut(&self) -> bool {
        matches!(
            self,
            Self::Lut8(_) | Self::Lut16(_) | Self::LutAToB(_) | Self::LutBToA(_)
        )
    }
}
