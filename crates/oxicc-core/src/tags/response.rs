//! Response curve set tag (`rcs2`)
//!
//! Device response measurements for output profiles: one curve structure
//! per measurement unit, each holding per-channel measurement counts, the
//! XYZ of each channel's maximum colorant value, and the measured
//! (device value, response) pairs.

use crate::error::{ProfileError, Result};
use crate::types::{be_u16, be_u32, Response16Number, TagSignature, XyzNumber};

/// Measurements for a single channel of a response curve
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelResponse {
    /// XYZ of the maximum colorant value for this channel
    pub maximum: XyzNumber,
    /// (device value, measured response) pairs
    pub samples: Vec<Response16Number>,
}

/// One measurement-unit curve structure
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseCurve {
    /// Measurement unit signature (e.g. status A/T densitometry)
    pub unit: TagSignature,
    /// Per-channel measurements, one entry per device channel
    pub channels: Vec<ChannelResponse>,
}

/// Decoded responseCurveSet16Type payload
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseCurveSetTag {
    /// Number of device channels
    pub channel_count: u16,
    /// One curve per measurement unit
    pub curves: Vec<ResponseCurve>,
}

impl ResponseCurveSetTag {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(ProfileError::MalformedVariant(
                "response curve set: missing counts".into(),
            ));
        }
        let channel_count = be_u16(data, 0);
        let curve_count = be_u16(data, 2) as usize;

        let offset_table_end = 4 + curve_count * 4;
        if data.len() < offset_table_end {
            return Err(ProfileError::MalformedVariant(format!(
                "response curve set: {curve_count} offsets need {offset_table_end} bytes, have {}",
                data.len()
            )));
        }

        let mut curves = Vec::with_capacity(curve_count);
        for i in 0..curve_count {
            // Structure offsets count from the start of the tag, 8 bytes
            // before this slice.
            let offset = (be_u32(data, 4 + i * 4) as usize)
                .checked_sub(8)
                .ok_or_else(|| {
                    ProfileError::MalformedVariant(
                        "response curve set: structure offset inside type header".into(),
                    )
                })?;
            if offset >= data.len() {
                return Err(ProfileError::MalformedVariant(format!(
                    "response curve set: structure {i} offset {offset} beyond {} bytes",
                    data.len()
                )));
            }
            curves.push(parse_curve_structure(
                &data[offset..],
                channel_count as usize,
            )?);
        }

        Ok(Self {
            channel_count,
            curves,
        })
    }
}

/// Parse one curve structure: unit signature, per-channel counts, maxima,
/// then the measurement runs back to back
fn parse_curve_structure(data: &[u8], channels: usize) -> Result<ResponseCurve> {
    let header = 4 + channels * 4 + channels * XyzNumber::WIDTH;
    if data.len() < header {
        return Err(ProfileError::MalformedVariant(format!(
            "response curve: header needs {header} bytes, have {}",
            data.len()
        )));
    }

    let unit = TagSignature(be_u32(data, 0));

    let mut counts = Vec::with_capacity(channels);
    for i in 0..channels {
        counts.push(be_u32(data, 4 + i * 4) as usize);
    }

    let maxima_base = 4 + channels * 4;
    let mut responses = Vec::with_capacity(channels);
    let mut cursor = header;

    for (i, &count) in counts.iter().enumerate() {
        let maximum = XyzNumber::from_slice(&data[maxima_base + i * XyzNumber::WIDTH..])?;

        let run_len = count.checked_mul(Response16Number::WIDTH).ok_or_else(|| {
            ProfileError::MalformedVariant("response curve: measurement count overflow".into())
        })?;
        let run_end = cursor.checked_add(run_len).ok_or_else(|| {
            ProfileError::MalformedVariant("response curve: measurement extent overflow".into())
        })?;
        if run_end > data.len() {
            return Err(ProfileError::MalformedVariant(format!(
                "response curve: channel {i} declares {count} measurements, {} bytes left",
                data.len() - cursor
            )));
        }

        let mut samples = Vec::with_capacity(count);
        for j in 0..count {
            samples.push(Response16Number::from_slice(
                &data[cursor + j * Response16Number::WIDTH..],
            )?);
        }
        cursor = run_end;

        responses.push(ChannelResponse { maximum, samples });
    }

    Ok(ResponseCurve {
        unit,
        channels: responses,
    })
}
