//! LUT tags
//!
//! Two generations of multi-stage transforms:
//! - `mft1`/`mft2`: the legacy fixed-layout 8/16-bit LUTs (matrix, input
//!   curves, CLUT grid, output curves). Decoded structurally and retained;
//!   their contents are not interpreted further here.
//! - `mAB `/`mBA `: the v4 staged LUTs, addressed by per-stage offsets
//!   (B-curves, 3x4 matrix, M-curves, CLUT, A-curves), any stage optional.
//!
//! Stage offsets inside `mAB `/`mBA ` count from the start of the tag,
//! which sits 8 bytes before the slice the decoders receive.

use crate::error::{ProfileError, Result};
use crate::math::gamma::{CurveFormula, CurveFormulaKind};
use crate::types::{be_u16, be_u32, normalized_u16, S15Fixed16, U8Fixed8};

/// Decoded lut8Type payload (mft1)
#[derive(Debug, Clone, PartialEq)]
pub struct Lut8Tag {
    pub input_channels: u8,
    pub output_channels: u8,
    /// CLUT grid points per input dimension
    pub grid_points: u8,
    /// 3x3 matrix applied to PCSXYZ input
    pub matrix: [[f64; 3]; 3],
    /// One 256-entry table per input channel
    pub input_curves: Vec<Vec<u8>>,
    /// CLUT samples, grid_points^input_channels * output_channels entries
    pub clut: Vec<u8>,
    /// One 256-entry table per output channel
    pub output_curves: Vec<Vec<u8>>,
}

impl Lut8Tag {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 40 {
            return Err(ProfileError::MalformedVariant(format!(
                "lut8: header needs 40 bytes, have {}",
                data.len()
            )));
        }

        let input_channels = data[0];
        let output_channels = data[1];
        let grid_points = data[2];
        // data[3] padding
        let matrix = read_3x3_matrix(data, 4);

        let mut cursor = 40usize;

        let mut input_curves = Vec::with_capacity(input_channels as usize);
        for _ in 0..input_channels {
            let table = take(data, &mut cursor, 256, "lut8 input table")?;
            input_curves.push(table.to_vec());
        }

        let clut_len = clut_entry_count(grid_points, input_channels, output_channels)?;
        let clut = take(data, &mut cursor, clut_len, "lut8 CLUT")?.to_vec();

        let mut output_curves = Vec::with_capacity(output_channels as usize);
        for _ in 0..output_channels {
            let table = take(data, &mut cursor, 256, "lut8 output table")?;
            output_curves.push(table.to_vec());
        }

        Ok(Self {
            input_channels,
            output_channels,
            grid_points,
            matrix,
            input_curves,
            clut,
            output_curves,
        })
    }
}

/// Decoded lut16Type payload (mft2)
#[derive(Debug, Clone, PartialEq)]
pub struct Lut16Tag {
    pub input_channels: u8,
    pub output_channels: u8,
    /// CLUT grid points per input dimension
    pub grid_points: u8,
    /// 3x3 matrix applied to PCSXYZ input
    pub matrix: [[f64; 3]; 3],
    /// One table of `input_entries` values per input channel
    pub input_curves: Vec<Vec<u16>>,
    /// CLUT samples, grid_points^input_channels * output_channels entries
    pub clut: Vec<u16>,
    /// One table of `output_entries` values per output channel
    pub output_curves: Vec<Vec<u16>>,
}

impl Lut16Tag {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 44 {
            return Err(ProfileError::MalformedVariant(format!(
                "lut16: header needs 44 bytes, have {}",
                data.len()
            )));
        }

        let input_channels = data[0];
        let output_channels = data[1];
        let grid_points = data[2];
        let matrix = read_3x3_matrix(data, 4);
        let input_entries = be_u16(data, 40) as usize;
        let output_entries = be_u16(data, 42) as usize;

        let mut cursor = 44usize;

        let mut input_curves = Vec::with_capacity(input_channels as usize);
        for _ in 0..input_channels {
            let raw = take(data, &mut cursor, input_entries * 2, "lut16 input table")?;
            input_curves.push(read_u16_run(raw, input_entries));
        }

        let clut_entries = clut_entry_count(grid_points, input_channels, output_channels)?;
        let raw = take(data, &mut cursor, clut_entries * 2, "lut16 CLUT")?;
        let clut = read_u16_run(raw, clut_entries);

        let mut output_curves = Vec::with_capacity(output_channels as usize);
        for _ in 0..output_channels {
            let raw = take(data, &mut cursor, output_entries * 2, "lut16 output table")?;
            output_curves.push(read_u16_run(raw, output_entries));
        }

        Ok(Self {
            input_channels,
            output_channels,
            grid_points,
            matrix,
            input_curves,
            clut,
            output_curves,
        })
    }
}

/// Transform direction of a staged (v4) LUT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LutDirection {
    /// mAB : device values toward the connection space
    DeviceToPcs,
    /// mBA : connection space toward device values
    PcsToDevice,
}

/// One curve of a staged LUT's A/B/M curve sets
#[derive(Debug, Clone, PartialEq)]
pub enum StageCurve {
    /// Zero-entry curv: identity
    Identity,
    /// One-entry curv: a u8Fixed8 gamma
    Gamma(f64),
    /// Sampled curv table, normalized to [0, 1]
    Table(Vec<f64>),
    /// Parametric formula
    Formula(CurveFormula),
}

/// The 3x3 + offset matrix stage of a staged LUT
#[derive(Debug, Clone, PartialEq)]
pub struct StageMatrix {
    pub matrix: [[f64; 3]; 3],
    pub offset: [f64; 3],
}

impl StageMatrix {
    fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 48 {
            return Err(ProfileError::MalformedVariant(format!(
                "staged LUT matrix: needs 48 bytes, have {}",
                data.len()
            )));
        }
        let matrix = read_3x3_matrix(data, 0);
        let mut offset = [0.0f64; 3];
        for (i, slot) in offset.iter_mut().enumerate() {
            *slot = S15Fixed16::from_slice(&data[36 + i * 4..])?.to_f64();
        }
        Ok(Self { matrix, offset })
    }
}

/// The CLUT stage of a staged LUT
#[derive(Debug, Clone, PartialEq)]
pub struct StageClut {
    /// Grid points per input dimension
    pub grid_points: Vec<u8>,
    /// Sample precision on the wire: 1 (u8) or 2 (u16)
    pub precision: u8,
    /// Samples normalized to [0, 1]
    pub samples: Vec<f64>,
    pub output_channels: u8,
}

impl StageClut {
    fn parse(data: &[u8], input_channels: u8, output_channels: u8) -> Result<Self> {
        if data.len() < 20 {
            return Err(ProfileError::MalformedVariant(format!(
                "staged LUT CLUT: header needs 20 bytes, have {}",
                data.len()
            )));
        }
        if input_channels as usize > 16 {
            return Err(ProfileError::MalformedVariant(format!(
                "staged LUT CLUT: {input_channels} input channels exceed the 16-dimension grid"
            )));
        }

        let grid_points = data[..input_channels as usize].to_vec();
        let precision = data[16];
        if precision != 1 && precision != 2 {
            return Err(ProfileError::MalformedVariant(format!(
                "staged LUT CLUT: precision {precision} is not 1 or 2"
            )));
        }

        let mut entries = output_channels as usize;
        for &g in &grid_points {
            entries = entries.checked_mul(g as usize).ok_or_else(|| {
                ProfileError::MalformedVariant("staged LUT CLUT: grid size overflow".into())
            })?;
        }

        let needed = 20 + entries * precision as usize;
        if data.len() < needed {
            return Err(ProfileError::MalformedVariant(format!(
                "staged LUT CLUT: {entries} samples need {needed} bytes, have {}",
                data.len()
            )));
        }

        let mut samples = Vec::with_capacity(entries);
        for i in 0..entries {
            let offset = 20 + i * precision as usize;
            samples.push(if precision == 1 {
                data[offset] as f64 / 255.0
            } else {
                normalized_u16(be_u16(data, offset))
            });
        }

        Ok(Self {
            grid_points,
            precision,
            samples,
            output_channels,
        })
    }
}

/// A staged (v4) LUT: B-curves, matrix, M-curves, CLUT, A-curves
///
/// The same layout backs both directions; only the channel counts of the
/// curve sets swap.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedLut {
    pub direction: LutDirection,
    pub input_channels: u8,
    pub output_channels: u8,
    pub b_curves: Option<Vec<StageCurve>>,
    pub matrix: Option<StageMatrix>,
    pub m_curves: Option<Vec<StageCurve>>,
    pub clut: Option<StageClut>,
    pub a_curves: Option<Vec<StageCurve>>,
}

impl StagedLut {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8], direction: LutDirection) -> Result<Self> {
        if data.len() < 24 {
            return Err(ProfileError::MalformedVariant(format!(
                "staged LUT: header needs 24 bytes, have {}",
                data.len()
            )));
        }

        let input_channels = data[0];
        let output_channels = data[1];
        // data[2..4] reserved

        // A curves pair with the device side, B curves with the PCS side
        let (a_count, b_count, m_count) = match direction {
            LutDirection::DeviceToPcs => (input_channels, output_channels, output_channels),
            LutDirection::PcsToDevice => (output_channels, input_channels, input_channels),
        };

        let b_offset = stage_offset(data, 4)?;
        let matrix_offset = stage_offset(data, 8)?;
        let m_offset = stage_offset(data, 12)?;
        let clut_offset = stage_offset(data, 16)?;
        let a_offset = stage_offset(data, 20)?;

        let b_curves = b_offset
            .map(|o| parse_curve_set(data, o, b_count as usize))
            .transpose()?;
        let matrix = matrix_offset
            .map(|o| StageMatrix::parse(&data[o.min(data.len())..]))
            .transpose()?;
        let m_curves = m_offset
            .map(|o| parse_curve_set(data, o, m_count as usize))
            .transpose()?;
        let clut = clut_offset
            .map(|o| StageClut::parse(&data[o.min(data.len())..], input_channels, output_channels))
            .transpose()?;
        let a_curves = a_offset
            .map(|o| parse_curve_set(data, o, a_count as usize))
            .transpose()?;

        Ok(Self {
            direction,
            input_channels,
            output_channels,
            b_curves,
            matrix,
            m_curves,
            clut,
            a_curves,
        })
    }
}

/// Decode a stage-offset field: zero means the stage is absent; anything
/// else is rebased from tag start to the post-header slice
fn stage_offset(data: &[u8], at: usize) -> Result<Option<usize>> {
    let raw = be_u32(data, at) as usize;
    if raw == 0 {
        return Ok(None);
    }
    raw.checked_sub(8)
        .map(Some)
        .ok_or_else(|| ProfileError::MalformedVariant("staged LUT: offset inside type header".into()))
}

/// Read `count` curves laid out back to back at `offset`, each a complete
/// curv/para element aligned to 4 bytes
fn parse_curve_set(data: &[u8], offset: usize, count: usize) -> Result<Vec<StageCurve>> {
    let mut curves = Vec::with_capacity(count);
    let mut pos = offset;

    for i in 0..count {
        if pos + 8 > data.len() {
            return Err(ProfileError::MalformedVariant(format!(
                "staged LUT curve set: element {i} header beyond {} bytes",
                data.len()
            )));
        }

        let type_sig = be_u32(data, pos);
        pos += 8; // type + reserved

        match &type_sig.to_be_bytes() {
            b"curv" => {
                if pos + 4 > data.len() {
                    return Err(ProfileError::MalformedVariant(
                        "staged LUT curve set: curv count truncated".into(),
                    ));
                }
                let entries = be_u32(data, pos) as usize;
                pos += 4;

                let curve = match entries {
                    0 => StageCurve::Identity,
                    1 => {
                        if pos + 2 > data.len() {
                            return Err(ProfileError::MalformedVariant(
                                "staged LUT curve set: curv gamma truncated".into(),
                            ));
                        }
                        let gamma = U8Fixed8::from_be_bytes([data[pos], data[pos + 1]]).to_f64();
                        pos += 2;
                        StageCurve::Gamma(gamma)
                    }
                    _ => {
                        let bytes = entries.checked_mul(2).ok_or_else(|| {
                            ProfileError::MalformedVariant(
                                "staged LUT curve set: curv size overflow".into(),
                            )
                        })?;
                        if pos + bytes > data.len() {
                            return Err(ProfileError::MalformedVariant(format!(
                                "staged LUT curve set: curv table of {entries} entries truncated"
                            )));
                        }
                        let mut table = Vec::with_capacity(entries);
                        for j in 0..entries {
                            table.push(normalized_u16(be_u16(data, pos + j * 2)));
                        }
                        pos += bytes;
                        StageCurve::Table(table)
                    }
                };
                curves.push(curve);
            }
            b"para" => {
                if pos + 4 > data.len() {
                    return Err(ProfileError::MalformedVariant(
                        "staged LUT curve set: para header truncated".into(),
                    ));
                }
                let function_type = be_u16(data, pos);
                pos += 4; // function type + reserved

                let kind = CurveFormulaKind::from_wire(function_type).ok_or_else(|| {
                    ProfileError::MalformedVariant(format!(
                        "staged LUT curve set: unknown para function type {function_type}"
                    ))
                })?;

                let param_count = kind.param_count();
                if pos + param_count * 4 > data.len() {
                    return Err(ProfileError::MalformedVariant(
                        "staged LUT curve set: para parameters truncated".into(),
                    ));
                }

                let mut params = Vec::with_capacity(param_count);
                for j in 0..param_count {
                    params.push(S15Fixed16::from_slice(&data[pos + j * 4..])?.to_f64());
                }
                pos += param_count * 4;

                let formula = CurveFormula::from_params(kind, &params).ok_or_else(|| {
                    ProfileError::MalformedVariant(
                        "staged LUT curve set: para parameter list too short".into(),
                    )
                })?;
                curves.push(StageCurve::Formula(formula));
            }
            _ => {
                return Err(ProfileError::MalformedVariant(format!(
                    "staged LUT curve set: element {i} has unsupported type 0x{type_sig:08X}"
                )));
            }
        }

        // Elements are aligned to 4-byte boundaries
        pos = (pos + 3) & !3;
    }

    Ok(curves)
}

/// Read a row-major 3x3 s15Fixed16 matrix at `offset`
fn read_3x3_matrix(data: &[u8], offset: usize) -> [[f64; 3]; 3] {
    let mut matrix = [[0.0f64; 3]; 3];
    for row in 0..3 {
        for col in 0..3 {
            let at = offset + (row * 3 + col) * 4;
            matrix[row][col] =
                S15Fixed16::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
                    .to_f64();
        }
    }
    matrix
}

/// Read `count` big-endian u16 values from an exactly-sized run
fn read_u16_run(raw: &[u8], count: usize) -> Vec<u16> {
    (0..count).map(|i| be_u16(raw, i * 2)).collect()
}

/// Count CLUT entries, guarding against overflow from hostile headers
fn clut_entry_count(grid_points: u8, input_channels: u8, output_channels: u8) -> Result<usize> {
    let mut entries = output_channels as usize;
    for _ in 0..input_channels {
        entries = entries.checked_mul(grid_points as usize).ok_or_else(|| {
            ProfileError::MalformedVariant("LUT: CLUT size overflow".into())
        })?;
    }
    Ok(entries)
}

/// Advance `cursor` by `len`, returning the consumed window
fn take<'a>(data: &'a [u8], cursor: &mut usize, len: usize, what: &str) -> Result<&'a [u8]> {
    let end = cursor.checked_add(len).ok_or_else(|| {
        ProfileError::MalformedVariant(format!("{what}: extent overflow"))
    })?;
    if end > data.len() {
        return Err(ProfileError::MalformedVariant(format!(
            "{what}: needs {len} bytes at {cursor}, only {} present",
            data.len().saturating_sub(*cursor)
        )));
    }
    let slice = &data[*cursor..end];
    *cursor = end;
    Ok(slice)
}
