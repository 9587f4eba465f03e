//! Tone-curve tags
//!
//! Two encodings exist: `curv` (a sample table, or a lone u8Fixed8 gamma
//! when exactly one entry is present) and `para` (one of five piecewise
//! formulas, from which a 64-point sampled curve is derived at parse time).

use crate::error::{ProfileError, Result};
use crate::math::gamma::{CurveFormula, CurveFormulaKind};
use crate::types::{be_u16, be_u32, normalized_u16, S15Fixed16, U8Fixed8};

/// Number of derived samples for a parametric curve
pub const PARAMETRIC_SAMPLES: usize = 64;

/// Decoded curveType payload
#[derive(Debug, Clone, PartialEq)]
pub enum CurveTag {
    /// Zero entries: the identity curve
    Identity,
    /// Exactly one entry: a u8Fixed8 gamma exponent
    Gamma(f64),
    /// Two or more entries: a sampled table of uInt16 values
    Table(Vec<u16>),
}

impl CurveTag {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(ProfileError::MalformedVariant(
                "curve tag: missing entry count".into(),
            ));
        }

        let count = be_u32(data, 0) as usize;
        match count {
            0 => Ok(Self::Identity),
            1 => {
                let gamma = U8Fixed8::from_slice(&data[4..]).map_err(|_| {
                    ProfileError::MalformedVariant("curve tag: gamma value missing".into())
                })?;
                Ok(Self::Gamma(gamma.to_f64()))
            }
            _ => {
                let required = 4 + count * 2;
                if data.len() < required {
                    return Err(ProfileError::MalformedVariant(format!(
                        "curve tag: {count} entries need {required} bytes, have {}",
                        data.len()
                    )));
                }
                let mut table = Vec::with_capacity(count);
                for i in 0..count {
                    table.push(be_u16(data, 4 + i * 2));
                }
                Ok(Self::Table(table))
            }
        }
    }

    /// Evaluate the curve at `x` in [0, 1]
    pub fn eval(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        match self {
            Self::Identity => x,
            Self::Gamma(g) => x.powf(*g),
            Self::Table(table) => match table.len() {
                0 => x,
                1 => normalized_u16(table[0]),
                len => {
                    let pos = x * (len - 1) as f64;
                    let idx = (pos.floor() as usize).min(len - 2);
                    let frac = pos - idx as f64;
                    let v0 = table[idx] as f64;
                    let v1 = table[idx + 1] as f64;
                    (v0 + frac * (v1 - v0)) / 65535.0
                }
            },
        }
    }

    /// Whether the curve is (approximately) the identity
    pub fn is_linear(&self) -> bool {
        match self {
            Self::Identity => true,
            Self::Gamma(g) => (*g - 1.0).abs() < 1e-6,
            Self::Table(table) => {
                if table.len() < 2 {
                    return false;
                }
                table.iter().enumerate().all(|(i, &v)| {
                    let expected = (i as f64 / (table.len() - 1) as f64 * 65535.0) as u16;
                    (v as i32 - expected as i32).abs() <= 1
                })
            }
        }
    }
}

/// Decoded parametricCurveType payload
#[derive(Debug, Clone, PartialEq)]
pub struct ParametricCurveTag {
    /// The decoded formula and its parameters
    pub formula: CurveFormula,
    /// 64 samples of the formula over [0, 1], derived at parse time
    pub samples: Vec<f64>,
}

impl ParametricCurveTag {
    /// Parse from the bytes following the type header
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(ProfileError::MalformedVariant(
                "parametric curve: missing function type".into(),
            ));
        }

        let function_type = be_u16(data, 0);
        // bytes 2-3 reserved
        let kind = CurveFormulaKind::from_wire(function_type).ok_or_else(|| {
            ProfileError::MalformedVariant(format!(
                "parametric curve: unknown function type {function_type}"
            ))
        })?;

        let param_count = kind.param_count();
        let required = 4 + param_count * S15Fixed16::WIDTH;
        if data.len() < required {
            return Err(ProfileError::MalformedVariant(format!(
                "parametric curve: type {function_type} needs {required} bytes, have {}",
                data.len()
            )));
        }

        let mut params = Vec::with_capacity(param_count);
        for i in 0..param_count {
            params.push(S15Fixed16::from_slice(&data[4 + i * 4..])?.to_f64());
        }

        // from_params cannot fail here: params.len() == param_count
        let formula = CurveFormula::from_params(kind, &params).ok_or_else(|| {
            ProfileError::MalformedVariant("parametric curve: parameter list too short".into())
        })?;

        Ok(Self {
            samples: formula.sample(PARAMETRIC_SAMPLES),
            formula,
        })
    }

    /// Evaluate the formula directly (not the sampled approximation)
    pub fn eval(&self, x: f64) -> f64 {
        self.formula.eval(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_curve() {
        let curve = CurveTag::parse(&[0, 0, 0, 0]).unwrap();
        assert_eq!(curve, CurveTag::Identity);
        assert!(curve.is_linear());
        assert!((curve.eval(0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_gamma_curve() {
        // count = 1, gamma = 0x0233 / 256 ≈ 2.199
        let curve = CurveTag::parse(&[0, 0, 0, 1, 0x02, 0x33]).unwrap();
        match curve {
            CurveTag::Gamma(g) => assert!((g - 2.199).abs() < 0.01),
            other => panic!("expected gamma, got {other:?}"),
        }
    }

    #[test]
    fn test_table_curve() {
        let data = [
            0, 0, 0, 3, // count = 3
            0x00, 0x00, 0x80, 0x00, 0xFF, 0xFF,
        ];
        let curve = CurveTag::parse(&data).unwrap();
        match &curve {
            CurveTag::Table(t) => assert_eq!(t, &vec![0, 0x8000, 0xFFFF]),
            other => panic!("expected table, got {other:?}"),
        }
        assert!((curve.eval(0.5) - 0.5).abs() < 0.001);
        assert!((curve.eval(1.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_table_overrun_fails() {
        // Declares 1000 entries with 6 bytes of table
        let data = [0, 0, 0x03, 0xE8, 0, 0, 0, 0, 0, 0];
        assert!(CurveTag::parse(&data).is_err());
    }

    #[test]
    fn test_parametric_gamma_22() {
        // Type 0, g = 2.2 (0x00023333)
        let mut data = vec![0, 0, 0, 0];
        data.extend_from_slice(&[0x00, 0x02, 0x33, 0x33]);
        let tag = ParametricCurveTag::parse(&data).unwrap();

        assert_eq!(tag.formula.kind, CurveFormulaKind::Gamma);
        assert!((tag.formula.g - 2.2).abs() < 0.001);
        assert_eq!(tag.samples.len(), PARAMETRIC_SAMPLES);
        // Endpoint and monotonicity, per the formula's shape
        assert!((tag.samples[PARAMETRIC_SAMPLES - 1] - 1.0).abs() < 1e-9);
        assert!(tag.samples.windows(2).all(|p| p[1] >= p[0]));
    }

    #[test]
    fn test_parametric_missing_params() {
        // Type 4 needs 7 params; provide one
        let mut data = vec![0, 4, 0, 0];
        data.extend_from_slice(&[0x00, 0x02, 0x33, 0x33]);
        assert!(ParametricCurveTag::parse(&data).is_err());
    }

    #[test]
    fn test_parametric_unknown_type() {
        let data = [0, 9, 0, 0, 0, 0, 0, 0];
        assert!(ParametricCurveTag::parse(&data).is_err());
    }
}
