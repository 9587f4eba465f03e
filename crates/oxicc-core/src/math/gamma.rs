//! Parametric transfer-function evaluation
//!
//! ICC parametric curve tags (`para`) describe a tone curve by one of five
//! piecewise formulas. The decoder evaluates the matching formula to derive
//! a sampled curve at parse time; nothing here touches pixel data.

/// The five parametric formula types of ICC.1 clause 10.18
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveFormulaKind {
    /// Type 0: Y = X^g
    Gamma,
    /// Type 1: Y = (aX + b)^g  if X >= -b/a, else 0
    Cie122,
    /// Type 2: Y = (aX + b)^g + c  if X >= -b/a, else c
    Iec61966_3,
    /// Type 3: Y = (aX + b)^g  if X >= d, else cX (sRGB-shaped)
    Iec61966_2_1,
    /// Type 4: Y = (aX + b)^g + e  if X >= d, else cX + f
    Full,
}

impl CurveFormulaKind {
    /// Map the wire-encoded function type to a formula kind
    pub fn from_wire(function_type: u16) -> Option<Self> {
        match function_type {
            0 => Some(Self::Gamma),
            1 => Some(Self::Cie122),
            2 => Some(Self::Iec61966_3),
            3 => Some(Self::Iec61966_2_1),
            4 => Some(Self::Full),
            _ => None,
        }
    }

    /// Number of parameters the formula consumes
    pub fn param_count(&self) -> usize {
        match self {
            Self::Gamma => 1,
            Self::Cie122 => 3,
            Self::Iec61966_3 => 4,
            Self::Iec61966_2_1 => 5,
            Self::Full => 7,
        }
    }
}

/// A parametric tone-curve formula with its parameters
///
/// Parameters beyond those the kind consumes stay at their defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveFormula {
    /// Formula kind (wire types 0-4)
    pub kind: CurveFormulaKind,
    pub g: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl CurveFormula {
    /// A pure-gamma formula (type 0)
    pub fn gamma(g: f64) -> Self {
        Self {
            kind: CurveFormulaKind::Gamma,
            g,
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Build from a formula kind and its wire-order parameter list
    ///
    /// Returns `None` when fewer parameters are supplied than the kind
    /// consumes.
    pub fn from_params(kind: CurveFormulaKind, params: &[f64]) -> Option<Self> {
        if params.len() < kind.param_count() {
            return None;
        }

        let mut formula = Self::gamma(params[0]);
        formula.kind = kind;

        match kind {
            CurveFormulaKind::Gamma => {}
            CurveFormulaKind::Cie122 => {
                formula.a = params[1];
                formula.b = params[2];
            }
            CurveFormulaKind::Iec61966_3 => {
                formula.a = params[1];
                formula.b = params[2];
                formula.c = params[3];
            }
            CurveFormulaKind::Iec61966_2_1 => {
                formula.a = params[1];
                formula.b = params[2];
                formula.c = params[3];
                formula.d = params[4];
            }
            CurveFormulaKind::Full => {
                formula.a = params[1];
                formula.b = params[2];
                formula.c = params[3];
                formula.d = params[4];
                formula.e = params[5];
                formula.f = params[6];
            }
        }

        Some(formula)
    }

    /// Evaluate the formula at `x`, clamped to [0, 1]
    pub fn eval(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);

        match self.kind {
            CurveFormulaKind::Gamma => x.powf(self.g),
            CurveFormulaKind::Cie122 => {
                let threshold = if self.a.abs() > 1e-10 {
                    -self.b / self.a
                } else {
                    0.0
                };
                if x >= threshold {
                    (self.a * x + self.b).max(0.0).powf(self.g)
                } else {
                    0.0
                }
            }
            CurveFormulaKind::Iec61966_3 => {
                let threshold = if self.a.abs() > 1e-10 {
                    -self.b / self.a
                } else {
                    0.0
                };
                if x >= threshold {
                    (self.a * x + self.b).max(0.0).powf(self.g) + self.c
                } else {
                    self.c
                }
            }
            CurveFormulaKind::Iec61966_2_1 => {
                if x >= self.d {
                    (self.a * x + self.b).max(0.0).powf(self.g)
                } else {
                    self.c * x
                }
            }
            CurveFormulaKind::Full => {
                if x >= self.d {
                    (self.a * x + self.b).max(0.0).powf(self.g) + self.e
                } else {
                    self.c * x + self.f
                }
            }
        }
    }

    /// Sample the formula at `size` evenly spaced inputs over [0, 1]
    pub fn sample(&self, size: usize) -> Vec<f64> {
        debug_assert!(size >= 2);
        let mut samples = Vec::with_capacity(size);
        for i in 0..size {
            let x = i as f64 / (size - 1) as f64;
            samples.push(self.eval(x));
        }
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamma_eval() {
        let curve = CurveFormula::gamma(2.2);
        assert!((curve.eval(0.5) - 0.5_f64.powf(2.2)).abs() < 1e-12);
        assert!((curve.eval(1.0) - 1.0).abs() < 1e-12);
        assert!((curve.eval(0.0) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_srgb_shape() {
        // sRGB expressed as a type-3 formula
        let curve = CurveFormula::from_params(
            CurveFormulaKind::Iec61966_2_1,
            &[2.4, 1.0 / 1.055, 0.055 / 1.055, 1.0 / 12.92, 0.04045],
        )
        .unwrap();

        // Linear segment below the breakpoint
        assert!((curve.eval(0.02) - 0.02 / 12.92).abs() < 1e-9);
        // Power segment endpoints
        assert!((curve.eval(1.0) - 1.0).abs() < 1e-9);
        // sRGB mid-gray is darker than a straight 2.2 gamma
        let mid = curve.eval(0.5);
        assert!(mid > 0.21 && mid < 0.22, "mid-gray decode: {mid}");
    }

    #[test]
    fn test_from_params_rejects_short_lists() {
        assert!(CurveFormula::from_params(CurveFormulaKind::Full, &[2.2, 1.0]).is_none());
        assert!(CurveFormula::from_params(CurveFormulaKind::Gamma, &[2.2]).is_some());
    }

    #[test]
    fn test_sample_monotone_gamma() {
        let samples = CurveFormula::gamma(2.2).sample(64);
        assert_eq!(samples.len(), 64);
        assert!((samples[63] - 1.0).abs() < 1e-12);
        for pair in samples.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_param_count() {
        assert_eq!(CurveFormulaKind::Gamma.param_count(), 1);
        assert_eq!(CurveFormulaKind::Cie122.param_count(), 3);
        assert_eq!(CurveFormulaKind::Iec61966_3.param_count(), 4);
        assert_eq!(CurveFormulaKind::Iec61966_2_1.param_count(), 5);
        assert_eq!(CurveFormulaKind::Full.param_count(), 7);
    }
}
