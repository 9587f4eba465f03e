//! Math support for the decoder's derived queries
//!
//! - 3x3 matrix operations for the chromatic-adaptation query
//! - Parametric transfer-function evaluation for sampled curve derivation
//! - White-point adaptation matrix construction

pub mod adaptation;
pub mod gamma;
pub mod matrix;

pub use adaptation::adaptation_matrix;
pub use gamma::{CurveFormula, CurveFormulaKind};
pub use matrix::Matrix3x3;
