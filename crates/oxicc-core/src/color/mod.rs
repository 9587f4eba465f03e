//! Colorimetric value types used by the decoder's derived queries

pub mod white_point;
pub mod xyz;

pub use white_point::{D50, D65, WhitePoint};
pub use xyz::Xyz;
