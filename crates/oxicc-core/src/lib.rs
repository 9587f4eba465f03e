//! # oxicc - ICC Profile Decoder
//!
//! A decoder for ICC color profiles: reads the raw `.icc`/`.icm` binary
//! container and produces a structured, queryable [`Profile`] - a parsed
//! header, a validated dictionary of typed tags, and derived colorimetric
//! quantities (white point, black point, chromatic-adaptation matrix).
//!
//! ## Structure
//!
//! An ICC profile consists of:
//! 1. A 128-byte header
//! 2. A tag directory listing signature/offset/size triples
//! 3. Tag data, each payload typed by a 4-byte type signature
//!
//! Decoding is a single synchronous pass over the in-memory buffer. A
//! completed `Profile` is immutable and safe to read from any number of
//! threads. This crate does not write profiles and does not execute the
//! color transforms the tags describe.
//!
//! ## Quick Start
//!
//! ```no_run
//! use oxicc_core::Profile;
//!
//! let bytes = std::fs::read("display.icc")?;
//! let profile = Profile::parse(&bytes, Some("display.icc"))?;
//!
//! println!("white point: {:?}", profile.white_point());
//! println!("adaptation:  {:?}", profile.chromatic_adaptation());
//! for sig in profile.tags() {
//!     println!("  {sig}: {}", profile.find(sig).unwrap().describe());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Malformed tags never abort the parse: the offending entry is reported
//! through the `log` facade and omitted, so a missing tag and a rejected
//! tag look the same through [`Profile::find`] / [`Profile::has_tag`].

pub mod cache;
pub mod color;
pub mod error;
pub mod header;
pub mod math;
pub mod profile;
pub mod tags;
pub mod types;

pub use cache::ProfileCache;
pub use color::Xyz;
pub use error::{ProfileError, Result};
pub use header::{ColorSpace, ProfileClass, ProfileHeader, ProfileVersion, RenderingIntent};
pub use math::Matrix3x3;
pub use profile::Profile;
pub use tags::Tag;
pub use types::{TagSignature, TypeSignature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
