//! Shared fixtures for the oxicc integration suites
//!
//! Everything here builds synthetic profile bytes; nothing reads files.

pub mod builder;

pub use builder::{payload, ProfileBuilder};
