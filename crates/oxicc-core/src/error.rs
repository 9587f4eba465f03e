//! Error types for profile decoding

use thiserror::Error;

use crate::types::{TagSignature, TypeSignature};

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, ProfileError>;

/// Errors that can occur while decoding an ICC profile
///
/// Header- and directory-level errors abort the whole parse. Per-tag errors
/// (`TypeMismatch`, `MalformedVariant`, a single entry's `TagOutOfBounds`)
/// are recovered by omitting the offending tag; they still surface here so
/// the condition can be reported before the tag is dropped.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProfileError {
    /// Buffer shorter than a structurally required field
    #[error("truncated data: needed {expected} bytes, had {actual}")]
    Truncated { expected: usize, actual: usize },

    /// Header magic-number field does not match 'acsp'
    #[error("invalid profile signature 0x{0:08X} (expected 'acsp')")]
    BadMagic(u32),

    /// Directory entry's offset + size exceeds the profile buffer
    #[error("tag '{tag}' out of bounds: offset {offset} + size {size} > profile size {profile_size}")]
    TagOutOfBounds {
        tag: TagSignature,
        offset: u32,
        size: u32,
        profile_size: usize,
    },

    /// Tag signature carries a type signature not permitted for it
    #[error("tag '{tag}' carries type '{type_sig}' which is not permitted for it")]
    TypeMismatch {
        tag: TagSignature,
        type_sig: TypeSignature,
    },

    /// A variant's internal declared length is inconsistent with its bytes
    #[error("malformed {0}")]
    MalformedVariant(String),

    /// I/O failure while loading a profile file (cache path only)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
