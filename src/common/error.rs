//! # Error Types
//!
//! [`StegError`] covers every failure mode of the codec, the envelope and the
//! service pipeline built on top of them. Binaries wrap it in `anyhow` at the
//! process boundary.

use thiserror::Error;

/// Convenience alias used across the library.
pub type Result<T> = std::result::Result<T, StegError>;

/// Errors that can occur while hiding or recovering a payload.
#[derive(Debug, Error)]
pub enum StegError {
    /// The frame does not fit in the carrier. Raised before any pixel is touched.
    #[error("image doesn't have enough capacity to store payload: need {required_bits} bits but only have {available_bits} bits available")]
    Capacity {
        required_bits: u64,
        available_bits: u64,
    },

    /// The embedded bitstream or the envelope is malformed or truncated.
    #[error("malformed payload: {0}")]
    Format(&'static str),

    /// Tag verification failed. Deliberately says nothing about which part was wrong.
    #[error("authentication failed (wrong password or corrupted data)")]
    Authentication,

    /// The carrier bytes are not a supported raster image.
    #[error("could not decode image")]
    Decode(#[source] image::ImageError),

    /// The modified carrier could not be written back out as PNG.
    #[error("could not encode image")]
    Encode(#[source] image::ImageError),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed")]
    Encryption,

    #[error("message cannot be blank")]
    EmptyMessage,

    #[error("password cannot be blank")]
    EmptyPassword,

    /// Extraction succeeded but carried an empty payload.
    #[error("no hidden message found")]
    NoHiddenMessage,

    #[error("image is {size} bytes, the limit is {limit} bytes")]
    ImageTooLarge { size: usize, limit: usize },
}

impl StegError {
    /// True for errors caused by the caller's input rather than by a primitive failing.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            StegError::Encode(_) | StegError::KeyDerivation(_) | StegError::Encryption
        )
    }
}
