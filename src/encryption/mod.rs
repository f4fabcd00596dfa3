//! # Payload Encryption
//!
//! The envelope layer: seals a plaintext under a password before it is embedded,
//! and opens it after extraction. It is the only thing that can tell a real payload
//! from noise in the low bits of an image.

pub mod envelope;

pub use envelope::{derive_key, open, overhead, seal, SealedEnvelope};
