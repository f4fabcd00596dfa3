//! # Image Processing and Steganography
//!
//! The codec: frames a payload, writes it into the low bits of a [`Carrier`], and
//! reads it back.

pub mod bits;
pub mod carrier;
pub mod frame;
pub mod steganography;

// Re-export main functions for convenience
pub use carrier::{payload_channels, Carrier, ChannelSlot};
pub use frame::StegFrame;
pub use steganography::{embed, embed_bytes, embed_frame, extract, extract_bytes, extract_frame};
