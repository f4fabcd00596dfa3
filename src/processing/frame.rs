//! # StegFrame
//!
//! The byte layout actually written into a carrier:
//!
//! ```text
//! [8 bytes ] payload length N, unsigned big-endian
//! [N bytes ] payload
//! ```
//!
//! A frame is always built from its payload, so the length field cannot disagree
//! with the bytes that follow it.

use crate::common::error::{Result, StegError};

/// Size of the length prefix in bytes.
pub const LENGTH_PREFIX_LEN: usize = 8;

/// Size of the length prefix in bits; the smallest carrier that can be read from.
pub const LENGTH_PREFIX_BITS: u64 = LENGTH_PREFIX_LEN as u64 * 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StegFrame {
    payload: Vec<u8>,
}

impl StegFrame {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Rebuild a frame from a declared length and the bytes read after it.
    ///
    /// # Errors
    /// [`StegError::Format`] if `declared_len` does not match `payload.len()`.
    pub fn from_parts(declared_len: u64, payload: Vec<u8>) -> Result<Self> {
        if declared_len != payload.len() as u64 {
            return Err(StegError::Format("length does not match payload"));
        }
        Ok(Self { payload })
    }

    /// The value stored in the length field.
    pub fn declared_len(&self) -> u64 {
        self.payload.len() as u64
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Serialized size: prefix plus payload.
    pub fn encoded_len(&self) -> usize {
        LENGTH_PREFIX_LEN + self.payload.len()
    }

    /// Number of carrier channels needed to hold this frame.
    pub fn required_bits(&self) -> u64 {
        (self.encoded_len() as u64).saturating_mul(8)
    }

    /// Serialized bytes, prefix first, without building an intermediate buffer.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.declared_len()
            .to_be_bytes()
            .into_iter()
            .chain(self.payload.iter().copied())
    }
}

/// Bits needed to frame a payload of `payload_len` bytes.
pub fn required_bits_for(payload_len: u64) -> u64 {
    payload_len
        .saturating_add(LENGTH_PREFIX_LEN as u64)
        .saturating_mul(8)
}

/// Largest payload whose frame fits in `capacity_bits`.
pub fn max_payload_for(capacity_bits: u64) -> u64 {
    (capacity_bits / 8).saturating_sub(LENGTH_PREFIX_LEN as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_big_endian_prefix_then_payload() {
        let frame = StegFrame::new(b"hi!".to_vec());
        assert_eq!(
            frame.bytes().collect::<Vec<_>>(),
            vec![0, 0, 0, 0, 0, 0, 0, 3, b'h', b'i', b'!']
        );
        assert_eq!(frame.encoded_len(), 11);
        assert_eq!(frame.required_bits(), 88);
    }

    #[test]
    fn test_empty_payload_is_just_the_prefix() {
        let frame = StegFrame::new(Vec::new());
        assert_eq!(frame.bytes().collect::<Vec<_>>(), vec![0u8; 8]);
        assert_eq!(frame.required_bits(), LENGTH_PREFIX_BITS);
    }

    #[test]
    fn test_from_parts_enforces_length() {
        assert!(StegFrame::from_parts(2, vec![1, 2]).is_ok());
        assert!(matches!(
            StegFrame::from_parts(3, vec![1, 2]),
            Err(StegError::Format(_))
        ));
    }

    #[test]
    fn test_capacity_helpers() {
        assert_eq!(required_bits_for(3), 88);
        assert_eq!(required_bits_for(40), 384);
        assert_eq!(max_payload_for(300), 29);
        assert_eq!(max_payload_for(63), 0);
        assert_eq!(required_bits_for(u64::MAX), u64::MAX);
    }
}
