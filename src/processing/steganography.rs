//! # LSB Steganography Implementation
//!
//! Hides a byte payload in the least significant bit of each R, G and B channel of
//! a [`Carrier`].
//!
//! ## Algorithm
//!
//! ### Encoding Process
//! 1. Wrap the payload in a [`StegFrame`] (8-byte big-endian length + payload)
//! 2. Refuse the frame if it needs more bits than the carrier has, before touching
//!    any pixel
//! 3. Walk the payload channels in [`payload_channels`] order and replace bit 0 of
//!    each with the next frame bit, MSB first
//! 4. Stop after the last frame bit; every later channel is left as it was
//!
//! ### Decoding Process
//! 1. Read the first 64 channel LSBs as the big-endian length `N`
//! 2. Refuse `N` if `N * 8` is more than the bits that remain
//! 3. Pack the next `N * 8` LSBs into bytes
//!
//! ### Capacity
//! A carrier holds `width * height * 3` bits, of which 64 go to the length prefix.
//! Example: an 800x600 image can hold 179,992 payload bytes.
//!
//! The codec knows nothing about what the payload means. On a carrier that never had
//! anything embedded, extraction returns whatever the low bits happen to spell;
//! authenticity has to come from a layer above (see [`crate::encryption`]).
//!
//! [`payload_channels`]: crate::processing::carrier::payload_channels

use log::debug;

use crate::common::error::{Result, StegError};
use crate::processing::bits::{msb_bits, pack_msb};
use crate::processing::carrier::{payload_channels, Carrier};
use crate::processing::frame::{StegFrame, LENGTH_PREFIX_BITS, LENGTH_PREFIX_LEN};

/// Embed `payload` into `carrier`.
///
/// # Errors
/// [`StegError::Capacity`] if the framed payload needs more bits than the carrier
/// has. The carrier is unchanged in that case.
///
/// # Example
/// ```
/// use image::RgbaImage;
/// use stegsvc::processing::{embed, extract, Carrier};
///
/// let mut carrier = Carrier::new(RgbaImage::new(10, 10));
/// embed(&mut carrier, b"hi!")?;
/// assert_eq!(extract(&carrier)?, b"hi!");
/// # Ok::<(), stegsvc::StegError>(())
/// ```
pub fn embed(carrier: &mut Carrier, payload: &[u8]) -> Result<()> {
    embed_frame(carrier, &StegFrame::new(payload))
}

/// Embed an already-built frame. See [`embed`].
pub fn embed_frame(carrier: &mut Carrier, frame: &StegFrame) -> Result<()> {
    let required_bits = frame.required_bits();
    let available_bits = carrier.capacity_bits();

    if required_bits > available_bits {
        return Err(StegError::Capacity {
            required_bits,
            available_bits,
        });
    }

    let slots = payload_channels(carrier.width(), carrier.height());
    let mut written = 0u64;
    for (slot, bit) in slots.zip(msb_bits(frame.bytes())) {
        carrier.set_lsb(slot, bit);
        written += 1;
    }

    debug!(
        "embedded {} payload bytes in {} of {} channels",
        frame.declared_len(),
        written,
        available_bits
    );
    Ok(())
}

/// Recover the payload from `carrier`.
///
/// # Errors
/// - [`StegError::Format`] `"too small"` if the carrier has fewer than 64 bits
/// - [`StegError::Format`] `"length exceeds capacity"` if the embedded length
///   points past the end of the carrier
pub fn extract(carrier: &Carrier) -> Result<Vec<u8>> {
    extract_frame(carrier).map(StegFrame::into_payload)
}

/// Recover the whole frame from `carrier`. See [`extract`].
pub fn extract_frame(carrier: &Carrier) -> Result<StegFrame> {
    let available_bits = carrier.capacity_bits();
    if available_bits < LENGTH_PREFIX_BITS {
        return Err(StegError::Format("too small"));
    }

    let mut bits = carrier.lsb_bits();

    let mut prefix = [0u8; LENGTH_PREFIX_LEN];
    pack_msb(&mut bits, &mut prefix);
    let declared_len = u64::from_be_bytes(prefix);

    let remaining_bits = available_bits - LENGTH_PREFIX_BITS;
    let payload_len = declared_len
        .checked_mul(8)
        .filter(|&needed| needed <= remaining_bits)
        .map(|_| declared_len as usize)
        .ok_or(StegError::Format("length exceeds capacity"))?;

    let mut payload = vec![0u8; payload_len];
    let filled = pack_msb(&mut bits, &mut payload);
    if filled != payload_len {
        return Err(StegError::Format("length exceeds capacity"));
    }

    debug!("extracted {} payload bytes", payload_len);
    StegFrame::from_parts(declared_len, payload)
}

/// Decode `image_bytes`, embed `payload`, and return the result as PNG.
///
/// # Arguments
/// - `image_bytes`: Raw bytes of the cover image (any format supported by `image` crate)
/// - `payload`: Bytes to hide
///
/// # Returns
/// - `Ok(Vec<u8>)`: PNG image bytes with the payload embedded
/// - `Err`: [`StegError::Decode`], [`StegError::Capacity`] or [`StegError::Encode`]
pub fn embed_bytes(image_bytes: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
    let mut carrier = Carrier::decode(image_bytes)?;
    embed(&mut carrier, payload)?;
    carrier.to_png()
}

/// Decode `image_bytes` and extract the embedded payload.
pub fn extract_bytes(image_bytes: &[u8]) -> Result<Vec<u8>> {
    let carrier = Carrier::decode(image_bytes)?;
    extract(&carrier)
}
