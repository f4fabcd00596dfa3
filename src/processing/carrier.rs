//! # Carrier Images
//!
//! A [`Carrier`] is a decoded image normalized to RGBA8. Any format the `image`
//! crate can read is accepted on the way in; only PNG goes out, because a lossy
//! encoder would destroy the low bits that hold the payload.
//!
//! ## Channel order
//!
//! Payload bits live in the R, G and B channels, visited by
//! [`payload_channels`]:
//!
//! ```text
//! (0,0).R (0,0).G (0,0).B (1,0).R (1,0).G (1,0).B ... (w-1,0).B (0,1).R ...
//! ```
//!
//! Rows top to bottom, pixels left to right, channels R → G → B. Alpha is never
//! visited. Reordering this breaks every image embedded so far.

use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage};
use log::debug;

use crate::common::error::{Result, StegError};
use crate::processing::frame;

/// Channels per pixel that carry payload bits (R, G, B).
pub const PAYLOAD_CHANNELS: usize = 3;

/// Position of one payload-carrying channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSlot {
    pub x: u32,
    pub y: u32,
    /// 0 = red, 1 = green, 2 = blue
    pub channel: usize,
}

/// Every payload channel of a `width` × `height` image in embedding order.
pub fn payload_channels(width: u32, height: u32) -> impl Iterator<Item = ChannelSlot> {
    (0..height).flat_map(move |y| {
        (0..width).flat_map(move |x| {
            (0..PAYLOAD_CHANNELS).map(move |channel| ChannelSlot { x, y, channel })
        })
    })
}

/// An RGBA8 image that payloads are written into and read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    image: RgbaImage,
}

impl Carrier {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Normalize any decoded image to RGBA8.
    pub fn from_image(image: DynamicImage) -> Self {
        Self::new(image.into_rgba8())
    }

    /// Decode image bytes in any supported format (PNG, JPEG, GIF, BMP, ...).
    ///
    /// # Errors
    /// [`StegError::Decode`] with the decoder's error when the bytes are not a
    /// readable image.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let format = image::guess_format(bytes).ok();
        let image = image::load_from_memory(bytes).map_err(StegError::Decode)?;
        let (width, height) = image.dimensions();
        debug!(
            "decoded {:?} carrier {}x{} ({} bytes)",
            format,
            width,
            height,
            bytes.len()
        );
        Ok(Self::from_image(image))
    }

    /// Encode as PNG. Pixel values round-trip exactly.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut output_bytes = Vec::new();
        self.image
            .write_to(
                &mut std::io::Cursor::new(&mut output_bytes),
                ImageFormat::Png,
            )
            .map_err(StegError::Encode)?;
        Ok(output_bytes)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Number of bits the carrier can hold: one per R, G and B channel.
    pub fn capacity_bits(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height()) * PAYLOAD_CHANNELS as u64
    }

    /// Largest payload (in bytes) that still fits once the length prefix is added.
    pub fn max_payload_len(&self) -> u64 {
        frame::max_payload_for(self.capacity_bits())
    }

    /// Least significant bits of the payload channels, in embedding order.
    pub fn lsb_bits(&self) -> impl Iterator<Item = u8> + '_ {
        payload_channels(self.width(), self.height())
            .map(move |slot| self.image.get_pixel(slot.x, slot.y)[slot.channel] & 1)
    }

    /// Overwrite bit 0 of one channel, keeping its other seven bits.
    pub(crate) fn set_lsb(&mut self, slot: ChannelSlot, bit: u8) {
        let pixel = self.image.get_pixel_mut(slot.x, slot.y);
        pixel[slot.channel] = (pixel[slot.channel] & 0xFE) | (bit & 1);
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.image
    }
}

impl From<RgbaImage> for Carrier {
    fn from(image: RgbaImage) -> Self {
        Self::new(image)
    }
}

impl From<DynamicImage> for Carrier {
    fn from(image: DynamicImage) -> Self {
        Self::from_image(image)
    }
}
