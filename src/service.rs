//! # Steganography Service
//!
//! The request-level pipeline that sits between raw caller input and the codec /
//! envelope layers:
//!
//! ```text
//! encode: size check -> validate -> decode carrier -> [seal] -> embed -> PNG
//! decode: size check -> decode carrier -> extract -> [open] -> message
//! ```
//!
//! [`StegService`] is stateless apart from its limits, so one instance can serve
//! any number of concurrent callers.

use log::{debug, info, warn};

use crate::common::config::LimitsConfig;
use crate::common::error::{Result, StegError};
use crate::encryption::envelope;
use crate::processing::{self, frame, Carrier};

/// Capacity of one carrier, as reported by [`StegService::capacity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityReport {
    pub width: u32,
    pub height: u32,
    pub capacity_bits: u64,
    /// Longest message that fits without a password.
    pub max_plain_bytes: u64,
    /// Longest message that fits once sealed with a password.
    pub max_sealed_bytes: u64,
}

impl CapacityReport {
    pub fn for_carrier(carrier: &Carrier) -> Self {
        let max_plain_bytes = carrier.max_payload_len();
        Self {
            width: carrier.width(),
            height: carrier.height(),
            capacity_bits: carrier.capacity_bits(),
            max_plain_bytes,
            max_sealed_bytes: max_plain_bytes.saturating_sub(envelope::overhead() as u64),
        }
    }
}

/// Hides and recovers messages in caller-supplied image bytes.
///
/// # Examples
///
/// ```rust,ignore
/// let service = StegService::new(LimitsConfig::default());
/// let png = service.encode(&cover_bytes, b"meet at noon", Some("hunter2"))?;
/// let message = service.decode(&png, Some("hunter2"))?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct StegService {
    limits: LimitsConfig,
}

impl StegService {
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Hide `message` in the image, sealing it first when a password is given.
    ///
    /// # Arguments
    ///
    /// * `image_bytes` - Cover image in any format the `image` crate can decode
    /// * `message` - Bytes to hide; must not be empty
    /// * `password` - Seal the message with this password; must not be empty if given
    ///
    /// # Returns
    ///
    /// PNG bytes of the modified image.
    ///
    /// # Errors
    ///
    /// * [`StegError::ImageTooLarge`] - `image_bytes` exceeds `max_image_bytes`
    /// * [`StegError::EmptyMessage`] / [`StegError::EmptyPassword`] - blank input
    /// * [`StegError::Decode`] - the cover is not a readable image
    /// * [`StegError::Capacity`] - the (sealed) message does not fit
    pub fn encode(
        &self,
        image_bytes: &[u8],
        message: &[u8],
        password: Option<&str>,
    ) -> Result<Vec<u8>> {
        self.check_size(image_bytes)?;

        if message.is_empty() {
            warn!("⚠️  Rejected encode request with a blank message");
            return Err(StegError::EmptyMessage);
        }
        let password = validate_password(password)?;

        let mut carrier = Carrier::decode(image_bytes)?;
        info!(
            "📥 Encoding {} message bytes into {}x{} carrier ({} bits available)",
            message.len(),
            carrier.width(),
            carrier.height(),
            carrier.capacity_bits()
        );

        let payload = match password {
            Some(password) => envelope::seal(message, password)?,
            None => message.to_vec(),
        };

        processing::embed(&mut carrier, &payload)?;
        let png = carrier.to_png()?;

        info!(
            "✅ Embedded {} payload bytes{}, output {} bytes",
            payload.len(),
            if password.is_some() { " (sealed)" } else { "" },
            png.len()
        );
        Ok(png)
    }

    /// Recover the message hidden in the image, opening it when a password is given.
    ///
    /// # Errors
    ///
    /// * [`StegError::Format`] - no readable frame in the image
    /// * [`StegError::Authentication`] - wrong password or damaged payload
    /// * [`StegError::NoHiddenMessage`] - the image holds an empty payload
    pub fn decode(&self, image_bytes: &[u8], password: Option<&str>) -> Result<Vec<u8>> {
        self.check_size(image_bytes)?;
        let password = validate_password(password)?;

        let carrier = Carrier::decode(image_bytes)?;
        let payload = processing::extract(&carrier)?;
        debug!("extracted {} payload bytes", payload.len());

        let message = match password {
            Some(password) => envelope::open(&payload, password)?,
            None => payload,
        };

        if message.is_empty() {
            warn!("⚠️  No hidden message found");
            return Err(StegError::NoHiddenMessage);
        }

        info!("✅ Recovered {} message bytes", message.len());
        Ok(message)
    }

    /// Decode `png` again and check that it yields `expected`.
    pub fn verify(&self, png: &[u8], expected: &[u8], password: Option<&str>) -> Result<bool> {
        let recovered = self.decode(png, password)?;
        Ok(recovered == expected)
    }

    pub fn capacity(&self, image_bytes: &[u8]) -> Result<CapacityReport> {
        self.check_size(image_bytes)?;
        let carrier = Carrier::decode(image_bytes)?;
        Ok(CapacityReport::for_carrier(&carrier))
    }

    fn check_size(&self, image_bytes: &[u8]) -> Result<()> {
        let limit = self.limits.max_image_bytes;
        if image_bytes.len() > limit {
            warn!(
                "⚠️  Rejected {} byte image (limit {} bytes)",
                image_bytes.len(),
                limit
            );
            return Err(StegError::ImageTooLarge {
                size: image_bytes.len(),
                limit,
            });
        }
        Ok(())
    }
}

fn validate_password(password: Option<&str>) -> Result<Option<&str>> {
    match password {
        Some("") => Err(StegError::EmptyPassword),
        other => Ok(other),
    }
}

/// Bits a message of `message_len` bytes needs, sealed or not.
pub fn required_bits(message_len: usize, sealed: bool) -> u64 {
    let payload_len = if sealed {
        message_len as u64 + envelope::overhead() as u64
    } else {
        message_len as u64
    };
    frame::required_bits_for(payload_len)
}
