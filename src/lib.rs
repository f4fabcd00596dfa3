//! # stegsvc
//!
//! Hides byte payloads in the least significant bits of raster images, optionally
//! sealed under a password first.
//!
//! - [`processing`]: the LSB codec (frame format, carrier traversal, embed/extract)
//! - [`encryption`]: the password envelope (scrypt + AES-256-GCM)
//! - [`service`]: the request pipeline combining both, with input limits
//! - [`common`]: errors, configuration, logging and JSON response bodies
//!
//! ```
//! use image::RgbaImage;
//! use stegsvc::{encryption, processing::{self, Carrier}};
//!
//! let mut carrier = Carrier::new(RgbaImage::new(32, 32));
//! let sealed = encryption::seal(b"meet at noon", "hunter2")?;
//! processing::embed(&mut carrier, &sealed)?;
//!
//! let extracted = processing::extract(&carrier)?;
//! assert_eq!(encryption::open(&extracted, "hunter2")?, b"meet at noon");
//! # Ok::<(), stegsvc::StegError>(())
//! ```

pub mod common;
pub mod encryption;
pub mod processing;
pub mod service;

pub use common::error::{Result, StegError};
pub use processing::{Carrier, StegFrame};
pub use service::{CapacityReport, StegService};
