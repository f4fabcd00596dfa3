//! # Response Bodies
//!
//! JSON documents printed by `stegsvc --json`. Field names follow the bodies the
//! original HTTP service returned, so existing front-ends can parse the output.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::service::CapacityReport;

/// Result of a successful `encode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeResponse {
    /// PNG bytes, standard base64 alphabet with padding
    pub image_base64: String,
    pub filename: String,
}

impl EncodeResponse {
    pub fn new(png: &[u8], filename: impl Into<String>) -> Self {
        Self {
            image_base64: general_purpose::STANDARD.encode(png),
            filename: filename.into(),
        }
    }
}

/// Result of a successful `decode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeResponse {
    pub message: String,
}

impl DecodeResponse {
    /// Non-UTF-8 payloads are rendered lossily; use `--output` for raw bytes.
    pub fn from_payload(payload: &[u8]) -> Self {
        Self {
            message: String::from_utf8_lossy(payload).into_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityResponse {
    pub width: u32,
    pub height: u32,
    pub capacity_bits: u64,
    pub max_plain_bytes: u64,
    pub max_sealed_bytes: u64,
}

impl From<CapacityReport> for CapacityResponse {
    fn from(report: CapacityReport) -> Self {
        Self {
            width: report.width,
            height: report.height,
            capacity_bits: report.capacity_bits,
            max_plain_bytes: report.max_plain_bytes,
            max_sealed_bytes: report.max_sealed_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}
