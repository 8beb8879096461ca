//! QR code rendering for version strings
//!
//! Cycles carry QR codes for the homolog and alpha builds. They are rendered
//! as SVG and stored inline as `data:` URLs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use qrcode::QrCode;
use qrcode::render::svg;

use crate::error::{RegressivoError, Result};

const SVG_DATA_URL_PREFIX: &str = "data:image/svg+xml;base64,";

/// Turns text into an inline image reference
pub trait QrEncoder: Send + Sync {
    /// Encode `text`; empty text yields an empty string
    fn encode(&self, text: &str) -> Result<String>;
}

/// SVG renderer producing base64 `data:` URLs
#[derive(Debug, Clone, Copy)]
pub struct SvgQrEncoder {
    min_dimension: u32,
}

impl SvgQrEncoder {
    pub fn new(min_dimension: u32) -> Self {
        Self { min_dimension }
    }
}

impl Default for SvgQrEncoder {
    fn default() -> Self {
        Self::new(200)
    }
}

impl QrEncoder for SvgQrEncoder {
    fn encode(&self, text: &str) -> Result<String> {
        if text.is_empty() {
            return Ok(String::new());
        }
        let code = QrCode::new(text.as_bytes()).map_err(|e| RegressivoError::QrCode(e.to_string()))?;
        let image = code
            .render::<svg::Color>()
            .min_dimensions(self.min_dimension, self.min_dimension)
            .build();
        Ok(format!("{}{}", SVG_DATA_URL_PREFIX, STANDARD.encode(image)))
    }
}
