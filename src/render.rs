// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! QR image rendering boundary.
//!
//! The encoder hands a finished payload to a [`QrRenderer`] unchanged. When
//! either encoding or rendering fails, [`render_instruction`] yields
//! [`QrCodeView::Placeholder`] so the caller shows a visibly marked stand-in
//! instead of a code a banking app could misread.

use crate::error::{ConfigError, RenderError};
use crate::instruction::PaymentInstruction;
use qrism::{ECLevel, QRBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// QR error-correction level.
///
/// Low is the default: IPS payloads are long and banking-app scanners read
/// the resulting denser symbols most reliably at this level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    #[default]
    Low,
    Medium,
    Quartile,
    High,
}

impl From<ErrorCorrection> for ECLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => ECLevel::L,
            ErrorCorrection::Medium => ECLevel::M,
            ErrorCorrection::Quartile => ECLevel::Q,
            ErrorCorrection::High => ECLevel::H,
        }
    }
}

/// RGB color written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const BLACK: Color = Color([0x00, 0x00, 0x00]);
    pub const WHITE: Color = Color([0xff, 0xff, 0xff]);
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_owned());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let mut rgb = [0u8; 3];
        for (i, channel) in rgb.iter_mut().enumerate() {
            *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Color(rgb))
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Image settings handed to the renderer with each payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Requested width and height in pixels.
    pub size: u32,
    pub foreground: Color,
    pub background: Color,
    pub error_correction: ErrorCorrection,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 200,
            foreground: Color::BLACK,
            background: Color::WHITE,
            error_correction: ErrorCorrection::Low,
        }
    }
}

/// Produces an image encoding exactly the given string.
pub trait QrRenderer {
    type Output;

    fn render(&self, payload: &str, options: &RenderOptions) -> Result<Self::Output, RenderError>;
}

/// Result of rendering a payment for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrCodeView<T> {
    Rendered(T),
    /// No valid code could be produced.
    Placeholder,
}

impl<T> QrCodeView<T> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, QrCodeView::Placeholder)
    }
}

/// Encodes `instruction` and renders the payload, falling back to a
/// placeholder on any failure.
pub fn render_instruction<R: QrRenderer>(
    renderer: &R,
    instruction: &PaymentInstruction,
    options: &RenderOptions,
) -> QrCodeView<R::Output> {
    let payload = match instruction.encode() {
        Ok(payload) => payload,
        Err(error) => {
            tracing::warn!(%error, "payment cannot be encoded, rendering placeholder");
            return QrCodeView::Placeholder;
        }
    };

    match renderer.render(payload.as_str(), options) {
        Ok(output) => QrCodeView::Rendered(output),
        Err(error) => {
            tracing::warn!(%error, "qr rendering failed, rendering placeholder");
            QrCodeView::Placeholder
        }
    }
}

/// Renders QR codes to a PNG file.
#[derive(Debug, Clone)]
pub struct PngRenderer {
    path: PathBuf,
}

impl PngRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QrRenderer for PngRenderer {
    type Output = PathBuf;

    fn render(&self, payload: &str, options: &RenderOptions) -> Result<PathBuf, RenderError> {
        let qr = QRBuilder::new(payload.as_bytes())
            .ec_level(options.error_correction.into())
            .build()
            .map_err(|e| RenderError::Qr(e.to_string()))?;

        // Largest whole-pixel module size that fits the requested size.
        let modules = qr.to_image(1).width().max(1);
        let mut image = qr.to_image((options.size / modules).max(1));

        for pixel in image.pixels_mut() {
            let dark = pixel.0[0] < 0x80;
            pixel.0 = if dark { options.foreground.0 } else { options.background.0 };
        }

        image
            .save(&self.path)
            .map_err(|e| RenderError::Io(e.to_string()))?;
        tracing::debug!(path = %self.path.display(), "wrote qr image");
        Ok(self.path.clone())
    }
}
