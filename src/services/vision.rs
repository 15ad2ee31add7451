//! Vision service: simulated quality inspection.
//!
//! DESIGN
//! ======
//! No model runs here. The verdict is either forced by the visitor or a coin
//! flip, and the "detection" is a rectangle drawn on a copy of the upload:
//! a red box over the central fifth for a defect, a green frame around the
//! whole image for a pass. Both images are returned as PNG data URLs so the
//! page can show them without storing anything.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use rand::Rng;

const DEFECT_COLOR: Rgba<u8> = Rgba([0xff, 0x00, 0x00, 0xff]);
const PASS_COLOR: Rgba<u8> = Rgba([0x00, 0xff, 0x00, 0xff]);
const DEFECT_STROKE: u32 = 8;
const PASS_STROKE: u32 = 15;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("no se recibió ninguna imagen")]
    MissingImage,
    #[error("la imagen supera el límite de {limit} bytes")]
    TooLarge { limit: usize },
    #[error("formato de imagen no soportado (usa JPG o PNG)")]
    UnsupportedFormat,
    #[error("no se pudo decodificar la imagen: {0}")]
    Decode(String),
    #[error("no se pudo codificar el resultado: {0}")]
    Encode(String),
    #[error("no se pudo leer la imagen enviada: {0}")]
    Upload(String),
}

impl crate::error::ErrorCode for VisionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingImage => "E_VISION_MISSING_IMAGE",
            Self::TooLarge { .. } => "E_VISION_TOO_LARGE",
            Self::UnsupportedFormat => "E_VISION_UNSUPPORTED_FORMAT",
            Self::Decode(_) => "E_VISION_DECODE",
            Self::Encode(_) => "E_VISION_ENCODE",
            Self::Upload(_) => "E_VISION_UPLOAD",
        }
    }
}

/// Outcome selector on the demo controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InspectionMode {
    #[default]
    Random,
    ForceDefect,
    ForcePass,
}

impl InspectionMode {
    pub const ALL: [Self; 3] = [Self::Random, Self::ForceDefect, Self::ForcePass];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::ForceDefect => "defect",
            Self::ForcePass => "pass",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "Aleatorio",
            Self::ForceDefect => "Forzar Defecto (Fallo)",
            Self::ForcePass => "Forzar Aprobado (OK)",
        }
    }

    /// Parse a form value. Unknown values fall back to [`InspectionMode::Random`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == raw.trim())
            .unwrap_or_default()
    }

    fn decide(self, rng: &mut impl Rng) -> Verdict {
        let has_defect = match self {
            Self::ForceDefect => true,
            Self::ForcePass => false,
            Self::Random => rng.random_bool(0.5),
        };
        if has_defect { Verdict::Defect } else { Verdict::Pass }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Defect,
    Pass,
}

impl Verdict {
    #[must_use]
    pub fn caption(self) -> &'static str {
        match self {
            Self::Defect => "Fallo Detectado [Confianza: 98.4%]",
            Self::Pass => "Análisis Completado [Confianza: 99.1%]",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Defect => "❌ ALERTA: Defecto crítico en zona central. Pieza rechazada.",
            Self::Pass => "✅ CALIDAD APROBADA. Pieza lista para envío.",
        }
    }
}

/// Result of one inspection run.
#[derive(Debug, Clone)]
pub struct InspectionReport {
    pub verdict: Verdict,
    pub width: u32,
    pub height: u32,
    pub original_data_url: String,
    pub annotated_data_url: String,
}

/// Inclusive pixel rectangle. Edges past the image are clipped when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

// =============================================================================
// INSPECTION
// =============================================================================

/// Decode `bytes`, pick a verdict and draw the matching annotation.
///
/// # Errors
///
/// Returns an error for empty, oversized, non-JPEG/PNG or corrupt uploads.
pub fn inspect(
    bytes: &[u8],
    max_bytes: usize,
    mode: InspectionMode,
    rng: &mut impl Rng,
) -> Result<InspectionReport, VisionError> {
    if bytes.is_empty() {
        return Err(VisionError::MissingImage);
    }
    if bytes.len() > max_bytes {
        return Err(VisionError::TooLarge { limit: max_bytes });
    }
    let format = image::guess_format(bytes).map_err(|_| VisionError::UnsupportedFormat)?;
    if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png) {
        return Err(VisionError::UnsupportedFormat);
    }
    let decoded =
        image::load_from_memory_with_format(bytes, format).map_err(|e| VisionError::Decode(e.to_string()))?;

    let original = decoded.to_rgba8();
    let (width, height) = original.dimensions();
    let verdict = mode.decide(rng);

    let mut annotated = original.clone();
    match verdict {
        Verdict::Defect => draw_outline(&mut annotated, defect_region(width, height), DEFECT_STROKE, DEFECT_COLOR),
        Verdict::Pass => draw_outline(&mut annotated, full_frame(width, height), PASS_STROKE, PASS_COLOR),
    }

    Ok(InspectionReport {
        verdict,
        width,
        height,
        original_data_url: png_data_url(original)?,
        annotated_data_url: png_data_url(annotated)?,
    })
}

/// Central box spanning 40%..60% of each axis.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn defect_region(width: u32, height: u32) -> Rect {
    let at = |size: u32, frac: f64| (f64::from(size) * frac) as u32;
    Rect { x0: at(width, 0.4), y0: at(height, 0.4), x1: at(width, 0.6), y1: at(height, 0.6) }
}

/// `[0, 0, w, h]`: the far edges sit one pixel outside the image, so the
/// right and bottom borders show one pixel less than the stroke.
fn full_frame(width: u32, height: u32) -> Rect {
    Rect { x0: 0, y0: 0, x1: width, y1: height }
}

/// Paint a `stroke`-wide outline growing inward from `rect`, clipped to the image.
fn draw_outline(img: &mut RgbaImage, rect: Rect, stroke: u32, color: Rgba<u8>) {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 || stroke == 0 {
        return;
    }
    let x1 = rect.x1.min(width - 1);
    let y1 = rect.y1.min(height - 1);
    for y in rect.y0..=y1 {
        for x in rect.x0..=x1 {
            let on_edge = x - rect.x0 < stroke || rect.x1 - x < stroke || y - rect.y0 < stroke || rect.y1 - y < stroke;
            if on_edge {
                img.put_pixel(x, y, color);
            }
        }
    }
}

fn png_data_url(img: RgbaImage) -> Result<String, VisionError> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| VisionError::Encode(e.to_string()))?;
    Ok(format!("data:image/png;base64,{}", B64.encode(out.into_inner())))
}

#[cfg(test)]
#[path = "vision_test.rs"]
mod tests;
