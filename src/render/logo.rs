//! Logo loading
//!
//! Only two encodings are recognised, by file extension and ignoring case:
//! `png` and `jpg`. Any other extension means "no logo" without touching the
//! file. A recognised file that cannot be read or decoded fails the render.

use image::{DynamicImage, ImageFormat};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{ReportError, ReportResult};

/// Side of the square box the logo is scaled into, in points
pub const LOGO_BOX: f32 = 100.0;

/// Recognised logo encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoFormat {
    Png,
    Jpg,
}

impl LogoFormat {
    /// Look up the format from a path's extension
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = Path::new(path).extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("png") {
            Some(LogoFormat::Png)
        } else if extension.eq_ignore_ascii_case("jpg") {
            Some(LogoFormat::Jpg)
        } else {
            None
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            LogoFormat::Png => ImageFormat::Png,
            LogoFormat::Jpg => ImageFormat::Jpeg,
        }
    }
}

/// A decoded logo as 8-bit RGB samples plus optional alpha
#[derive(Debug, Clone, PartialEq)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB triples
    pub rgb: Vec<u8>,
    /// Row-major alpha samples, when the source had transparency
    pub alpha: Option<Vec<u8>>,
}

impl LogoImage {
    fn from_dynamic(image: DynamicImage) -> Self {
        let has_alpha = image.color().has_alpha();
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();

        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        let mut alpha = Vec::with_capacity(if has_alpha { (width * height) as usize } else { 0 });
        for pixel in rgba.pixels() {
            rgb.extend_from_slice(&pixel.0[..3]);
            if has_alpha {
                alpha.push(pixel.0[3]);
            }
        }

        Self {
            width,
            height,
            rgb,
            alpha: has_alpha.then_some(alpha),
        }
    }

    /// Size in points when scaled to fit a `LOGO_BOX` square, aspect kept
    pub fn fitted_size(&self) -> (f32, f32) {
        fit_within(self.width, self.height, LOGO_BOX)
    }
}

/// Scale `width`×`height` to fit inside a `side`×`side` box
pub fn fit_within(width: u32, height: u32, side: f32) -> (f32, f32) {
    if width == 0 || height == 0 {
        return (0.0, 0.0);
    }
    let scale = (side / width as f32).min(side / height as f32);
    (width as f32 * scale, height as f32 * scale)
}

/// Load the logo at `path`
///
/// Returns `Ok(None)` for an empty path or an unrecognised extension.
pub fn load_logo(path: &str) -> ReportResult<Option<LogoImage>> {
    if path.is_empty() {
        return Ok(None);
    }

    let Some(format) = LogoFormat::from_path(path) else {
        warn!(path, "logo extension not supported, rendering without logo");
        return Ok(None);
    };

    let bytes = std::fs::read(path).map_err(|e| ReportError::resource(path, e.to_string()))?;
    let image = image::load_from_memory_with_format(&bytes, format.image_format())
        .map_err(|e| ReportError::resource(path, e.to_string()))?;

    let logo = LogoImage::from_dynamic(image);
    debug!(path, width = logo.width, height = logo.height, "loaded logo");
    Ok(Some(logo))
}
