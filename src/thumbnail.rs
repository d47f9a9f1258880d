//! Thumbnail derivation.
//!
//! Thumbnails are a fixed 1/6-scale derivative of the source image,
//! recomputed on every request and re-encoded as baseline JPEG. Nothing is
//! written to disk and nothing is cached.

use std::io::Cursor;
use std::path::Path;

use image::{imageops::FilterType, DynamicImage, GenericImageView, ImageFormat};
use tracing::trace;

use crate::error::{GalleryError, Result};

/// Fixed downscale divisor: target dimensions are `floor(w/6) x floor(h/6)`.
pub const SCALE_DIVISOR: u32 = 6;

/// Load a source image and produce its downscaled JPEG thumbnail bytes.
///
/// # Errors
///
/// Returns [`GalleryError::ImageNotFound`] if the source file is absent and
/// [`GalleryError::Processing`] when decode, resize or encode fails,
/// including sources smaller than the divisor on either axis.
pub fn render_thumbnail(path: &Path) -> Result<Vec<u8>> {
    if !path.is_file() {
        return Err(GalleryError::ImageNotFound {
            path: path.display().to_string(),
        });
    }

    let img = image::open(path).map_err(|e| GalleryError::Processing {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let (width, height) = img.dimensions();
    let (target_w, target_h) = (width / SCALE_DIVISOR, height / SCALE_DIVISOR);
    if target_w == 0 || target_h == 0 {
        return Err(GalleryError::Processing {
            path: path.display().to_string(),
            reason: format!("source {width}x{height} too small to downscale"),
        });
    }
    trace!(
        source = %path.display(),
        "rendering thumbnail {width}x{height} -> {target_w}x{target_h}"
    );

    let resized = img.resize_exact(target_w, target_h, FilterType::Lanczos3);

    // The JPEG encoder rejects alpha channels; flatten to RGB first.
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, ImageFormat::Jpeg)
        .map_err(|e| GalleryError::Processing {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}
