//! Pack-level thumbnail: a centred 320x240 crop of the cover image.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::pack::error::{PackError, Result};

pub const THUMBNAIL_WIDTH: u32 = 320;
pub const THUMBNAIL_HEIGHT: u32 = 240;
pub const THUMBNAIL_NAME: &str = "thumbnail.png";

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Scale to the thumbnail width, then crop or pad vertically around the centre.
pub fn crop(image: &DynamicImage) -> RgbaImage {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return RgbaImage::from_pixel(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT, BACKGROUND);
    }

    let scaled_height =
        ((u64::from(height) * u64::from(THUMBNAIL_WIDTH)) / u64::from(width)).max(1) as u32;
    let scaled = image
        .resize_exact(THUMBNAIL_WIDTH, scaled_height, FilterType::Lanczos3)
        .to_rgba8();

    if scaled_height >= THUMBNAIL_HEIGHT {
        let top = (scaled_height - THUMBNAIL_HEIGHT) / 2;
        imageops::crop_imm(&scaled, 0, top, THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT).to_image()
    } else {
        let mut canvas = RgbaImage::from_pixel(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT, BACKGROUND);
        let top = (THUMBNAIL_HEIGHT - scaled_height) / 2;
        imageops::overlay(&mut canvas, &scaled, 0, i64::from(top));
        canvas
    }
}

/// Decode `source`, crop it, and write the PNG into `workdir`.
pub fn write_thumbnail(source: &Path, workdir: &Path) -> Result<PathBuf> {
    let bytes = std::fs::read(source).map_err(|e| PackError::AssetUnreadable {
        path: source.to_path_buf(),
        source: e,
    })?;
    let image = image::load_from_memory(&bytes)?;
    let output = workdir.join(THUMBNAIL_NAME);
    crop(&image).save_with_format(&output, ImageFormat::Png)?;
    tracing::debug!(
        source = %source.display(),
        width = image.width(),
        height = image.height(),
        "Cropped thumbnail"
    );
    Ok(output)
}
