// Loads the picture to glitch and writes the glitched result back out.
// Visual: if there is no image on disk you get a white disc on transparency.

use crate::error::Error;
use crate::types::SourceImage;
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::Path;

const DEFAULT_SIZE: u32 = 200;
const DEFAULT_RADIUS: i32 = 80;

/// Decode `path` as RGBA, or fall back to the built-in disc when the file is missing.
pub fn load_or_default(path: &Path) -> Result<SourceImage, Error> {
    if !path.exists() {
        log::info!("{} not found, using the default disc image", path.display());
        return SourceImage::new(default_image());
    }
    let image = image::open(path).map_err(Error::ImageLoad)?.to_rgba8();
    log::info!("loaded {} ({}x{})", path.display(), image.width(), image.height());
    SourceImage::new(image)
}

/// Transparent square with an opaque white disc in the middle.
pub fn default_image() -> RgbaImage {
    let c = (DEFAULT_SIZE / 2) as i32;
    let r2 = DEFAULT_RADIUS * DEFAULT_RADIUS;
    RgbaImage::from_fn(DEFAULT_SIZE, DEFAULT_SIZE, |x, y| {
        let dx = x as i32 - c;
        let dy = y as i32 - c;
        if dx * dx + dy * dy <= r2 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Write an RGBA PNG. Errors are left to the caller to report; nothing else is touched.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), Error> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(Error::ImageSave)
}
