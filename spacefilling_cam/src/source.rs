//! Input images, always delivered at the fixed working size.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbImage;
use sketch_core::TestPattern;

pub const IMG_WIDTH: u32 = 320;
pub const IMG_HEIGHT: u32 = 240;

/// Load a still image from disk and resize it to the working size.
pub fn load_image(path: &Path) -> image::ImageResult<RgbImage> {
    let img = image::open(path)?.to_rgb8();
    tracing::debug!(path = %path.display(), w = img.width(), h = img.height(), "image loaded");
    Ok(fit_input(&img))
}

/// Resize (ignoring aspect) to `IMG_WIDTH × IMG_HEIGHT`.
pub fn fit_input(img: &RgbImage) -> RgbImage {
    if img.dimensions() == (IMG_WIDTH, IMG_HEIGHT) {
        return img.clone();
    }
    imageops::resize(img, IMG_WIDTH, IMG_HEIGHT, FilterType::Triangle)
}

/// Generated stand-in used when no image is given.
pub fn test_pattern() -> RgbImage {
    TestPattern::new(IMG_WIDTH, IMG_HEIGHT).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_have_working_size() {
        let small = RgbImage::new(64, 48);
        assert_eq!(fit_input(&small).dimensions(), (IMG_WIDTH, IMG_HEIGHT));
        assert_eq!(test_pattern().dimensions(), (IMG_WIDTH, IMG_HEIGHT));
    }

    #[test]
    fn load_resizes_png() {
        let path = std::env::temp_dir().join(format!("spacefilling_cam_{}.png", std::process::id()));
        RgbImage::from_pixel(40, 30, image::Rgb([10, 200, 30])).save(&path).unwrap();
        let img = load_image(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(img.dimensions(), (IMG_WIDTH, IMG_HEIGHT));
        let image::Rgb([_, g, _]) = *img.get_pixel(100, 100);
        assert!(g.abs_diff(200) <= 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_image(Path::new("/nonexistent/spacefilling.png")).is_err());
    }
}
