use crate::error::{PlacerError, PlacerResult};
use image::{imageops::FilterType, ImageFormat, RgbImage};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
pub const PREVIEW_SUFFIX: &str = "_preview";

/// Pick the image to paint from `dir`.
///
/// Candidates are matched on a case-insensitive extension and sorted by file name so the
/// choice does not depend on directory iteration order. Previews written by earlier runs
/// are skipped.
pub fn find_image(dir: &Path) -> PlacerResult<PathBuf> {
    let mut candidates = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image_candidate(&path) {
            candidates.push(path);
        }
    }

    candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Image candidates in {}: {candidates:?}", dir.display());

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| PlacerError::NoImageFound(dir.to_path_buf()))
}

fn is_image_candidate(path: &Path) -> bool {
    let has_image_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false);

    let is_preview = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.ends_with(PREVIEW_SUFFIX))
        .unwrap_or(false);

    has_image_extension && !is_preview
}

/// An RGB image with pixel access, the unit the quantizer works on
#[derive(Debug, Clone)]
pub struct LoadedImage {
    path: PathBuf,
    pixels: RgbImage,
}

impl LoadedImage {
    /// Open `path` as RGB.
    ///
    /// PNGs and anything carrying an alpha channel are flattened to RGB and persisted to a
    /// sibling `.jpg`, which is then reopened and becomes the image's path.
    pub fn open(path: &Path) -> PlacerResult<Self> {
        let decoded = image::open(path)?;
        let is_png = ImageFormat::from_path(path).ok() == Some(ImageFormat::Png);

        if is_png || decoded.color().has_alpha() {
            let jpg_path = path.with_extension("jpg");
            info!(
                "Converting {} to RGB as {}",
                path.display(),
                jpg_path.display()
            );
            decoded.to_rgb8().save_with_format(&jpg_path, ImageFormat::Jpeg)?;

            let reopened = image::open(&jpg_path)?;
            return Ok(Self {
                path: jpg_path,
                pixels: reopened.to_rgb8(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            pixels: decoded.to_rgb8(),
        })
    }

    pub fn from_rgb(path: PathBuf, pixels: RgbImage) -> Self {
        Self { path, pixels }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels.get_pixel(x, y).0
    }

    pub fn put(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        self.pixels.put_pixel(x, y, image::Rgb(rgb));
    }

    /// Resample to exactly `width` x `height`
    pub fn resize(&self, width: u32, height: u32) -> Self {
        Self {
            path: self.path.clone(),
            pixels: image::imageops::resize(&self.pixels, width, height, FilterType::Lanczos3),
        }
    }

    pub fn save(&self, path: &Path) -> PlacerResult<()> {
        self.pixels.save(path)?;
        Ok(())
    }

    #[cfg(test)]
    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }
}
