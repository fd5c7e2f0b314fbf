pub mod formatter;

pub use formatter::*;

use std::path::{Path, PathBuf};

use crate::image_loader::PREVIEW_SUFFIX;

/// Where the quantized preview of `source` is written
pub fn preview_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    source.with_file_name(format!("{stem}{PREVIEW_SUFFIX}.png"))
}
