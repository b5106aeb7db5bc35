use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::ConvertError;

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template(&format!(
            "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
            label
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

/// Create an output directory if it is absent and return its path.
///
/// Existing directories and their contents are left in place.
pub fn create_output_directory(path: &Path) -> Result<PathBuf, ConvertError> {
    if path.is_dir() {
        debug!("Directory {:?} already exists, reusing it.", path);
    }
    fs::create_dir_all(path).map_err(|source| ConvertError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

/// Check that an image name stays inside whatever directory it is joined onto.
pub fn check_image_name(image: &str) -> Result<(), ConvertError> {
    let contained = !image.is_empty()
        && Path::new(image)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if contained {
        Ok(())
    } else {
        Err(ConvertError::UnsafeImageName {
            image: image.to_string(),
        })
    }
}
