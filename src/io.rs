use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::classes::ClassMap;
use crate::error::ConvertError;
use crate::types::{LabeledSample, Split, SplitData, SPLITS};
use crate::utils::{check_image_name, create_output_directory, create_progress_bar};

// Paths to the image directories for the train/valid/test splits
#[derive(Debug)]
pub struct OutputDirs {
    pub train_dir: PathBuf,
    pub valid_dir: PathBuf,
    pub test_dir: PathBuf,
}

impl OutputDirs {
    pub fn get(&self, split: Split) -> &Path {
        match split {
            Split::Train => &self.train_dir,
            Split::Valid => &self.valid_dir,
            Split::Test => &self.test_dir,
        }
    }
}

/// Set up the image directory structure: one `train/<class>` directory per class,
/// including classes with no samples, plus flat `valid/` and `test/`.
pub fn setup_output_directories(
    output_dir: &Path,
    classes: &ClassMap,
) -> Result<OutputDirs, ConvertError> {
    let train_dir = create_output_directory(&output_dir.join(Split::Train.as_str()))?;
    for name in classes.names() {
        create_output_directory(&train_dir.join(name))?;
    }
    let valid_dir = create_output_directory(&output_dir.join(Split::Valid.as_str()))?;
    let test_dir = create_output_directory(&output_dir.join(Split::Test.as_str()))?;

    Ok(OutputDirs {
        train_dir,
        valid_dir,
        test_dir,
    })
}

/// Write one manifest, truncating any previous file, one `<image> <class_id>` line per sample.
pub fn write_manifest(path: &Path, samples: &[LabeledSample]) -> Result<(), ConvertError> {
    if let Some(parent) = path.parent() {
        create_output_directory(parent)?;
    }
    let write_err = |source| ConvertError::WriteManifest {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(write_err)?);
    for sample in samples {
        writeln!(writer, "{}", sample.manifest_line()).map_err(write_err)?;
    }
    writer.flush().map_err(write_err)
}

/// Write `train.txt`, `valid.txt` and `test.txt` under `output_dir`.
pub fn write_manifests(output_dir: &Path, split_data: &SplitData) -> Result<(), ConvertError> {
    for split in SPLITS {
        let path = output_dir.join(split.manifest_name());
        write_manifest(&path, split_data.get(split))?;
        info!(
            "Wrote {} ({} samples)",
            path.display(),
            split_data.get(split).len()
        );
    }
    Ok(())
}

/// Destination of a sample's image inside the output tree.
///
/// Train images go under their class directory; valid and test stay flat.
pub fn destination_path(
    output_dirs: &OutputDirs,
    split: Split,
    class_name: &str,
    image: &str,
) -> PathBuf {
    match split {
        Split::Train => output_dirs.train_dir.join(class_name).join(image),
        Split::Valid | Split::Test => output_dirs.get(split).join(image),
    }
}

/// Copy every image of every split from `image_dir` into the output tree.
///
/// Image names must be relative and class ids must come from `classes`.
/// Stops at the first missing or uncopyable image; files copied before that remain.
pub fn copy_images(
    split_data: &SplitData,
    classes: &ClassMap,
    image_dir: &Path,
    output_dir: &Path,
) -> Result<(), ConvertError> {
    info!("Copying images...");
    let output_dirs = setup_output_directories(output_dir, classes)?;

    for split in SPLITS {
        let samples = split_data.get(split);
        if samples.is_empty() {
            continue;
        }
        let pb = create_progress_bar(samples.len() as u64, split.as_str());
        for sample in samples {
            check_image_name(&sample.image)?;
            let class_name = classes.name(sample.class_id).ok_or_else(|| {
                ConvertError::UnknownClassId {
                    image: sample.image.clone(),
                    class_id: sample.class_id,
                    classes: classes.len(),
                }
            })?;
            let src = image_dir.join(&sample.image);
            if !src.is_file() {
                pb.abandon();
                return Err(ConvertError::MissingImage {
                    path: src,
                    split,
                    class: class_name.to_string(),
                });
            }

            let dst = destination_path(&output_dirs, split, class_name, &sample.image);
            // Image names may carry sub-directories
            if let Some(parent) = dst.parent() {
                create_output_directory(parent)?;
            }
            if let Err(source) = fs::copy(&src, &dst) {
                pb.abandon();
                return Err(ConvertError::CopyImage {
                    from: src,
                    to: dst,
                    source,
                });
            }
            pb.inc(1);
        }
        pb.finish_with_message(format!("{} copy complete", split));
    }

    info!("Copy images done.");
    Ok(())
}
