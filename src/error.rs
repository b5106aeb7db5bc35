use std::path::PathBuf;

use thiserror::Error;

use crate::types::Split;

/// Errors that abort a conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Failed to read an input file (annotations or class list).
    #[error("Failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The annotation file is not well-formed XML.
    #[error("Failed to parse XML in {path}: {source}")]
    Xml {
        path: PathBuf,
        source: roxmltree::Error,
    },
    /// An element lacks an attribute the converter depends on.
    #[error("Missing `{attribute}` attribute on <{tag}> element #{index} in {path}")]
    MissingAttribute {
        path: PathBuf,
        tag: String,
        index: usize,
        attribute: &'static str,
    },
    /// An image element carries no labeled children.
    #[error("Missing label for image `{image}` (image #{index}) in {path}")]
    MissingLabel {
        path: PathBuf,
        image: String,
        index: usize,
    },
    /// The split fractions are out of range or sum above 1.0.
    #[error("Invalid split fractions: train={train}, valid={valid} (each must be in [0, 1] and train + valid <= 1)")]
    InvalidFractions { train: f64, valid: f64 },
    /// A label used in the annotations is absent from the class list.
    #[error("Unknown label `{label}` on image `{image}` in {annotations} (not listed in {classes})")]
    UnknownLabel {
        label: String,
        image: String,
        annotations: PathBuf,
        classes: PathBuf,
    },
    /// The class list names the same class twice.
    #[error("Duplicate class `{name}` on line {line} of {path}")]
    DuplicateClass {
        path: PathBuf,
        name: String,
        line: usize,
    },
    /// The class list has a blank line before its last class name.
    #[error("Blank class name on line {line} of {path}")]
    BlankClass { path: PathBuf, line: usize },
    /// The class list holds no class names.
    #[error("Class list {path} is empty")]
    EmptyClassList { path: PathBuf },
    /// An image name would resolve outside the image or output directory.
    #[error("Image name `{image}` must be a relative path without `..` components")]
    UnsafeImageName { image: String },
    /// A sample carries a class id the class list does not define.
    #[error("Image `{image}` has class id {class_id}, but only {classes} classes are defined")]
    UnknownClassId {
        image: String,
        class_id: usize,
        classes: usize,
    },
    /// Failed to create an output directory.
    #[error("Unable to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write a manifest file.
    #[error("Failed to write manifest {path}: {source}")]
    WriteManifest {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A sample references an image that is not present in the source directory.
    #[error("Image {path} not found ({split} split, class `{class}`)")]
    MissingImage {
        path: PathBuf,
        split: Split,
        class: String,
    },
    /// Copying an image into the output tree failed.
    #[error("Failed to copy {from} to {to}: {source}")]
    CopyImage {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}
