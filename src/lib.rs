//! CVAT to ImageNet format converter
//!
//! This library converts a CVAT XML annotation export into an ImageNet-style
//! layout: `train.txt`/`valid.txt`/`test.txt` manifests plus a directory tree
//! with class-named subdirectories for the training split.

pub mod classes;
pub mod config;
pub mod cvat;
pub mod dataset;
pub mod error;
pub mod io;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use classes::ClassMap;
pub use config::{Args, ConvertConfig, SplitFractions};
pub use cvat::{parse_annotations, read_annotations};
pub use dataset::{process_dataset, split_samples};
pub use error::ConvertError;
pub use io::{copy_images, setup_output_directories, write_manifest, write_manifests};
pub use types::{Annotation, LabeledSample, Split, SplitData};
