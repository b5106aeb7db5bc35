use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConvertError;

/// Command-line arguments parser for converting CVAT XML to an ImageNet layout.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// CVAT annotation file (XML)
    #[arg(long = "cvat")]
    pub cvat: PathBuf,

    /// Classes file, one class name per line
    #[arg(long = "classes")]
    pub classes: PathBuf,

    /// Proportion of the dataset to use for training
    #[arg(long = "train", default_value_t = 0.7, value_parser = validate_fraction)]
    pub train: f64,

    /// Proportion of the dataset to use for validation
    #[arg(long = "valid", default_value_t = 0.2, value_parser = validate_fraction)]
    pub valid: f64,

    /// Directory holding the images referenced by the annotations
    #[arg(long = "image_dir", visible_alias = "image-dir")]
    pub image_dir: PathBuf,

    /// Output directory of the ImageNet-style dataset
    #[arg(long = "output_dir", visible_alias = "output-dir")]
    pub output_dir: PathBuf,

    /// Seed for random shuffling; omit for a fresh shuffle on every run
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Keep document order instead of shuffling before the split
    #[arg(long = "no_shuffle", visible_alias = "no-shuffle")]
    pub no_shuffle: bool,
}

impl Args {
    /// Build the run configuration, rejecting fraction pairs that overflow 1.0.
    pub fn to_convert_config(&self) -> Result<ConvertConfig, ConvertError> {
        Ok(ConvertConfig {
            annotations: self.cvat.clone(),
            classes: self.classes.clone(),
            image_dir: self.image_dir.clone(),
            output_dir: self.output_dir.clone(),
            fractions: SplitFractions::new(self.train, self.valid)?,
            shuffle: !self.no_shuffle,
            seed: self.seed,
        })
    }
}

/// Everything a conversion run needs, built once at the entry point.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub annotations: PathBuf,
    pub classes: PathBuf,
    pub image_dir: PathBuf,
    pub output_dir: PathBuf,
    pub fractions: SplitFractions,
    pub shuffle: bool,
    pub seed: Option<u64>,
}

/// Train and valid fractions; the test split takes whatever remains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitFractions {
    train: f64,
    valid: f64,
}

impl SplitFractions {
    pub fn new(train: f64, valid: f64) -> Result<Self, ConvertError> {
        let in_range = |v: f64| (0.0..=1.0).contains(&v);
        if !in_range(train) || !in_range(valid) || train + valid > 1.0 {
            return Err(ConvertError::InvalidFractions { train, valid });
        }
        Ok(Self { train, valid })
    }

    pub fn train(&self) -> f64 {
        self.train
    }

    pub fn valid(&self) -> f64 {
        self.valid
    }

    /// True when train and valid together claim the whole dataset, leaving test empty.
    pub fn covers_all(&self) -> bool {
        self.train + self.valid == 1.0
    }
}

// Validate that the fraction is between 0.0 and 1.0
fn validate_fraction(s: &str) -> Result<f64, String> {
    match f64::from_str(s) {
        Ok(val) if (0.0..=1.0).contains(&val) => Ok(val),
        _ => Err("FRACTION must be between 0.0 and 1.0".to_string()),
    }
}
