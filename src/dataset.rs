use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::classes::ClassMap;
use crate::config::{ConvertConfig, SplitFractions};
use crate::cvat::read_annotations;
use crate::error::ConvertError;
use crate::io::{copy_images, write_manifests};
use crate::types::{LabeledSample, SplitData};
use crate::utils::create_output_directory;

/// Split the samples into training, validation, and testing sets
///
/// The input is left untouched; when `shuffle` is set a shuffled copy is sliced.
/// Train takes the first `floor(n * train)` samples and valid the next
/// `floor(n * valid)`; test takes the rest. When the two fractions sum to exactly
/// 1.0 the test set is empty and valid extends to the end of the sequence.
pub fn split_samples<R: Rng + ?Sized>(
    samples: &[LabeledSample],
    fractions: &SplitFractions,
    shuffle: bool,
    rng: &mut R,
) -> SplitData {
    let mut samples = samples.to_vec();
    if shuffle {
        samples.shuffle(rng);
    }

    let total = samples.len();
    let train_count = ((total as f64 * fractions.train()).floor() as usize).min(total);
    let valid_end = if fractions.covers_all() {
        total
    } else {
        let valid_count = (total as f64 * fractions.valid()).floor() as usize;
        (train_count + valid_count).min(total)
    };

    let test = samples.split_off(valid_end);
    let valid = samples.split_off(train_count);
    let train = samples;

    info!(
        "Total: {}, Train: {}, Valid: {}, Test: {}",
        total,
        train.len(),
        valid.len(),
        test.len()
    );

    SplitData { train, valid, test }
}

/// Build the shuffle RNG, seeded when a seed is configured
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Main dataset processing pipeline
///
/// Inputs are parsed and validated before anything is written. Manifests are
/// written before images are copied, so a missing image leaves the manifests
/// (and any images copied so far) on disk.
pub fn process_dataset(config: &ConvertConfig) -> Result<SplitData, ConvertError> {
    info!("Parsing {}...", config.annotations.display());
    let annotations = read_annotations(&config.annotations)?;
    info!("Read {} annotated images.", annotations.len());

    let classes = ClassMap::from_file(&config.classes)?;
    classes.log_categories();
    let samples = classes.resolve(&annotations, &config.annotations)?;

    let mut rng = create_rng(config.seed);
    let split_data = split_samples(&samples, &config.fractions, config.shuffle, &mut rng);

    create_output_directory(&config.output_dir)?;
    write_manifests(&config.output_dir, &split_data)?;
    copy_images(&split_data, &classes, &config.image_dir, &config.output_dir)?;

    info!("Conversion process completed successfully.");
    Ok(split_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn samples(n: usize) -> Vec<LabeledSample> {
        (0..n)
            .map(|i| LabeledSample::new(format!("img{}.jpg", i), i % 3))
            .collect()
    }

    fn fractions(train: f64, valid: f64) -> SplitFractions {
        SplitFractions::new(train, valid).unwrap()
    }

    #[test]
    fn test_split_sizes_sum_to_total() {
        let pairs = [
            (0.7, 0.2),
            (0.7, 0.3),
            (0.8, 0.1),
            (0.0, 0.0),
            (1.0, 0.0),
            (0.0, 1.0),
            (0.33, 0.33),
            (0.5, 0.5),
            (0.65, 0.35),
        ];
        let mut rng = create_rng(Some(7));
        for n in 0..40 {
            let input = samples(n);
            for &(train, valid) in &pairs {
                let split = split_samples(&input, &fractions(train, valid), true, &mut rng);
                assert_eq!(split.len(), n, "n={} train={} valid={}", n, train, valid);
                assert_eq!(split.train.len(), (n as f64 * train).floor() as usize);
            }
        }
    }

    #[test]
    fn test_split_is_permutation() {
        let input = samples(23);
        let split = split_samples(&input, &fractions(0.6, 0.25), true, &mut create_rng(Some(1)));

        let seen: Vec<_> = split.iter().map(|(_, s)| s.clone()).collect();
        assert_eq!(seen.len(), input.len());
        let unique: HashSet<_> = seen.iter().cloned().collect();
        assert_eq!(unique.len(), input.len());
        assert!(input.iter().all(|s| unique.contains(s)));
    }

    #[test]
    fn test_full_coverage_leaves_test_empty() {
        let mut rng = create_rng(None);
        for n in 0..30 {
            for shuffle in [true, false] {
                let split = split_samples(&samples(n), &fractions(0.7, 0.3), shuffle, &mut rng);
                assert!(split.test.is_empty());
                assert_eq!(split.len(), n);
            }
        }
    }

    #[test]
    fn test_no_shuffle_is_prefix_slicing() {
        let input = samples(10);
        let first = split_samples(&input, &fractions(0.5, 0.2), false, &mut create_rng(None));
        let second = split_samples(&input, &fractions(0.5, 0.2), false, &mut create_rng(None));

        assert_eq!(first, second);
        assert_eq!(first.train, input[..5]);
        assert_eq!(first.valid, input[5..7]);
        assert_eq!(first.test, input[7..]);
    }

    #[test]
    fn test_same_seed_same_split() {
        let input = samples(50);
        let a = split_samples(&input, &fractions(0.7, 0.2), true, &mut create_rng(Some(42)));
        let b = split_samples(&input, &fractions(0.7, 0.2), true, &mut create_rng(Some(42)));
        assert_eq!(a, b);
    }

    #[test]
    fn test_three_samples_seventy_thirty() {
        let input = vec![
            LabeledSample::new("img1.jpg", 0),
            LabeledSample::new("img2.jpg", 0),
            LabeledSample::new("img3.jpg", 1),
        ];
        let split = split_samples(&input, &fractions(0.7, 0.3), false, &mut create_rng(None));
        assert_eq!(split.train, input[..2]);
        assert_eq!(split.valid, input[2..]);
        assert!(split.test.is_empty());
    }
}
