use std::fmt;

/// Names of the three splits, in the order they are written.
pub const SPLITS: [Split; 3] = [Split::Train, Split::Valid, Split::Test];

// One (image, label) pair read from the CVAT export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub image: String,
    pub label: String,
}

// An annotation whose label has been resolved to a class id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabeledSample {
    pub image: String,
    pub class_id: usize,
}

impl LabeledSample {
    pub fn new(image: impl Into<String>, class_id: usize) -> Self {
        Self {
            image: image.into(),
            class_id,
        }
    }

    /// The manifest line for this sample, without the trailing newline.
    pub fn manifest_line(&self) -> String {
        format!("{} {}", self.image, self.class_id)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Split {
    Train,
    Valid,
    Test,
}

impl Split {
    /// Directory name under the output root.
    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Valid => "valid",
            Split::Test => "test",
        }
    }

    /// Manifest file name under the output root.
    pub fn manifest_name(self) -> String {
        format!("{}.txt", self.as_str())
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Struct to hold the split datasets for training, validation, and testing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitData {
    pub train: Vec<LabeledSample>,
    pub valid: Vec<LabeledSample>,
    pub test: Vec<LabeledSample>,
}

impl SplitData {
    pub fn get(&self, split: Split) -> &[LabeledSample] {
        match split {
            Split::Train => &self.train,
            Split::Valid => &self.valid,
            Split::Test => &self.test,
        }
    }

    /// Total number of samples across all splits.
    pub fn len(&self) -> usize {
        self.train.len() + self.valid.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate samples in train, valid, test order.
    pub fn iter(&self) -> impl Iterator<Item = (Split, &LabeledSample)> {
        SPLITS
            .into_iter()
            .flat_map(move |split| self.get(split).iter().map(move |s| (split, s)))
    }
}
