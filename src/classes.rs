use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;
use crate::types::{Annotation, LabeledSample};

/// Ordered class list; a class id is its position in the list.
#[derive(Debug, Clone)]
pub struct ClassMap {
    path: PathBuf,
    names: Vec<String>,
    ids: HashMap<String, usize>,
}

impl ClassMap {
    /// Read a classes file, one name per line.
    pub fn from_file(path: &Path) -> Result<Self, ConvertError> {
        let text = fs::read_to_string(path).map_err(|source| ConvertError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Build a class map from file contents.
    ///
    /// Lines are trimmed and a class id is the 0-based line number. Trailing blank
    /// lines are ignored; a blank line before the last class is an error.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConvertError> {
        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        let last = lines.iter().rposition(|line| !line.is_empty());
        let lines = &lines[..last.map_or(0, |i| i + 1)];

        let mut names = Vec::new();
        let mut ids = HashMap::new();
        for (line_no, &name) in lines.iter().enumerate() {
            if name.is_empty() {
                return Err(ConvertError::BlankClass {
                    path: path.to_path_buf(),
                    line: line_no + 1,
                });
            }
            if ids.contains_key(name) {
                return Err(ConvertError::DuplicateClass {
                    path: path.to_path_buf(),
                    name: name.to_string(),
                    line: line_no + 1,
                });
            }
            ids.insert(name.to_string(), names.len());
            names.push(name.to_string());
        }

        if names.is_empty() {
            return Err(ConvertError::EmptyClassList {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            names,
            ids,
        })
    }

    pub fn id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Class names in id order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve every annotation's label to its class id.
    ///
    /// `annotations_path` names the source file in the error raised for an unknown label.
    pub fn resolve(
        &self,
        annotations: &[Annotation],
        annotations_path: &Path,
    ) -> Result<Vec<LabeledSample>, ConvertError> {
        annotations
            .iter()
            .map(|annotation| {
                let class_id = self.id(&annotation.label).ok_or_else(|| {
                    ConvertError::UnknownLabel {
                        label: annotation.label.clone(),
                        image: annotation.image.clone(),
                        annotations: annotations_path.to_path_buf(),
                        classes: self.path.clone(),
                    }
                })?;
                Ok(LabeledSample::new(annotation.image.clone(), class_id))
            })
            .collect()
    }

    pub fn log_categories(&self) {
        info!("Categories:");
        for (id, name) in self.names.iter().enumerate() {
            info!("    {}: {}", name, id);
        }
    }
}
