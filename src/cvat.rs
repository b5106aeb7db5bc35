//! CVAT XML annotation parsing.
//!
//! A CVAT "images" export has a root element holding one `<image>` element per
//! frame. Each image carries a `name` attribute and one child element per
//! annotated object (`<tag>`, `<box>`, `<polygon>`, ...), each with a `label`
//! attribute. Only the label is used here; geometry is ignored.

use log::{debug, warn};
use std::fs;
use std::path::Path;

use crate::error::ConvertError;
use crate::types::Annotation;
use crate::utils::check_image_name;

/// Read and parse a CVAT annotation file.
pub fn read_annotations(path: &Path) -> Result<Vec<Annotation>, ConvertError> {
    let text = fs::read_to_string(path).map_err(|source| ConvertError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    let annotations = parse_annotations(&text, path)?;
    debug!(
        "Parsed {} annotated images from {}",
        annotations.len(),
        path.display()
    );
    Ok(annotations)
}

/// Parse CVAT XML text; `path` is only used for error reporting.
///
/// When an image has several labeled children the last one wins.
pub fn parse_annotations(text: &str, path: &Path) -> Result<Vec<Annotation>, ConvertError> {
    let doc = roxmltree::Document::parse(text).map_err(|source| ConvertError::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    let images = doc
        .root_element()
        .children()
        .filter(|node| node.is_element() && node.has_tag_name("image"));

    let mut annotations = Vec::new();
    for (index, image) in images.enumerate() {
        let name = image
            .attribute("name")
            .ok_or_else(|| ConvertError::MissingAttribute {
                path: path.to_path_buf(),
                tag: "image".to_string(),
                index,
                attribute: "name",
            })?;
        check_image_name(name)?;

        let mut label: Option<&str> = None;
        for (child_index, child) in image.children().filter(|n| n.is_element()).enumerate() {
            let child_label = child.attribute("label").ok_or_else(|| {
                ConvertError::MissingAttribute {
                    path: path.to_path_buf(),
                    tag: child.tag_name().name().to_string(),
                    index: child_index,
                    attribute: "label",
                }
            })?;
            if let Some(previous) = label {
                if previous != child_label {
                    warn!(
                        "Image `{}` has multiple labels (`{}`, `{}`); keeping `{}`",
                        name, previous, child_label, child_label
                    );
                }
            }
            label = Some(child_label);
        }

        let label = label.ok_or_else(|| ConvertError::MissingLabel {
            path: path.to_path_buf(),
            image: name.to_string(),
            index,
        })?;

        annotations.push(Annotation {
            image: name.to_string(),
            label: label.to_string(),
        });
    }

    Ok(annotations)
}
