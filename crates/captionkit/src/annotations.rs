//! # Annotation File IO
//!
//! Reads COCO-style caption annotation files:
//!
//! ```json
//! {
//!   "images": [{"id": 1, "filename": "a.jpg"}],
//!   "annotations": [{"image_id": 1, "caption": "A dog."}]
//! }
//! ```
//!
//! Images and annotations are cross-referenced by `id == image_id`.
//! Unknown fields are ignored.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use serde::Deserialize;

use crate::{
    CKResult,
    types::{CKHashMap, ImageId, hash_map_new},
};

/// An entry of the `images` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageEntry {
    /// The image id.
    pub id: ImageId,

    /// The image file name, relative to the images root.
    pub filename: String,
}

/// An entry of the `annotations` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnnotationEntry {
    /// The id of the captioned image.
    pub image_id: ImageId,

    /// The raw caption text.
    pub caption: String,
}

/// A parsed annotation file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnnotationFile {
    /// Images, in file order.
    pub images: Vec<ImageEntry>,

    /// Caption annotations, in file order.
    pub annotations: Vec<AnnotationEntry>,
}

impl AnnotationFile {
    /// Parse an annotation file from a reader.
    pub fn from_reader<R: Read>(reader: R) -> CKResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load an annotation file from a path.
    pub fn load_path<P: AsRef<Path>>(path: P) -> CKResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        Self::from_reader(reader)
    }

    /// Join images with their captions, in `images` order.
    ///
    /// ## Arguments
    /// * `images_path` - prefix prepended verbatim to every `filename`.
    pub fn into_records(
        self,
        images_path: &str,
    ) -> Vec<AnnotationRecord> {
        let mut captions_by_id: CKHashMap<ImageId, Vec<String>> = hash_map_new();
        for ann in self.annotations {
            captions_by_id
                .entry(ann.image_id)
                .or_default()
                .push(ann.caption);
        }

        self.images
            .into_iter()
            .map(|image| {
                // Duplicate image ids all see the same caption list.
                let captions = captions_by_id.get(&image.id).cloned().unwrap_or_default();
                AnnotationRecord {
                    image_id: image.id,
                    file_path: format!("{images_path}{}", image.filename),
                    captions,
                }
            })
            .collect()
    }
}

/// One image with all of its raw captions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    /// The image id.
    pub image_id: ImageId,

    /// The images root prefix joined with the file name.
    pub file_path: String,

    /// Raw captions, in annotation file order.
    pub captions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "info": {"year": 2014},
        "images": [
            {"id": 7, "filename": "seven.jpg", "width": 640},
            {"id": 3, "filename": "three.jpg"},
            {"id": 9, "filename": "nine.jpg"}
        ],
        "annotations": [
            {"image_id": 3, "id": 100, "caption": "first for three"},
            {"image_id": 7, "id": 101, "caption": "only for seven"},
            {"image_id": 3, "id": 102, "caption": "second for three"}
        ]
    }"#;

    #[test]
    fn test_parse_and_join() {
        let file = AnnotationFile::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(file.images.len(), 3);
        assert_eq!(file.annotations.len(), 3);

        let records = file.into_records("/data/");
        assert_eq!(
            records,
            vec![
                AnnotationRecord {
                    image_id: 7,
                    file_path: "/data/seven.jpg".to_string(),
                    captions: vec!["only for seven".to_string()],
                },
                AnnotationRecord {
                    image_id: 3,
                    file_path: "/data/three.jpg".to_string(),
                    captions: vec![
                        "first for three".to_string(),
                        "second for three".to_string()
                    ],
                },
                AnnotationRecord {
                    image_id: 9,
                    file_path: "/data/nine.jpg".to_string(),
                    captions: vec![],
                },
            ]
        );
    }

    #[test]
    fn test_missing_key_is_error() {
        let res = AnnotationFile::from_reader(r#"{"images": []}"#.as_bytes());
        assert!(matches!(res, Err(crate::CaptionKitError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_error() {
        let res = AnnotationFile::load_path("/definitely/not/here.json");
        assert!(matches!(res, Err(crate::CaptionKitError::Io(_))));
    }
}
