#![allow(missing_docs)]

use std::{fs, path::Path};

use captionkit::{CaptionDatasetOptions, CaptionKitError, DatasetSplit, TRAIN_SPLIT_SIZE};

fn write_annotations(
    path: &Path,
    num_images: usize,
) {
    let images: Vec<serde_json::Value> = (0..num_images)
        .map(|i| serde_json::json!({"id": i, "filename": format!("img_{i:05}.jpg")}))
        .collect();

    let mut annotations = Vec::new();
    for i in 0..num_images {
        // Every third image has no captions.
        if i % 3 == 2 {
            continue;
        }
        annotations.push(serde_json::json!({
            "image_id": i,
            "caption": format!("A photo of object {} near the {}.", i % 7, ["tree", "car"][i % 2]),
        }));
        annotations.push(serde_json::json!({
            "image_id": i,
            "caption": "Something rare!",
        }));
    }

    let doc = serde_json::json!({"images": images, "annotations": annotations});
    fs::write(path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
}

#[test]
fn test_build_from_file() {
    let dir = tempdir::TempDir::new("captionkit").unwrap();
    let path = dir.path().join("captions.json");
    write_annotations(&path, TRAIN_SPLIT_SIZE + 10);

    let ds = CaptionDatasetOptions::new(&path)
        .with_images_path("/images/")
        .with_min_occurrences(2)
        .with_verbose(false)
        .build()
        .unwrap();

    assert_eq!(ds.train_records().len(), TRAIN_SPLIT_SIZE);
    assert_eq!(ds.val_records().len(), 10);
    assert_eq!(
        ds.image_path(3, DatasetSplit::Validation).unwrap(),
        ("/images/img_03003.jpg", 3003)
    );

    let captions = ds.all_images_captions(DatasetSplit::Train);
    assert_eq!(captions.len(), TRAIN_SPLIT_SIZE);
    assert_eq!(captions[0].len(), 2);
    assert!(captions[2].is_empty());

    // "object N" digits are never indexed.
    let vocab = ds.vocab();
    for digit in 0..7 {
        assert_eq!(vocab.token_index(&digit.to_string()), None);
    }
    for word in ["a", "photo", "of", "object", "near", "the", "tree", "car", "something", "rare"] {
        assert!(vocab.token_index(word).is_some(), "missing {word}");
    }
    assert_eq!(vocab.len(), 14);
    assert!(vocab.tokens().windows(2).all(|w| w[0] < w[1]));

    // SOS a photo of object N near the X EOS
    assert_eq!(ds.max_seq_len(), 10);
}

#[test]
fn test_build_is_deterministic() {
    let dir = tempdir::TempDir::new("captionkit").unwrap();
    let path = dir.path().join("captions.json");
    write_annotations(&path, 50);

    let build = || {
        CaptionDatasetOptions::new(&path)
            .with_verbose(false)
            .build()
            .unwrap()
    };
    let a = build();
    let b = build();
    assert_eq!(a.vocab(), b.vocab());
    assert_eq!(a.max_seq_len(), b.max_seq_len());
    assert_eq!(a, b);
}

#[test]
fn test_missing_file() {
    let dir = tempdir::TempDir::new("captionkit").unwrap();
    let res = CaptionDatasetOptions::new(dir.path().join("nope.json"))
        .with_verbose(false)
        .build();
    assert!(matches!(res, Err(CaptionKitError::Io(_))));
}

#[test]
fn test_malformed_file() {
    let dir = tempdir::TempDir::new("captionkit").unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"images": [{"id": 1, "filename": "a.jpg"}], "annotations": ["#).unwrap();

    let res = CaptionDatasetOptions::new(&path).with_verbose(false).build();
    assert!(matches!(res, Err(CaptionKitError::Json(_))));
}
