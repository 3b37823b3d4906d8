//! # `captionkit` Caption Dataset Preparation
//!
//! `captionkit` turns a COCO-style caption annotation file into the pieces an
//! image-captioning model needs before training:
//! * a deterministic train / validation split (see [`split`]);
//! * a frequency-filtered caption vocabulary (see [`vocab`]);
//! * per-split image and reference-caption accessors (see [`dataset`]).
//!
//! Evaluation metrics are external collaborators behind the
//! [`scoring::CaptionScorer`] trait; [`scoring::MeteorScorer`] drives the
//! METEOR jar as a child process.
//!
//! ## Crate Features
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! ## Building a Dataset
//!
//! ```rust,no_run
//! use captionkit::{CaptionDatasetOptions, DatasetSplit};
//!
//! let dataset = CaptionDatasetOptions::new("captions.json")
//!     .with_min_occurrences(5)
//!     .build()?;
//!
//! let references = dataset.all_images_captions(DatasetSplit::Validation);
//! let encoded = dataset.encode_caption("A man riding a horse.");
//! # let _ = (references, encoded);
//! # Ok::<(), captionkit::CaptionKitError>(())
//! ```
#![warn(missing_docs, unused)]

pub mod annotations;
pub mod dataset;
pub mod errors;
pub mod progress;
pub mod scoring;
pub mod split;
pub mod tokenize;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use annotations::{AnnotationFile, AnnotationRecord};
#[doc(inline)]
pub use dataset::{CaptionDataset, CaptionDatasetOptions};
#[doc(inline)]
pub use errors::{CKResult, CaptionKitError};
#[doc(inline)]
pub use progress::{LogSink, ProgressSink, WriterSink};
#[doc(inline)]
pub use split::{DatasetSplit, TRAIN_SPLIT_SIZE};
#[doc(inline)]
pub use types::ImageId;
#[doc(inline)]
pub use vocab::{CaptionVocab, ReservedToken};
