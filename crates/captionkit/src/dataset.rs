//! # Caption Dataset
//!
//! [`CaptionDataset`] loads an annotation file, splits the images into
//! a training prefix and a validation remainder, and builds the caption
//! vocabulary from the training captions. It is built once and is
//! read-only afterwards.
//!
//! ```rust,no_run
//! use captionkit::{CaptionDatasetOptions, DatasetSplit};
//!
//! let dataset = CaptionDatasetOptions::new("annotations.json")
//!     .with_images_path("/data/images/")
//!     .with_min_occurrences(5)
//!     .build()?;
//!
//! let (path, image_id) = dataset.image_path(0, DatasetSplit::Train)?;
//! println!("{image_id}: {path}");
//! println!("vocab size: {}", dataset.vocab().len());
//! # Ok::<(), captionkit::CaptionKitError>(())
//! ```

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    CKResult,
    CaptionKitError,
    annotations::{AnnotationFile, AnnotationRecord},
    progress::{LogSink, ProgressSink},
    split::{DatasetSplit, partition_by_encounter},
    tokenize::caption_sequence,
    types::ImageId,
    vocab::{CaptionVocab, CaptionVocabBuilderOptions, ReservedToken, VocabStats},
};

/// Options for [`CaptionDataset`].
#[derive(Clone)]
pub struct CaptionDatasetOptions {
    /// Path to the annotation JSON file.
    pub annotations_path: PathBuf,

    /// Prefix prepended verbatim to every image file name.
    pub images_path: String,

    /// Vocabulary options.
    pub vocab: CaptionVocabBuilderOptions,

    /// Reported training image count; does not truncate the split.
    pub limited_num_train_images: Option<usize>,

    /// Reported validation image count; does not truncate the split.
    pub limited_num_val_images: Option<usize>,

    /// Emit progress lines.
    pub verbose: bool,

    /// Where progress lines go.
    pub progress: Arc<dyn ProgressSink>,
}

impl fmt::Debug for CaptionDatasetOptions {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("CaptionDatasetOptions")
            .field("annotations_path", &self.annotations_path)
            .field("images_path", &self.images_path)
            .field("vocab", &self.vocab)
            .field("limited_num_train_images", &self.limited_num_train_images)
            .field("limited_num_val_images", &self.limited_num_val_images)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl CaptionDatasetOptions {
    /// Create options for the given annotation file.
    pub fn new<P: AsRef<Path>>(annotations_path: P) -> Self {
        Self {
            annotations_path: annotations_path.as_ref().to_path_buf(),
            images_path: String::new(),
            vocab: CaptionVocabBuilderOptions::default(),
            limited_num_train_images: None,
            limited_num_val_images: None,
            verbose: true,
            progress: Arc::new(LogSink),
        }
    }

    /// Set the images root prefix.
    pub fn with_images_path<S: Into<String>>(
        mut self,
        images_path: S,
    ) -> Self {
        self.images_path = images_path.into();
        self
    }

    /// Set the vocabulary minimum occurrence threshold.
    pub fn with_min_occurrences(
        mut self,
        min_occurrences: usize,
    ) -> Self {
        self.vocab = self.vocab.with_min_occurrences(min_occurrences);
        self
    }

    /// Set the reported training image count.
    pub fn with_limited_num_train_images(
        mut self,
        limit: Option<usize>,
    ) -> Self {
        self.limited_num_train_images = limit;
        self
    }

    /// Set the reported validation image count.
    pub fn with_limited_num_val_images(
        mut self,
        limit: Option<usize>,
    ) -> Self {
        self.limited_num_val_images = limit;
        self
    }

    /// Enable or disable progress lines.
    pub fn with_verbose(
        mut self,
        verbose: bool,
    ) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the progress sink.
    pub fn with_progress(
        mut self,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        self.progress = progress;
        self
    }

    /// Load the annotation file and build the dataset.
    pub fn build(self) -> CKResult<CaptionDataset> {
        let file = AnnotationFile::load_path(&self.annotations_path)?;
        Ok(self.build_from_annotations(file))
    }

    /// Build the dataset from an already parsed annotation file.
    pub fn build_from_annotations(
        self,
        file: AnnotationFile,
    ) -> CaptionDataset {
        let report = |line: &str| {
            if self.verbose {
                self.progress.report(line);
            }
        };

        report("Initializing dataset...");
        let records = file.into_records(&self.images_path);
        let (train, val) = partition_by_encounter(records);

        let num_train_images = self.limited_num_train_images.unwrap_or(train.len());
        let num_val_images = self.limited_num_val_images.unwrap_or(val.len());
        report(&format!("Num train images: {num_train_images}"));
        report(&format!("Num val images: {num_val_images}"));

        let mut builder = self.vocab.init();
        for record in &train {
            builder.observe_captions(&record.captions);
        }
        let build = builder.build();

        let stats = build.stats;
        report(&format!(
            "tot tokens {} less than {}: {} remaining: {}",
            stats.total_tokens,
            self.vocab.min_occurrences,
            stats.excluded_tokens,
            stats.remaining_tokens()
        ));
        report(&format!("There are {} vocabs in dict", build.vocab.len()));

        CaptionDataset {
            images_path: self.images_path.clone(),
            train,
            val,
            num_train_images,
            num_val_images,
            vocab: build.vocab,
            max_seq_len: build.max_seq_len,
            vocab_stats: stats,
        }
    }
}

/// Images split into train/validation, plus the training caption vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionDataset {
    images_path: String,
    train: Vec<AnnotationRecord>,
    val: Vec<AnnotationRecord>,
    num_train_images: usize,
    num_val_images: usize,
    vocab: CaptionVocab,
    max_seq_len: usize,
    vocab_stats: VocabStats,
}

impl CaptionDataset {
    /// The images root prefix.
    pub fn images_path(&self) -> &str {
        &self.images_path
    }

    /// The records of a split, in encounter order.
    pub fn records(
        &self,
        split: DatasetSplit,
    ) -> &[AnnotationRecord] {
        match split {
            DatasetSplit::Train => &self.train,
            DatasetSplit::Validation => &self.val,
        }
    }

    /// The training records.
    pub fn train_records(&self) -> &[AnnotationRecord] {
        self.records(DatasetSplit::Train)
    }

    /// The validation records.
    pub fn val_records(&self) -> &[AnnotationRecord] {
        self.records(DatasetSplit::Validation)
    }

    /// The reported training image count.
    ///
    /// This is the configured limit when one was given, which may differ
    /// from `train_records().len()`.
    pub fn num_train_images(&self) -> usize {
        self.num_train_images
    }

    /// The reported validation image count.
    ///
    /// This is the configured limit when one was given, which may differ
    /// from `val_records().len()`.
    pub fn num_val_images(&self) -> usize {
        self.num_val_images
    }

    /// Get the image path and id at a split position.
    pub fn image_path(
        &self,
        index: usize,
        split: DatasetSplit,
    ) -> CKResult<(&str, ImageId)> {
        let records = self.records(split);
        records
            .get(index)
            .map(|r| (r.file_path.as_str(), r.image_id))
            .ok_or(CaptionKitError::IndexOutOfRange {
                split,
                index,
                len: records.len(),
            })
    }

    /// Get every image's caption list, in split order.
    pub fn all_images_captions(
        &self,
        split: DatasetSplit,
    ) -> Vec<&[String]> {
        self.records(split)
            .iter()
            .map(|r| r.captions.as_slice())
            .collect()
    }

    /// Reference captions keyed by image id, as consumed by a
    /// [`CaptionScorer`](crate::scoring::CaptionScorer).
    ///
    /// Images sharing an id are merged into one entry.
    pub fn references(
        &self,
        split: DatasetSplit,
    ) -> BTreeMap<ImageId, Vec<String>> {
        self.records(split)
            .iter()
            .map(|r| (r.image_id, r.captions.clone()))
            .collect()
    }

    /// The caption vocabulary.
    pub fn vocab(&self) -> &CaptionVocab {
        &self.vocab
    }

    /// The vocabulary build statistics.
    pub fn vocab_stats(&self) -> VocabStats {
        self.vocab_stats
    }

    /// The longest training caption, counting `SOS` and `EOS`.
    pub fn max_seq_len(&self) -> usize {
        self.max_seq_len
    }

    /// Clean, wrap, and index a caption, routing unknown tokens to `UNK`.
    pub fn encode_caption(
        &self,
        caption: &str,
    ) -> Vec<usize> {
        self.vocab.encode_tokens(&caption_sequence(caption))
    }

    /// The `PAD` token index.
    pub fn pad_token_idx(&self) -> usize {
        self.vocab.reserved_index(ReservedToken::Pad)
    }

    /// The `SOS` token index.
    pub fn sos_token_idx(&self) -> usize {
        self.vocab.reserved_index(ReservedToken::Sos)
    }

    /// The `EOS` token index.
    pub fn eos_token_idx(&self) -> usize {
        self.vocab.reserved_index(ReservedToken::Eos)
    }

    /// The `UNK` token index.
    pub fn unk_token_idx(&self) -> usize {
        self.vocab.reserved_index(ReservedToken::Unk)
    }

    /// The `PAD` token string.
    pub fn pad_token_str(&self) -> &'static str {
        ReservedToken::Pad.as_str()
    }

    /// The `SOS` token string.
    pub fn sos_token_str(&self) -> &'static str {
        ReservedToken::Sos.as_str()
    }

    /// The `EOS` token string.
    pub fn eos_token_str(&self) -> &'static str {
        ReservedToken::Eos.as_str()
    }

    /// The `UNK` token string.
    pub fn unk_token_str(&self) -> &'static str {
        ReservedToken::Unk.as_str()
    }
}
