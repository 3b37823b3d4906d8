//! # Train / Validation Split Assignment
//!
//! Images are assigned to splits purely by encounter order in the annotation
//! file: the first [`TRAIN_SPLIT_SIZE`] go to [`DatasetSplit::Train`], the
//! rest to [`DatasetSplit::Validation`]. There is no shuffle.

/// The number of leading images assigned to the training split.
pub const TRAIN_SPLIT_SIZE: usize = 3000;

/// A dataset split.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum DatasetSplit {
    /// The leading training prefix.
    #[strum(to_string = "train")]
    Train,

    /// Everything after the training prefix.
    #[strum(to_string = "validation", serialize = "val")]
    Validation,
}

impl DatasetSplit {
    /// The split an image lands in, given its encounter position.
    pub fn for_position(position: usize) -> Self {
        if position < TRAIN_SPLIT_SIZE {
            DatasetSplit::Train
        } else {
            DatasetSplit::Validation
        }
    }
}

/// Partition items into `(train, validation)` lists, preserving encounter order.
pub fn partition_by_encounter<T, I>(items: I) -> (Vec<T>, Vec<T>)
where
    I: IntoIterator<Item = T>,
{
    let mut train = Vec::new();
    let mut val = Vec::new();
    for (position, item) in items.into_iter().enumerate() {
        match DatasetSplit::for_position(position) {
            DatasetSplit::Train => train.push(item),
            DatasetSplit::Validation => val.push(item),
        }
    }
    (train, val)
}
