use captionkit::{CaptionDataset, CaptionDatasetOptions};
use log::LevelFilter;

/// Annotation file and vocabulary arg group.
#[derive(clap::Args, Debug)]
pub struct DatasetArgs {
    /// Annotation JSON file.
    #[arg(long)]
    annotations: String,

    /// Prefix prepended to every image file name.
    #[arg(long, default_value = "")]
    images_path: String,

    /// Minimum token frequency for vocabulary inclusion.
    #[arg(long, default_value = "1")]
    min_occurrences: usize,

    /// Reported training image count (does not truncate the split).
    #[arg(long)]
    limit_train: Option<usize>,

    /// Reported validation image count (does not truncate the split).
    #[arg(long)]
    limit_val: Option<usize>,
}

impl DatasetArgs {
    /// The dataset options these args describe, for a logger at `level`.
    ///
    /// Progress lines are logged at info level; below that they are not built.
    pub fn options(
        &self,
        level: LevelFilter,
    ) -> CaptionDatasetOptions {
        CaptionDatasetOptions::new(&self.annotations)
            .with_images_path(self.images_path.clone())
            .with_min_occurrences(self.min_occurrences)
            .with_limited_num_train_images(self.limit_train)
            .with_limited_num_val_images(self.limit_val)
            .with_verbose(level >= LevelFilter::Info)
    }

    /// Load the dataset.
    pub fn load(
        &self,
        level: LevelFilter,
    ) -> Result<CaptionDataset, Box<dyn std::error::Error>> {
        log::info!("annotations: {}", self.annotations);
        Ok(self.options(level).build()?)
    }
}
