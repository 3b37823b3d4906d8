use std::collections::BTreeMap;

use captionkit::{
    DatasetSplit,
    ImageId,
    scoring::{CaptionScorer, MeteorScorerOptions},
};
use log::LevelFilter;

use crate::{dataset_args::DatasetArgs, input_output::InputArgs, logging::LogArgs};

/// Args for the score command.
#[derive(clap::Args, Debug)]
pub struct ScoreArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[clap(flatten)]
    pub dataset: DatasetArgs,

    /// The split providing reference captions.
    #[arg(long, default_value = "validation")]
    pub split: DatasetSplit,

    #[command(flatten)]
    input: InputArgs,

    /// Path to the METEOR jar.
    #[arg(long, default_value = "meteor-1.5.jar")]
    meteor_jar: String,

    /// The java executable.
    #[arg(long, default_value = "java")]
    java: String,

    /// Print one score per image.
    #[arg(long)]
    per_image: bool,
}

impl ScoreArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let level = self.logging.setup_logging(LevelFilter::Info)?;

        let ds = self.dataset.load(level)?;

        let hypotheses: BTreeMap<ImageId, String> =
            serde_json::from_reader(self.input.open_reader()?)?;

        let mut references = ds.references(self.split);
        let total = references.len();
        references.retain(|id, _| hypotheses.contains_key(id));
        if references.len() < total {
            log::warn!(
                "scoring {} of {} {} images",
                references.len(),
                total,
                self.split
            );
        }

        let scorer = MeteorScorerOptions::default()
            .with_java(self.java.clone())
            .with_jar_path(&self.meteor_jar)
            .spawn()?;

        let report = scorer.score(&references, &hypotheses)?;
        println!("{}: {:.6}", scorer.name(), report.aggregate);
        if self.per_image {
            for (id, score) in references.keys().zip(&report.per_item) {
                println!("{id}\t{score:.6}");
            }
        }

        Ok(())
    }
}
