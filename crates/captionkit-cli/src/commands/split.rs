use std::io::Write;

use captionkit::{AnnotationRecord, DatasetSplit};
use log::LevelFilter;

use crate::{dataset_args::DatasetArgs, input_output::OutputArgs, logging::LogArgs};

/// Args for the split command.
#[derive(clap::Args, Debug)]
pub struct SplitArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[clap(flatten)]
    pub dataset: DatasetArgs,

    /// The split to list: "train" or "validation".
    #[arg(long, default_value = "train")]
    pub split: DatasetSplit,

    /// Also print each image's captions.
    #[arg(long)]
    captions: bool,

    #[command(flatten)]
    output: OutputArgs,
}

impl SplitArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let level = self.logging.setup_logging(LevelFilter::Warn)?;

        let ds = self.dataset.load(level)?;
        let records = ds.records(self.split);
        log::info!("{} split: {} images", self.split, records.len());

        let mut writer = self.output.open_writer()?;
        write_records(&mut writer, records, self.captions)?;
        writer.flush()?;

        Ok(())
    }
}

/// Write one `image_id<TAB>path` line per record.
///
/// With `captions`, each record is followed by its captions, one per line,
/// each indented by a tab.
fn write_records<W: Write>(
    writer: &mut W,
    records: &[AnnotationRecord],
    captions: bool,
) -> std::io::Result<()> {
    for record in records {
        writeln!(writer, "{}\t{}", record.image_id, record.file_path)?;
        if captions {
            for caption in &record.captions {
                writeln!(writer, "\t{caption}")?;
            }
        }
    }
    Ok(())
}
