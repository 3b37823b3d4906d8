use std::io::Write;

use captionkit::CaptionDataset;
use serde::Serialize;
use log::LevelFilter;

use crate::{dataset_args::DatasetArgs, input_output::OutputArgs, logging::LogArgs};

/// Args for the vocab command.
#[derive(clap::Args, Debug)]
pub struct VocabArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[clap(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    output: OutputArgs,
}

/// The vocab command's JSON document.
#[derive(Serialize, Debug)]
struct VocabReport<'a> {
    tokens: &'a [String],
    max_seq_len: usize,
    pad_token_idx: usize,
    sos_token_idx: usize,
    eos_token_idx: usize,
    unk_token_idx: usize,
    num_train_images: usize,
    num_val_images: usize,
}

impl<'a> VocabReport<'a> {
    fn new(ds: &'a CaptionDataset) -> Self {
        Self {
            tokens: ds.vocab().tokens(),
            max_seq_len: ds.max_seq_len(),
            pad_token_idx: ds.pad_token_idx(),
            sos_token_idx: ds.sos_token_idx(),
            eos_token_idx: ds.eos_token_idx(),
            unk_token_idx: ds.unk_token_idx(),
            num_train_images: ds.num_train_images(),
            num_val_images: ds.num_val_images(),
        }
    }
}

impl VocabArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let level = self.logging.setup_logging(LevelFilter::Info)?;

        let ds = self.dataset.load(level)?;
        log::info!("Vocabulary Size: {}", ds.vocab().len());
        log::info!("Max Sequence Length: {}", ds.max_seq_len());

        if let Some(path) = &self.output.output {
            log::info!("output: {}", path);
        }
        let mut writer = self.output.open_writer()?;
        serde_json::to_writer_pretty(&mut writer, &VocabReport::new(&ds))?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(())
    }
}
