use crate::commands::{score::ScoreArgs, split::SplitArgs, vocab::VocabArgs};

pub mod score;
pub mod split;
pub mod vocab;

/// Subcommands for captionkit.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Build the caption vocabulary and write it as JSON.
    Vocab(VocabArgs),

    /// List the images of a split.
    Split(SplitArgs),

    /// Score generated captions against a split's references with METEOR.
    Score(ScoreArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Vocab(cmd) => cmd.run(),
            Commands::Split(cmd) => cmd.run(),
            Commands::Score(cmd) => cmd.run(),
        }
    }
}
