use log::LevelFilter;
use stderrlog::{LogLevelNum, Timestamp};

/// Logging flags shared by every command.
///
/// The dataset's progress lines are logged at info level, so they are only
/// produced when the effective level reaches [`LevelFilter::Info`].
#[derive(clap::Args, Debug, Default)]
pub struct LogArgs {
    /// Silence all log messages, including dataset progress.
    #[clap(short, long)]
    pub quiet: bool,

    /// Set the log level by count: -v error, -vv warn, -vvv info, -vvvv debug, -vvvvv trace.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Prefix log lines with timestamps.
    #[clap(long)]
    pub ts: bool,
}

impl LogArgs {
    /// The effective level, for a command logging at `default` without flags.
    pub fn level(
        &self,
        default: LevelFilter,
    ) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }
        match self.verbose {
            0 => default,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            4 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Install the stderr logger.
    ///
    /// ## Returns
    /// The installed level, which decides whether dataset progress is emitted.
    pub fn setup_logging(
        &self,
        default: LevelFilter,
    ) -> Result<LevelFilter, Box<dyn std::error::Error>> {
        let level = self.level(default);

        stderrlog::new()
            .verbosity(level_num(level))
            .timestamp(if self.ts {
                Timestamp::Second
            } else {
                Timestamp::Off
            })
            .init()?;

        Ok(level)
    }
}

fn level_num(level: LevelFilter) -> LogLevelNum {
    match level {
        LevelFilter::Off => LogLevelNum::Off,
        LevelFilter::Error => LogLevelNum::Error,
        LevelFilter::Warn => LogLevelNum::Warn,
        LevelFilter::Info => LogLevelNum::Info,
        LevelFilter::Debug => LogLevelNum::Debug,
        LevelFilter::Trace => LogLevelNum::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        let args = LogArgs::default();
        assert_eq!(args.level(LevelFilter::Info), LevelFilter::Info);
        assert_eq!(args.level(LevelFilter::Warn), LevelFilter::Warn);
    }

    #[test]
    fn test_verbose_overrides_default() {
        let args = LogArgs {
            verbose: 4,
            ..Default::default()
        };
        assert_eq!(args.level(LevelFilter::Warn), LevelFilter::Debug);

        let args = LogArgs {
            verbose: 9,
            ..Default::default()
        };
        assert_eq!(args.level(LevelFilter::Warn), LevelFilter::Trace);
    }

    #[test]
    fn test_quiet_wins() {
        let args = LogArgs {
            quiet: true,
            verbose: 5,
            ts: false,
        };
        assert_eq!(args.level(LevelFilter::Info), LevelFilter::Off);
    }
}
