//! # METEOR Subprocess Scorer
//!
//! Drives the METEOR 1.5 jar in `-stdio` mode. One child process is kept
//! alive per [`MeteorScorer`]; concurrent callers are serialized on its pipes.
//!
//! Line protocol, per request:
//! * `SCORE ||| ref_1 ||| ... ||| ref_n ||| hypothesis` -> one stats line, per image;
//! * `EVAL ||| stats_1 ||| ... ||| stats_k` -> `k` segment scores, then the
//!   aggregate score.
//!
//! A request that fails after it has started writing leaves unread replies
//! in the pipe; the process is then poisoned and every later call fails.

use std::{
    collections::BTreeMap,
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    process::{Child, ChildStdin, ChildStdout, Command, Stdio},
};

use parking_lot::Mutex;

use crate::{
    CKResult,
    CaptionKitError,
    scoring::{CaptionScorer, ScoreReport, check_same_keys},
    types::ImageId,
};

/// The default METEOR jar file name.
pub const METEOR_JAR: &str = "meteor-1.5.jar";

/// Options for [`MeteorScorer`].
#[derive(Debug, Clone, PartialEq)]
pub struct MeteorScorerOptions {
    /// The java executable.
    pub java: String,

    /// Path to the METEOR jar.
    pub jar_path: PathBuf,

    /// JVM max heap (`-Xmx`).
    pub max_heap: String,

    /// METEOR language code.
    pub language: String,

    /// Working directory for the child process.
    pub working_dir: Option<PathBuf>,
}

impl Default for MeteorScorerOptions {
    fn default() -> Self {
        Self {
            java: "java".to_string(),
            jar_path: PathBuf::from(METEOR_JAR),
            max_heap: "2G".to_string(),
            language: "en".to_string(),
            working_dir: None,
        }
    }
}

impl MeteorScorerOptions {
    /// Set the jar path.
    pub fn with_jar_path<P: AsRef<Path>>(
        mut self,
        jar_path: P,
    ) -> Self {
        self.jar_path = jar_path.as_ref().to_path_buf();
        self
    }

    /// Set the java executable.
    pub fn with_java<S: Into<String>>(
        mut self,
        java: S,
    ) -> Self {
        self.java = java.into();
        self
    }

    /// Set the JVM max heap.
    pub fn with_max_heap<S: Into<String>>(
        mut self,
        max_heap: S,
    ) -> Self {
        self.max_heap = max_heap.into();
        self
    }

    /// Set the METEOR language code.
    pub fn with_language<S: Into<String>>(
        mut self,
        language: S,
    ) -> Self {
        self.language = language.into();
        self
    }

    /// Set the child working directory.
    pub fn with_working_dir<P: AsRef<Path>>(
        mut self,
        working_dir: Option<P>,
    ) -> Self {
        self.working_dir = working_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// The METEOR command.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.java);
        cmd.arg("-jar")
            .arg(format!("-Xmx{}", self.max_heap))
            .arg(&self.jar_path)
            .args(["-", "-", "-stdio", "-l"])
            .arg(&self.language)
            .arg("-norm")
            .env("LC_ALL", "en_US.UTF_8");
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Spawn the METEOR process.
    pub fn spawn(&self) -> CKResult<MeteorScorer> {
        MeteorScorer::from_command(self.command())
    }
}

struct MeteorProcess {
    child: Child,
    stdin: Option<BufWriter<ChildStdin>>,
    stdout: BufReader<ChildStdout>,
}

impl MeteorProcess {
    fn write_line(
        &mut self,
        line: &str,
    ) -> CKResult<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| CaptionKitError::Protocol("meteor process is poisoned".to_string()))?;
        log::trace!("meteor <- {line}");
        writeln!(stdin, "{line}")?;
        stdin.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> CKResult<String> {
        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Err(CaptionKitError::Protocol(
                "meteor process closed its output".to_string(),
            ));
        }
        let line = line.trim().to_string();
        log::trace!("meteor -> {line}");
        Ok(line)
    }

    fn read_score(&mut self) -> CKResult<f64> {
        let line = self.read_line()?;
        line.parse::<f64>()
            .map_err(|e| CaptionKitError::Parse(format!("meteor score {line:?}: {e}")))
    }

    fn stat(
        &mut self,
        hypothesis: &str,
        references: &[String],
    ) -> CKResult<String> {
        self.write_line(&score_line(hypothesis, references))?;
        self.read_line()
    }

    fn is_poisoned(&self) -> bool {
        self.stdin.is_none()
    }

    /// Close stdin and stop the child; the pipes are out of sync.
    fn poison(&mut self) {
        log::warn!("meteor request failed; stopping the meteor process");
        drop(self.stdin.take());
        let _ = self.child.kill();
        let _ = self.child.wait();
    }

    /// Run one `SCORE`/`EVAL` exchange.
    ///
    /// Keys are assumed to be checked.
    fn request(
        &mut self,
        references: &BTreeMap<ImageId, Vec<String>>,
        hypotheses: &BTreeMap<ImageId, String>,
    ) -> CKResult<ScoreReport> {
        let mut eval_line = String::from("EVAL");
        for (id, refs) in references {
            let stat = self.stat(&hypotheses[id], refs)?;
            eval_line.push_str(" ||| ");
            eval_line.push_str(&stat);
        }
        self.write_line(&eval_line)?;

        let per_item = (0..references.len())
            .map(|_| self.read_score())
            .collect::<CKResult<Vec<_>>>()?;
        let aggregate = self.read_score()?;

        Ok(ScoreReport {
            aggregate,
            per_item,
        })
    }
}

/// Format a `SCORE` request line.
fn score_line(
    hypothesis: &str,
    references: &[String],
) -> String {
    let hypothesis = if hypothesis.is_empty() {
        // METEOR rejects empty hypotheses.
        "a".to_string()
    } else {
        hypothesis.replace("|||", "").replace("  ", " ")
    };
    let line = ["SCORE", &references.join(" ||| "), &hypothesis].join(" ||| ");
    line.trim().to_string()
}

/// METEOR scorer backed by a long-lived child process.
pub struct MeteorScorer {
    process: Mutex<MeteorProcess>,
}

impl MeteorScorer {
    /// Spawn a scorer from a prepared command.
    ///
    /// The command's stdio is replaced with pipes.
    pub fn from_command(mut cmd: Command) -> CKResult<Self> {
        log::debug!("spawning meteor: {cmd:?}");
        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let (stdin, stdout) = match (stdin, stdout) {
            (Some(stdin), Some(stdout)) => (stdin, stdout),
            _ => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(CaptionKitError::Protocol(
                    "failed to capture meteor pipes".to_string(),
                ));
            }
        };

        Ok(Self {
            process: Mutex::new(MeteorProcess {
                child,
                stdin: Some(BufWriter::new(stdin)),
                stdout: BufReader::new(stdout),
            }),
        })
    }
}

impl CaptionScorer for MeteorScorer {
    fn name(&self) -> &str {
        "METEOR"
    }

    fn score(
        &self,
        references: &BTreeMap<ImageId, Vec<String>>,
        hypotheses: &BTreeMap<ImageId, String>,
    ) -> CKResult<ScoreReport> {
        check_same_keys(references, hypotheses)?;

        let mut process = self.process.lock();
        if process.is_poisoned() {
            return Err(CaptionKitError::Protocol(
                "meteor process is poisoned".to_string(),
            ));
        }

        let result = process.request(references, hypotheses);
        if result.is_err() {
            process.poison();
        }
        result
    }
}

impl Drop for MeteorScorer {
    fn drop(&mut self) {
        let process = self.process.get_mut();
        // Closing stdin lets the jar exit on its own.
        drop(process.stdin.take());
        let _ = process.child.kill();
        let _ = process.child.wait();
    }
}
