use crate::model::{ProcessOutcome, ProcessStatus};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, info, instrument, warn};

/// How to run an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: String,
    pub args: Vec<String>,
    /// The tool only prints its findings, stdout is written to the output path.
    pub capture_stdout: bool,
}

impl ProcessSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            capture_stdout: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        let arg = path.to_string_lossy().into_owned();
        self.arg(arg)
    }

    pub fn capture_stdout(mut self) -> Self {
        self.capture_stdout = true;
        self
    }
}

/// Launches the process and waits for it to exit. Never fails: a launch error
/// or a non-zero exit is logged and reported in the outcome, and the expected
/// output path is returned either way.
#[instrument(name = "launch", level = "info", skip_all, fields(program = %spec.program))]
pub async fn launch(spec: &ProcessSpec, output_path: PathBuf) -> ProcessOutcome {
    info!("{:12} - {} {}", "LAUNCH", spec.program, spec.args.join(" "));

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    let status = if spec.capture_stdout {
        cmd.stdout(Stdio::piped());
        match cmd.output().await {
            Ok(output) => {
                if let Err(err) = tokio::fs::write(&output_path, &output.stdout).await {
                    error!(
                        "{}: error saving output to {}: {}",
                        spec.program,
                        output_path.display(),
                        err
                    );
                }
                Ok(output.status)
            }
            Err(err) => Err(err),
        }
    } else {
        cmd.stdout(Stdio::null());
        cmd.status().await
    };

    let status = match status {
        Ok(status) if status.success() => {
            debug!("{:12} - {}", "EXITED", status);
            ProcessStatus::Success
        }
        Ok(status) => {
            warn!("{}: exited with {}", spec.program, status);
            ProcessStatus::Failed {
                code: status.code(),
            }
        }
        Err(err) => {
            error!("{}: error launching: {}", spec.program, err);
            ProcessStatus::NotLaunched {
                reason: err.to_string(),
            }
        }
    };

    ProcessOutcome {
        status,
        output_path,
    }
}
