use crate::model::Classification;
use crate::utils::{default_output_dir, invoking_user};
use crate::{Error, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

// region:        --- Constants

// timeouts
pub const HTTP_REQUEST_TIMEOUT_MS: u64 = 5000;

// concurrency numbers
pub const PROBE_WORKERS: usize = 10;

// default scan directories live in `<HOME_ROOT>/<user>/`
pub const HOME_ROOT: &str = "/home";

// endregion:     --- Constants

// region:        --- CLI

pub fn cli() -> Command {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .subcommand(Command::new("modules").about("List all enumerator modules"))
        .subcommand(Command::new("tools").about("Check which external tools are installed"))
        .subcommand(
            Command::new("scan")
                .about("Enumerate and probe the subdomains of a target")
                .arg(
                    Arg::new("target")
                        .help("The domain name to scan, prompted for when missing")
                        .value_name("TARGET")
                        .index(1),
                )
                .arg(
                    Arg::new("workers")
                        .short('w')
                        .long("workers")
                        .help("Number of concurrent HTTP probes [default: 10]")
                        .value_name("WORKERS")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .help("HTTP request timeout in milliseconds [default: 5000]")
                        .value_name("MS")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("classification")
                        .short('c')
                        .long("classification")
                        .help("Sort hosts into live/dead or live/dead/404")
                        .value_name("CLASSIFICATION")
                        .value_parser(["simple", "extended"])
                        .default_value("extended"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Output directory, defaults to /home/<user>/ghostrecon-<target>")
                        .value_name("DIR")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("no-screenshots")
                        .long("no-screenshots")
                        .action(ArgAction::SetTrue)
                        .help("Skip screenshots of live hosts"),
                )
                .arg(
                    Arg::new("logs")
                        .short('s')
                        .long("logs")
                        .action(ArgAction::SetTrue)
                        .help("Save logs into a .log file"),
                ),
        )
        .arg_required_else_help(true)
}

// endregion:     --- CLI

// region:        --- Scan config

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub workers: usize,
    pub http_timeout: Duration,
    pub classification: Classification,
    pub screenshots: bool,
    pub save_logs: bool,
    pub output_dir: PathBuf,
}

impl ScanConfig {
    /// Defaults for a scan writing into `output_dir`.
    pub fn new(output_dir: &Path) -> Self {
        Self {
            workers: PROBE_WORKERS,
            http_timeout: Duration::from_millis(HTTP_REQUEST_TIMEOUT_MS),
            classification: Classification::default(),
            screenshots: true,
            save_logs: false,
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// Reads the `scan` arguments. Without `--output` the directory is derived
    /// from the invoking user, which must be known.
    pub fn from_args(args: &ArgMatches, target: &str) -> Result<Self> {
        let output_dir = match args.get_one::<PathBuf>("output") {
            Some(dir) => dir.clone(),
            None => default_output_dir(Path::new(HOME_ROOT), &invoking_user()?, target),
        };

        let mut config = Self::new(&output_dir);
        if let Some(workers) = args.get_one::<usize>("workers") {
            config.workers = (*workers).max(1);
        }
        if let Some(timeout) = args.get_one::<u64>("timeout") {
            config.http_timeout = Duration::from_millis(*timeout);
        }
        if let Some(classification) = args.get_one::<String>("classification") {
            config.classification = match classification.as_str() {
                "simple" => Classification::Simple,
                _ => Classification::Extended,
            };
        }
        config.screenshots = !args.get_flag("no-screenshots");
        config.save_logs = args.get_flag("logs");

        Ok(config)
    }
}

// endregion:     --- Scan config

// region:        --- Target

pub fn validate_target(target: &str) -> Result<String> {
    let target = target.trim();
    if target.is_empty() {
        return Err(Error::EmptyTarget);
    }
    Ok(target.to_string())
}

/// Asks for the target on `output` and reads one line from `input`.
pub fn prompt_target(mut input: impl BufRead, mut output: impl Write) -> Result<String> {
    write!(output, "Enter the target domain: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    validate_target(&line)
}

// endregion:     --- Target
