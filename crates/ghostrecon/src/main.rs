mod config;
mod consolidate;
mod enumerate;
mod error;
mod model;
mod modules;
mod probe;
mod process;
mod scan;
mod utils;

pub use error::{Error, Result};

use config::{cli, prompt_target, validate_target, ScanConfig};
use scan::scan;
use std::io;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info};
use utils::{ensure_dir, log::init_tracing_subscriber};

fn main() -> Result<()> {
    let cli = cli().get_matches();

    match cli.subcommand() {
        Some(("modules", _)) => modules::display_all(),
        Some(("tools", _)) => modules::display_tools(),
        Some(("scan", args)) => {
            let target = match args.get_one::<String>("target") {
                Some(target) => validate_target(target)?,
                None => prompt_target(io::stdin().lock(), io::stdout())?,
            };
            let config = ScanConfig::from_args(args, &target)?;

            // create log filename
            let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
            let filename = format!("{}", timestamp);

            // create output dir
            ensure_dir(&config.output_dir)?;
            init_tracing_subscriber(config.save_logs, &config.output_dir, &filename)?;

            // run the pipeline
            info!("Scanning {} (run_{})", target, timestamp);
            let report = scan(&target, &config)?;

            println!(
                "Scan of {} completed: {} subdomains, {} live, {} dead, {} not found. Results in {}",
                report.target,
                report.candidates,
                report.live,
                report.dead,
                report.not_found,
                config.output_dir.display()
            );
        }

        // fallback if a cmd is not handled (should not possible)
        _ => {
            error!("{:12} - Command not handled, exit program", "CLI ERROR");
            return Err(Error::CliUsage("Command not handled".into()));
        }
    }

    Ok(())
}
