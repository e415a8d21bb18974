use crate::model::{EnumerationResult, ProcessOutcome};
use crate::modules::enumerators::EnumeratorModule;
use crate::process::launch;
use futures::{stream, StreamExt};
use std::path::Path;
use tracing::{info, instrument};

/// Runs one enumerator to completion and returns where its output should be,
/// whatever happened to the process.
pub async fn run_enumerator(
    module: &dyn EnumeratorModule,
    domain: &str,
    output_dir: &Path,
) -> ProcessOutcome {
    info!("{:12} - {} for {}", "RUNNING", module.name(), domain);
    let output_path = module.output_file(domain, output_dir);
    let spec = module.command(domain, &output_path);

    let outcome = launch(&spec, output_path).await;
    info!(
        "{:12} - {} -> {}",
        "SAVED",
        module.name(),
        outcome.output_path.display()
    );
    outcome
}

/// Launches every enumerator at once and returns when all of them have
/// terminated. There is no per-tool deadline: a hung tool holds the barrier.
#[instrument(name = "enumerate", level = "info", skip_all)]
pub async fn run_all(
    modules: Vec<Box<dyn EnumeratorModule>>,
    domain: &str,
    output_dir: &Path,
) -> EnumerationResult {
    let concurrency = modules.len().max(1);
    info!("Running {} enumerators concurrently", modules.len());

    let result: EnumerationResult = stream::iter(modules.into_iter())
        .map(|module| async move {
            let outcome = run_enumerator(module.as_ref(), domain, output_dir).await;
            (module.name(), outcome)
        })
        .buffer_unordered(concurrency)
        .collect::<Vec<(String, ProcessOutcome)>>()
        .await
        .into_iter()
        .collect();

    let succeeded = result
        .iter()
        .filter(|(_, outcome)| outcome.status.is_success())
        .count();
    info!("{}/{} enumerators succeeded", succeeded, result.len());

    result
}
