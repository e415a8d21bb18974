use crate::Result;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{format::FmtSpan, layer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{registry, EnvFilter};

const DEFAULT_LOG_DIRECTIVE: &str = "info";

/// Installs the global subscriber: a terminal layer, plus a plain-text
/// `<output_dir>/<filename>.log` layer when `save_logs_file` is set. Stages run
/// concurrently, so lines from enumerators and probe workers interleave.
pub fn init_tracing_subscriber(save_logs_file: bool, output_dir: &Path, filename: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

    let file_layer = save_logs_file.then(|| {
        let file_appender =
            RollingFileAppender::new(Rotation::NEVER, output_dir, format!("{}.log", filename));
        layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(false)
            .with_file(false)
            .with_target(false)
            .with_writer(file_appender)
    });

    let stdout_layer = layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_file(false)
        .with_target(false);

    let subscriber = registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // the only test installing the global subscriber
    #[test]
    fn log_file_receives_events() {
        let tmp = tempfile::tempdir().unwrap();

        init_tracing_subscriber(true, tmp.path(), "run").unwrap();
        tracing::error!("Host feeder stopped early: {}", "cancelled");

        let content = std::fs::read_to_string(tmp.path().join("run.log")).unwrap();
        assert!(content.contains("Host feeder stopped early"));
        assert!(!content.contains('\u{1b}'), "ansi codes in log file");
    }
}
