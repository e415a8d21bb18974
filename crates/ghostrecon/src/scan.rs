use crate::config::ScanConfig;
use crate::model::{export_to_json, ScanFiles, ScanReport};
use crate::modules::enumerators::EnumeratorModule;
use crate::modules::{self, screenshot};
use crate::probe::{self, HttpProbe, Prober, ReqwestProbe};
use crate::utils::ensure_dir;
use crate::{consolidate, enumerate, Result};
use time::OffsetDateTime;
use tracing::{error, info, instrument, trace};

// region:        --- Scan main function

#[tokio::main]
#[instrument(name = "scan", level = "info", skip_all)]
pub async fn scan(target: &str, config: &ScanConfig) -> Result<ScanReport> {
    trace!("Start scan on {}", target);
    modules::warn_missing_programs();

    let http_probe = ReqwestProbe::new(config.http_timeout)?;
    run_pipeline(target, config, modules::enumerator_modules(), http_probe).await
}

// endregion:     --- Scan main function

// region:        --- Pipeline

/// Enumerate, consolidate, probe, then screenshot. Each stage finishes before
/// the next one starts.
pub async fn run_pipeline<P: HttpProbe>(
    target: &str,
    config: &ScanConfig,
    enumerators: Vec<Box<dyn EnumeratorModule>>,
    http_probe: P,
) -> Result<ScanReport> {
    let started_at = OffsetDateTime::now_utc();
    let files = ScanFiles::new(&config.output_dir, target);

    // enumerate subdomains
    let enumerations = enumerate::run_all(enumerators, target, &files.dir).await;

    // dedup every tool output
    let candidates = consolidate::consolidate(enumerations.output_paths());
    let subdomains = consolidate::persist(candidates, &files.cleaned)?;
    let mut written = vec![files.cleaned.clone()];

    // probe and sort
    let prober = Prober::new(http_probe, config.workers, config.classification);
    let buckets = prober.run(subdomains.clone()).await;
    written.extend(probe::persist(&buckets, config.classification, &files)?);

    if config.screenshots {
        take_screenshots(&files, buckets.live.is_empty()).await;
    }

    let report = ScanReport {
        target: target.to_string(),
        started_at,
        classification: config.classification,
        enumerations,
        candidates: subdomains.len(),
        live: buckets.live.len(),
        dead: buckets.dead.len(),
        not_found: buckets.not_found.len(),
        files: written,
    };
    export_to_json(&report, &files.report)?;
    info!("{:12} - {}", "REPORT", files.report.display());

    Ok(report)
}

async fn take_screenshots(files: &ScanFiles, no_live_host: bool) {
    if no_live_host {
        info!("No live host, skipping screenshots");
        return;
    }

    if let Err(err) = ensure_dir(&files.screenshots) {
        error!(
            "Error creating {}: {}, skipping screenshots",
            files.screenshots.display(),
            err
        );
        return;
    }

    screenshot::capture(&files.live, &files.screenshots).await;
}

// endregion:     --- Pipeline

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Classification;
    use crate::modules::Module;
    use crate::process::ProcessSpec;
    use crate::Error;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Prints fixed lines, `$0` is the output path.
    struct EchoEnumerator {
        name: &'static str,
        lines: &'static str,
    }

    impl Module for EchoEnumerator {
        fn name(&self) -> String {
            self.name.to_string()
        }
        fn description(&self) -> String {
            String::new()
        }
    }

    impl EnumeratorModule for EchoEnumerator {
        fn program(&self) -> &'static str {
            "sh"
        }

        fn command(&self, _domain: &str, output: &Path) -> ProcessSpec {
            ProcessSpec::new("sh")
                .arg("-c")
                .arg(format!("printf '{}' > \"$0\"", self.lines))
                .path_arg(output)
        }
    }

    /// Exits non-zero without writing anything.
    struct BrokenEnumerator;

    impl Module for BrokenEnumerator {
        fn name(&self) -> String {
            "Broken".to_string()
        }
        fn description(&self) -> String {
            String::new()
        }
    }

    impl EnumeratorModule for BrokenEnumerator {
        fn program(&self) -> &'static str {
            "sh"
        }

        fn command(&self, _domain: &str, _output: &Path) -> ProcessSpec {
            ProcessSpec::new("sh").arg("-c").arg("exit 2")
        }
    }

    /// `live.` hosts answer 200 over http, `missing.` hosts 404 over https,
    /// everything else is unreachable.
    struct PrefixProbe;

    #[async_trait]
    impl HttpProbe for PrefixProbe {
        async fn status(&self, url: &str) -> Result<u16> {
            if url.starts_with("http://live.") {
                Ok(200)
            } else if url.starts_with("https://missing.") {
                Ok(404)
            } else {
                Err(Error::File(io::Error::from(io::ErrorKind::TimedOut)))
            }
        }
    }

    fn read_set(path: &Path) -> HashSet<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| line.to_string())
            .collect()
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[tokio::test]
    async fn pipeline_writes_every_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = ScanConfig::new(tmp.path());
        config.screenshots = false;
        let enumerators: Vec<Box<dyn EnumeratorModule>> = vec![
            Box::new(EchoEnumerator {
                name: "A",
                lines: "live.example.com\\nmissing.example.com\\n\\n",
            }),
            Box::new(EchoEnumerator {
                name: "B",
                lines: "missing.example.com\\ndown.example.com\\n",
            }),
        ];

        let report = run_pipeline("example.com", &config, enumerators, PrefixProbe)
            .await
            .unwrap();

        let files = ScanFiles::new(tmp.path(), "example.com");
        assert_eq!(
            set(&["live.example.com", "missing.example.com", "down.example.com"]),
            read_set(&files.cleaned)
        );
        assert_eq!(set(&["live.example.com"]), read_set(&files.live));
        assert_eq!(set(&["down.example.com"]), read_set(&files.dead));
        assert_eq!(set(&["missing.example.com"]), read_set(&files.not_found));

        assert_eq!(3, report.candidates);
        assert_eq!((1, 1, 1), (report.live, report.dead, report.not_found));
        assert_eq!(2, report.enumerations.len());
        assert!(files.report.exists());
        assert!(!files.screenshots.exists());
    }

    #[tokio::test]
    async fn failed_enumerator_does_not_stop_the_scan() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = ScanConfig::new(tmp.path());
        config.screenshots = false;
        config.classification = Classification::Simple;
        let enumerators: Vec<Box<dyn EnumeratorModule>> = vec![
            Box::new(EchoEnumerator {
                name: "A",
                lines: "live.example.com\\nmissing.example.com\\n",
            }),
            Box::new(BrokenEnumerator),
        ];

        let report = run_pipeline("example.com", &config, enumerators, PrefixProbe)
            .await
            .unwrap();

        let files = ScanFiles::new(tmp.path(), "example.com");
        assert_eq!(2, report.candidates);
        assert!(!report.enumerations.get("Broken").unwrap().status.is_success());
        assert_eq!(set(&["missing.example.com"]), read_set(&files.dead));
        assert!(!files.not_found.exists());
    }

    #[tokio::test]
    async fn unwritable_output_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = ScanConfig::new(&tmp.path().join("never-created"));
        config.screenshots = false;

        let res = run_pipeline("example.com", &config, Vec::new(), PrefixProbe).await;

        assert!(matches!(res, Err(Error::Persist { .. })));
    }
}
