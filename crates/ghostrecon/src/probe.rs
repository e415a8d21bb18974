use crate::model::{write_lines, Classification, OutcomeBuckets, ProbeOutcome, ScanFiles};
use crate::Result;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{redirect::Policy, Client};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::{ReceiverStream, UnboundedReceiverStream};
use tracing::{debug, error, info, instrument};

/// Status recorded when neither scheme answered.
pub const NO_RESPONSE: u16 = 0;

const SCHEMES: [&str; 2] = ["http", "https"];

// region:        --- HTTP probe

#[async_trait]
pub trait HttpProbe: Send + Sync {
    /// Status code of a single GET on `url`, or an error if nothing answered.
    async fn status(&self, url: &str) -> Result<u16>;
}

pub struct ReqwestProbe {
    http_client: Client,
}

impl ReqwestProbe {
    /// Redirects are not followed: a 301 or 302 is an answer of its own.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()?;

        Ok(Self::with_client(http_client))
    }

    pub fn with_client(http_client: Client) -> Self {
        debug!("HTTP Client created: {:?}", http_client);
        Self { http_client }
    }
}

#[async_trait]
impl HttpProbe for ReqwestProbe {
    async fn status(&self, url: &str) -> Result<u16> {
        let res = self.http_client.get(url).send().await?;
        Ok(res.status().as_u16())
    }
}

/// Tries `http://` then, only if that failed, `https://`. The first scheme
/// that answers gives the status.
pub async fn probe_host<P: HttpProbe + ?Sized>(probe: &P, host: &str) -> u16 {
    for scheme in SCHEMES {
        let url = format!("{}://{}", scheme, host);
        match probe.status(&url).await {
            Ok(status) => {
                debug!("{:12} - {} {}", "RESPONSE", url, status);
                return status;
            }
            Err(err) => debug!("{:12} - {} {}", "NO RESPONSE", url, err),
        }
    }
    NO_RESPONSE
}

// endregion:     --- HTTP probe

// region:        --- Prober

/// Classifies hosts with at most `workers` probes in flight.
pub struct Prober<P> {
    probe: P,
    workers: usize,
    classification: Classification,
}

impl<P: HttpProbe> Prober<P> {
    pub fn new(probe: P, workers: usize, classification: Classification) -> Self {
        Self {
            probe,
            workers: workers.max(1),
            classification,
        }
    }

    #[instrument(name = "probe", level = "info", skip_all)]
    pub async fn run(&self, hosts: Vec<String>) -> OutcomeBuckets {
        info!("Probing {} hosts with {} workers", hosts.len(), self.workers);

        // work queue holds at most one pending host per worker
        let (input_tx, input_rx) = mpsc::channel::<String>(self.workers);
        let (live_tx, live_rx) = mpsc::unbounded_channel::<String>();
        let (dead_tx, dead_rx) = mpsc::unbounded_channel::<String>();
        let (not_found_tx, not_found_rx) = mpsc::unbounded_channel::<String>();

        let feeder = tokio::spawn(async move {
            for host in hosts {
                if input_tx.send(host).await.is_err() {
                    break;
                }
            }
        });

        let probe = &self.probe;
        let classification = self.classification;
        let (live, dead, not_found) = (&live_tx, &dead_tx, &not_found_tx);
        ReceiverStream::new(input_rx)
            .for_each_concurrent(self.workers, |host| async move {
                let status = probe_host(probe, &host).await;
                let outcome = classification.classify(status);
                info!("{:12} - {} ({})", format!("{:?}", outcome).to_uppercase(), host, status);

                let bucket = match outcome {
                    ProbeOutcome::Live => live,
                    ProbeOutcome::Dead => dead,
                    ProbeOutcome::NotFound => not_found,
                };
                if let Err(err) = bucket.send(host) {
                    error!("{:?} bucket closed, lost {}", outcome, err.0);
                }
            })
            .await;
        if let Err(err) = feeder.await {
            error!("Host feeder stopped early: {}", err);
        }

        // close buckets then drain them
        drop(live_tx);
        drop(dead_tx);
        drop(not_found_tx);

        let buckets = OutcomeBuckets {
            live: UnboundedReceiverStream::new(live_rx).collect().await,
            dead: UnboundedReceiverStream::new(dead_rx).collect().await,
            not_found: UnboundedReceiverStream::new(not_found_rx).collect().await,
        };
        info!(
            "{} live, {} dead, {} not found",
            buckets.live.len(),
            buckets.dead.len(),
            buckets.not_found.len()
        );
        buckets
    }
}

// endregion:     --- Prober

/// Writes each bucket to its own file. The 404 file only exists with the
/// extended classification.
pub fn persist(
    buckets: &OutcomeBuckets,
    classification: Classification,
    files: &ScanFiles,
) -> Result<Vec<PathBuf>> {
    let mut written = vec![files.live.clone(), files.dead.clone()];
    write_lines(&buckets.live, &files.live)?;
    write_lines(&buckets.dead, &files.dead)?;

    if classification == Classification::Extended {
        write_lines(&buckets.not_found, &files.not_found)?;
        written.push(files.not_found.clone());
    }

    for path in &written {
        info!("{:12} - {}", "SAVED", path.display());
    }
    Ok(written)
}
