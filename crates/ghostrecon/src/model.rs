use crate::{Error, Result};
use serde::Serialize;
use serde_json::to_string_pretty;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

// region:        --- Processes

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProcessStatus {
    Success,
    Failed { code: Option<i32> },
    NotLaunched { reason: String },
}

impl ProcessStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessStatus::Success)
    }
}

/// What a launched tool left behind. `output_path` is where the output is
/// expected, a file may or may not exist there.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub status: ProcessStatus,
    pub output_path: PathBuf,
}

// endregion:     --- Processes

// region:        --- Enumeration

/// Enumerator name -> outcome, built once every enumerator has terminated.
#[derive(Debug, Default, Serialize)]
pub struct EnumerationResult(BTreeMap<String, ProcessOutcome>);

impl EnumerationResult {
    pub fn get(&self, name: &str) -> Option<&ProcessOutcome> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn output_paths(&self) -> impl Iterator<Item = &Path> {
        self.0.values().map(|outcome| outcome.output_path.as_path())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ProcessOutcome)> {
        self.0.iter()
    }
}

impl FromIterator<(String, ProcessOutcome)> for EnumerationResult {
    fn from_iter<I: IntoIterator<Item = (String, ProcessOutcome)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Deduplicated subdomains. Matching is exact: no case folding, no trailing
/// dot stripping.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CandidateSet(HashSet<String>);

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts every trimmed, non-empty line of `content`.
    pub fn insert_lines(&mut self, content: &str) -> usize {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| self.0.insert(line.to_string()))
            .count()
    }

    pub fn contains(&self, subdomain: &str) -> bool {
        self.0.contains(subdomain)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Order is whatever the set yields, not sorted nor stable.
    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

// endregion:     --- Enumeration

// region:        --- Probing

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeOutcome {
    Live,
    Dead,
    NotFound,
}

/// How many buckets the prober sorts hosts into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Live / dead, a 404 counts as dead.
    Simple,
    /// Live / dead / 404.
    #[default]
    Extended,
}

impl Classification {
    pub fn classify(&self, status: u16) -> ProbeOutcome {
        match (status, self) {
            (200 | 301 | 302, _) => ProbeOutcome::Live,
            (404, Classification::Extended) => ProbeOutcome::NotFound,
            _ => ProbeOutcome::Dead,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct OutcomeBuckets {
    pub live: Vec<String>,
    pub dead: Vec<String>,
    pub not_found: Vec<String>,
}

impl OutcomeBuckets {
    pub fn total(&self) -> usize {
        self.live.len() + self.dead.len() + self.not_found.len()
    }
}

// endregion:     --- Probing

// region:        --- Scan files

/// Every file a scan writes, all under one directory.
#[derive(Debug, Clone)]
pub struct ScanFiles {
    pub dir: PathBuf,
    pub cleaned: PathBuf,
    pub live: PathBuf,
    pub dead: PathBuf,
    pub not_found: PathBuf,
    pub screenshots: PathBuf,
    pub report: PathBuf,
}

impl ScanFiles {
    pub fn new(dir: &Path, domain: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            cleaned: dir.join(format!("{}_cleaned_subdomains.txt", domain)),
            live: dir.join(format!("{}_live_subdomains.txt", domain)),
            dead: dir.join(format!("{}_dead_subdomains.txt", domain)),
            not_found: dir.join(format!("{}_404_subdomains.txt", domain)),
            screenshots: dir.join("screenshots"),
            report: dir.join(format!("{}_report.json", domain)),
        }
    }
}

// endregion:     --- Scan files

// region:        --- Report

#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub target: String,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    pub classification: Classification,
    pub enumerations: EnumerationResult,
    pub candidates: usize,
    pub live: usize,
    pub dead: usize,
    pub not_found: usize,
    pub files: Vec<PathBuf>,
}

// endregion:     --- Report

// region:        --- Exporting utils

/// Writes one entry per line. Any failure here loses a deliverable, so the
/// error carries the path.
pub fn write_lines(lines: &[String], path: &Path) -> Result<()> {
    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }

    File::create(path)
        .and_then(|mut file| file.write_all(content.as_bytes()))
        .map_err(|source| Error::Persist {
            path: path.to_path_buf(),
            source,
        })
}

pub fn export_to_json(report: &ScanReport, path: &Path) -> Result<()> {
    let json = to_string_pretty(report)?;
    File::create(path)
        .and_then(|mut file| file.write_all(json.as_bytes()))
        .map_err(|source| Error::Persist {
            path: path.to_path_buf(),
            source,
        })
}

// endregion:     --- Exporting utils
