use crate::model::{write_lines, CandidateSet};
use crate::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Unions the lines of every readable file. A missing or unreadable file is
/// skipped with a warning.
///
/// Lines are taken as they are: XML or other structured tool output
/// contributes its markup lines too.
#[instrument(name = "consolidate", level = "info", skip_all)]
pub fn consolidate<'a>(paths: impl IntoIterator<Item = &'a Path>) -> CandidateSet {
    let mut candidates = CandidateSet::new();

    for path in paths {
        if !path.exists() {
            warn!("{:12} - {} (skipped)", "NO OUTPUT", path.display());
            continue;
        }

        let content = match fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                warn!("Error reading file {}: {}", path.display(), err);
                continue;
            }
        };

        let added = candidates.insert_lines(&content);
        debug!("{:12} - {} new from {}", "COLLECTED", added, path.display());
    }

    info!("{} unique subdomains", candidates.len());
    candidates
}

/// Freezes the set into a list and writes it, one subdomain per line.
pub fn persist(candidates: CandidateSet, path: &Path) -> Result<Vec<String>> {
    let subdomains = candidates.into_vec();
    write_lines(&subdomains, path)?;
    info!("{:12} - {}", "CLEANED", path.display());
    Ok(subdomains)
}
