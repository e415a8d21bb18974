pub mod amass;
pub mod assetfinder;
pub mod sublist3r;
pub mod subfinder;

use super::Module;
use crate::process::ProcessSpec;
use std::path::{Path, PathBuf};

/// An external subdomain enumeration tool.
pub trait EnumeratorModule: Module + Send + Sync {
    /// Executable looked up on `PATH`.
    fn program(&self) -> &'static str;

    /// Where the tool output is expected, `<Name>_<program>_<domain>.txt`.
    fn output_file(&self, domain: &str, dir: &Path) -> PathBuf {
        dir.join(format!("{}_{}_{}.txt", self.name(), self.program(), domain))
    }

    fn command(&self, domain: &str, output: &Path) -> ProcessSpec;
}
