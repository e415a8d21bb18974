use super::EnumeratorModule;
use crate::{modules::Module, process::ProcessSpec};
use std::path::Path;

// region:        --- Module info

pub struct Subfinder {}

impl Subfinder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Module for Subfinder {
    fn name(&self) -> String {
        "Subfinder".to_string()
    }
    fn description(&self) -> String {
        "Passive sources from projectdiscovery".to_string()
    }
}

// endregion:     --- Module info

impl EnumeratorModule for Subfinder {
    fn program(&self) -> &'static str {
        "subfinder"
    }

    fn command(&self, domain: &str, output: &Path) -> ProcessSpec {
        ProcessSpec::new(self.program())
            .arg("-d")
            .arg(domain)
            .arg("-o")
            .path_arg(output)
    }
}
