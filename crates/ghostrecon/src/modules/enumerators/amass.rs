use super::EnumeratorModule;
use crate::{modules::Module, process::ProcessSpec};
use std::path::Path;

// region:        --- Module info

pub struct Amass {}

impl Amass {
    pub fn new() -> Self {
        Self {}
    }
}

impl Module for Amass {
    fn name(&self) -> String {
        "Amass".to_string()
    }
    fn description(&self) -> String {
        "OWASP Amass in passive mode".to_string()
    }
}

// endregion:     --- Module info

impl EnumeratorModule for Amass {
    fn program(&self) -> &'static str {
        "amass"
    }

    fn command(&self, domain: &str, output: &Path) -> ProcessSpec {
        ProcessSpec::new(self.program())
            .arg("enum")
            .arg("-passive")
            .arg("-d")
            .arg(domain)
            .arg("-o")
            .path_arg(output)
    }
}
