use super::EnumeratorModule;
use crate::{modules::Module, process::ProcessSpec};
use std::path::Path;

// region:        --- Module info

pub struct Assetfinder {}

impl Assetfinder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Module for Assetfinder {
    fn name(&self) -> String {
        "Assetfinder".to_string()
    }
    fn description(&self) -> String {
        "Related domains from tomnomnom, output captured from stdout".to_string()
    }
}

// endregion:     --- Module info

impl EnumeratorModule for Assetfinder {
    fn program(&self) -> &'static str {
        "assetfinder"
    }

    // no output flag, the runner saves stdout to `output`
    fn command(&self, domain: &str, _output: &Path) -> ProcessSpec {
        ProcessSpec::new(self.program())
            .arg("--subs-only")
            .arg(domain)
            .capture_stdout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdout_is_captured() {
        let module = Assetfinder::new();
        let dir = Path::new("/tmp/scan");
        let output = module.output_file("example.com", dir);

        assert_eq!(
            dir.join("Assetfinder_assetfinder_example.com.txt"),
            output
        );

        let spec = module.command("example.com", &output);
        assert_eq!("assetfinder", spec.program);
        assert_eq!(vec!["--subs-only", "example.com"], spec.args);
        assert!(spec.capture_stdout);
    }
}
