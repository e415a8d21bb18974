use super::Module;
use crate::process::{launch, ProcessSpec};
use std::path::Path;
use tracing::{info, instrument};

// region:        --- Module info

pub struct Gowitness {}

impl Gowitness {
    pub fn new() -> Self {
        Self {}
    }

    pub fn program(&self) -> &'static str {
        "gowitness"
    }

    pub fn command(&self, hosts_file: &Path, screenshots_dir: &Path) -> ProcessSpec {
        ProcessSpec::new(self.program())
            .arg("file")
            .arg("-f")
            .path_arg(hosts_file)
            .arg("-P")
            .path_arg(screenshots_dir)
    }
}

impl Module for Gowitness {
    fn name(&self) -> String {
        "Gowitness".to_string()
    }
    fn description(&self) -> String {
        "Screenshots of every host in a file".to_string()
    }
}

// endregion:     --- Module info

/// Screenshots every host listed in `hosts_file`. The images are left in
/// `screenshots_dir` and nothing else is read back.
#[instrument(name = "screenshots", level = "info", skip_all)]
pub async fn capture(hosts_file: &Path, screenshots_dir: &Path) {
    let module = Gowitness::new();
    let spec = module.command(hosts_file, screenshots_dir);
    let outcome = launch(&spec, screenshots_dir.to_path_buf()).await;

    info!(
        "{:12} - {} ({:?})",
        "SCREENSHOTS",
        outcome.output_path.display(),
        outcome.status
    );
}

#[cfg(test)]
mod tests {
    use super::Gowitness;
    use std::path::Path;

    #[test]
    fn command_points_to_hosts_file() {
        let spec = Gowitness::new().command(
            Path::new("/scan/live.txt"),
            Path::new("/scan/screenshots"),
        );

        assert_eq!("gowitness", spec.program);
        assert_eq!(
            vec!["file", "-f", "/scan/live.txt", "-P", "/scan/screenshots"],
            spec.args
        );
    }
}
