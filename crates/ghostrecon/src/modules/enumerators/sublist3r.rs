use super::EnumeratorModule;
use crate::{modules::Module, process::ProcessSpec};
use std::path::Path;

// region:        --- Module info

pub struct Sublist3r {}

impl Sublist3r {
    pub fn new() -> Self {
        Self {}
    }
}

impl Module for Sublist3r {
    fn name(&self) -> String {
        "Sublist3r".to_string()
    }
    fn description(&self) -> String {
        "Search engines and passive DNS, writes its own output file".to_string()
    }
}

// endregion:     --- Module info

impl EnumeratorModule for Sublist3r {
    fn program(&self) -> &'static str {
        "sublist3r"
    }

    fn command(&self, domain: &str, output: &Path) -> ProcessSpec {
        ProcessSpec::new(self.program())
            .arg("-d")
            .arg(domain)
            .arg("-o")
            .path_arg(output)
    }
}

#[cfg(test)]
mod tests {
    use super::Sublist3r;
    use crate::modules::enumerators::EnumeratorModule;
    use std::path::Path;

    #[test]
    fn writes_to_output_file() {
        let module = Sublist3r::new();
        let output = module.output_file("example.com", Path::new("/scan"));
        let spec = module.command("example.com", &output);

        assert_eq!(
            vec![
                "-d",
                "example.com",
                "-o",
                "/scan/Sublist3r_sublist3r_example.com.txt"
            ],
            spec.args
        );
        assert!(!spec.capture_stdout);
    }
}
