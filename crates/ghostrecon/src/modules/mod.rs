pub mod enumerators;
pub mod screenshot;

use self::enumerators::amass::Amass;
use self::enumerators::assetfinder::Assetfinder;
use self::enumerators::subfinder::Subfinder;
use self::enumerators::sublist3r::Sublist3r;
use self::enumerators::EnumeratorModule;
use self::screenshot::Gowitness;
use crate::utils::binary_exists;
use tracing::warn;

pub trait Module {
    fn name(&self) -> String;
    fn description(&self) -> String;
}

pub fn enumerator_modules() -> Vec<Box<dyn EnumeratorModule>> {
    vec![
        Box::new(Sublist3r::new()),
        Box::new(Assetfinder::new()),
        Box::new(Subfinder::new()),
        Box::new(Amass::new()),
    ]
}

/// Every executable a full scan launches.
pub fn required_programs() -> Vec<&'static str> {
    let mut programs: Vec<&'static str> = enumerator_modules()
        .iter()
        .map(|module| module.program())
        .collect();
    programs.push(Gowitness::new().program());
    programs
}

pub fn missing_programs() -> Vec<&'static str> {
    required_programs()
        .into_iter()
        .filter(|program| !binary_exists(program))
        .collect()
}

/// Logs a warning per missing tool. The scan still launches them.
pub fn warn_missing_programs() {
    for program in missing_programs() {
        warn!("{:12} - {} not found in PATH", "MISSING TOOL", program);
    }
}

pub fn display_all() {
    println!("\nEnumerator modules");
    for module in enumerator_modules() {
        println!("- {:15}{}", module.name(), module.description());
    }
    let screenshot = Gowitness::new();
    println!("\nScreenshot module");
    println!("- {:15}{}", screenshot.name(), screenshot.description());
}

pub fn display_tools() {
    println!("\nExternal tools");
    for program in required_programs() {
        let state = if binary_exists(program) {
            "found"
        } else {
            "missing"
        };
        println!("- {:15}{}", program, state);
    }
}
