pub mod log;

use crate::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::{env, fs};

// region:        --- Directories

pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        Ok(false)
    } else {
        fs::create_dir_all(dir)?;
        Ok(true)
    }
}

/// Name of the user who invoked the scan, preferring the one behind `sudo`.
pub fn invoking_user() -> Result<String> {
    invoking_user_from(|key| env::var(key).ok())
}

/// Same as `invoking_user`, reading variables through `lookup`. Blank values
/// count as unset.
pub fn invoking_user_from(lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    ["SUDO_USER", "USER"]
        .iter()
        .filter_map(|key| lookup(key))
        .map(|user| user.trim().to_string())
        .find(|user| !user.is_empty())
        .ok_or(Error::UnknownUser)
}

/// `<home_root>/<user>/ghostrecon-<target with dots replaced>`
pub fn default_output_dir(home_root: &Path, user: &str, target: &str) -> PathBuf {
    home_root
        .join(user)
        .join(format!("ghostrecon-{}", target.replace('.', "_")))
}

// endregion:     --- Directories

// region:        --- Executables

/// True when `program` resolves to an executable on `PATH`.
pub fn binary_exists(program: &str) -> bool {
    match env::var_os("PATH") {
        Some(paths) => binary_exists_in(program, paths),
        None => false,
    }
}

/// Same as `binary_exists`, searching `paths` instead of `PATH`.
pub fn binary_exists_in(program: &str, paths: impl AsRef<OsStr>) -> bool {
    match env::current_dir() {
        Ok(cwd) => which::which_in(program, Some(paths), cwd).is_ok(),
        Err(_) => false,
    }
}

// endregion:     --- Executables

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_replaces_dots() {
        let dir = default_output_dir(Path::new("/home"), "alice", "api.example.com");
        assert_eq!(dir, PathBuf::from("/home/alice/ghostrecon-api_example_com"));
    }

    #[test]
    fn ensure_dir_creates_once() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("b");

        assert_eq!(true, ensure_dir(&dir).unwrap());
        assert_eq!(false, ensure_dir(&dir).unwrap());
        assert!(dir.is_dir());
    }

    #[test]
    fn missing_binary_is_not_found() {
        assert_eq!(false, binary_exists("ghostrecon-definitely-not-installed"));
    }

    #[test]
    fn only_executable_files_count_as_installed() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let plain = tmp.path().join("plain-tool");
        let runnable = tmp.path().join("runnable-tool");
        fs::write(&plain, "#!/bin/sh\n").unwrap();
        fs::write(&runnable, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&plain, fs::Permissions::from_mode(0o644)).unwrap();
        fs::set_permissions(&runnable, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(false, binary_exists_in("plain-tool", tmp.path()));
        assert_eq!(true, binary_exists_in("runnable-tool", tmp.path()));
        assert_eq!(false, binary_exists_in("absent-tool", tmp.path()));
    }

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn sudo_user_wins_over_user() {
        let user = invoking_user_from(vars(&[("USER", "root"), ("SUDO_USER", "alice")])).unwrap();
        assert_eq!("alice", user);
    }

    #[test]
    fn blank_sudo_user_falls_back_to_user() {
        let user = invoking_user_from(vars(&[("SUDO_USER", "  "), ("USER", "bob")])).unwrap();
        assert_eq!("bob", user);
    }

    #[test]
    fn unknown_user_is_an_error() {
        assert!(matches!(invoking_user_from(vars(&[])), Err(Error::UnknownUser)));
        assert!(matches!(
            invoking_user_from(vars(&[("SUDO_USER", ""), ("USER", " ")])),
            Err(Error::UnknownUser)
        ));
    }
}
