use derive_more::From;
use std::path::PathBuf;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
    // -- Setup
    CliUsage(String),
    EmptyTarget,
    UnknownUser,

    // -- Persistence
    Persist { path: PathBuf, source: std::io::Error },

    #[from]
    SystemTime(std::time::SystemTimeError),

    #[from]
    File(std::io::Error),

    #[from]
    Reqwest(reqwest::Error),

    #[from]
    SerdeJson(serde_json::Error),

    #[from]
    Tracing(tracing::subscriber::SetGlobalDefaultError),
}

// region:    --- Error Boilerplate

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
