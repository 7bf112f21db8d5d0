use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("TOML Parsing Error: {0}")]
    TomlParse(String),

    #[error("Input directory not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File Read Error: Path '{path}', Error: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory Read Error: Path '{path}', Error: {source}")]
    DirRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File Write Error: Path '{path}', Error: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory Creation Error: Path '{path}', Error: {source}")]
    DirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Code Shaping Error: {0}")]
    Emit(String),

    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),

    #[error("Duration Parsing Error: {0}")]
    DurationParse(String),
}

impl From<parse_duration::parse::Error> for AppError {
    fn from(err: parse_duration::parse::Error) -> Self {
        AppError::DurationParse(err.to_string())
    }
}
