use std::path::PathBuf;

/// Core error types for utilkit.
#[derive(Debug, thiserror::Error)]
pub enum UtilkitError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    #[error("Time error: {0}")]
    Time(#[from] TimeError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to write config {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("failed to read file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read from stdin: {0}")]
    ReadStdin(#[source] std::io::Error),

    #[error("failed to write file {}: {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to stdout: {0}")]
    WriteStdout(#[source] std::io::Error),

    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum TimeError {
    #[error("failed to parse time string '{input}' with layout '{layout}': {source}")]
    Parse {
        input: String,
        layout: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("time string '{input}' does not exist in the JST zone")]
    NonexistentLocalTime { input: String },
}

pub type Result<T> = std::result::Result<T, UtilkitError>;
