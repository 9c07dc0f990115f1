use std::path::PathBuf;

/// Errors that can occur while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file couldn't be read.
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file isn't valid JSON for [`Settings`](crate::Settings).
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}
