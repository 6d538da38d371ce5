use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("missing required configuration field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

/// Failures of the sound cue. None of these ever reach the toast's caller:
/// the audio gate logs them and carries on, so they are not part of [`Error`].
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to read sound cue {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sound cue could not be decoded: {0}")]
    Decode(String),
    #[error("audio output unavailable: {0}")]
    Output(String),
    #[error("playback thread is gone")]
    Disconnected,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification backend failed")]
    Backend,
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, Error, NotifyError};

    #[test]
    fn invalid_field_names_the_field() {
        let err = Error::from(ConfigError::InvalidField {
            field: "sound.volume",
            message: "out of range".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "invalid configuration for sound.volume: out of range"
        );
    }

    #[test]
    fn notification_failures_convert_transparently() {
        let err = Error::from(NotifyError::Backend);
        assert!(matches!(err, Error::Notify(NotifyError::Backend)));
        assert_eq!(err.to_string(), "notification backend failed");
    }
}
