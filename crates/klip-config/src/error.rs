//! Errors from loading, saving and checking klip configuration files.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration error.
///
/// Never produced on the audio path; everything here happens before a
/// [`klip_dsp::KlipProcessor`] is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config '{path}': {source}")]
    ReadFile {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be written
    #[error("cannot write config '{path}': {source}")]
    WriteFile {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML or a field of the wrong type
    #[error("invalid config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML
    #[error("cannot serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// No factory or user preset with this name
    #[error("no preset named '{0}'")]
    PresetNotFound(String),

    /// A value is out of range or unrecognized
    #[error("invalid config: {0}")]
    Validation(#[from] crate::validation::ValidationError),

    /// Config or preset directory could not be created
    #[error("cannot create directory '{path}': {source}")]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// [`ConfigError::ReadFile`] for `path`.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::WriteFile`] for `path`.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::CreateDir`] for `path`.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn read_file_keeps_path() {
        let err = ConfigError::read_file("/some/klip.toml", mock_io_err());
        assert!(
            matches!(err, ConfigError::ReadFile { ref path, .. } if path == std::path::Path::new("/some/klip.toml"))
        );
    }

    #[test]
    fn write_and_create_dir_display() {
        let err = ConfigError::write_file("/a/b.toml", mock_io_err());
        let msg = err.to_string();
        assert!(msg.starts_with("cannot write config"), "got: {msg}");
        assert!(msg.contains("/a/b.toml"), "got: {msg}");

        let err = ConfigError::create_dir("/a/b", mock_io_err());
        assert!(err.to_string().contains("cannot create directory '/a/b'"));
    }

    #[test]
    fn preset_not_found_display() {
        let err = ConfigError::PresetNotFound("loud".to_string());
        assert_eq!(err.to_string(), "no preset named 'loud'");
    }

    #[test]
    fn validation_wraps_message() {
        let err: ConfigError = ValidationError::NotPositive {
            param: "engine.dc_cutoff_hz".to_string(),
            value: 0.0,
        }
        .into();
        let msg = err.to_string();
        assert!(msg.starts_with("invalid config:"), "got: {msg}");
        assert!(msg.contains("engine.dc_cutoff_hz"), "got: {msg}");
    }

    #[test]
    fn io_variants_expose_source() {
        assert!(ConfigError::read_file("/x", mock_io_err()).source().is_some());
        assert!(ConfigError::write_file("/x", mock_io_err()).source().is_some());
        assert!(ConfigError::create_dir("/x", mock_io_err()).source().is_some());
        assert!(ConfigError::PresetNotFound("p".to_string()).source().is_none());
    }
}
