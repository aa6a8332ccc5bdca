//! CLI error type.

use std::fmt;

use tilepyramid::config::ConfigFileError;
use tilepyramid::pyramid::PyramidError;

/// Errors surfaced to the terminal.
#[derive(Debug)]
pub enum CliError {
    /// Invalid flag or configuration value.
    Config(String),
    /// The configuration file could not be loaded.
    ConfigFile(ConfigFileError),
    /// The pyramid run failed.
    Pyramid(PyramidError),
    /// Filesystem problem outside the pyramid run itself.
    Io(std::io::Error),
    /// The ctrl-c handler could not be installed.
    Signal(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "configuration error: {msg}"),
            CliError::ConfigFile(e) => write!(f, "{e}"),
            CliError::Pyramid(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "i/o error: {e}"),
            CliError::Signal(msg) => write!(f, "failed to install signal handler: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => e.source(),
            CliError::Pyramid(e) => e.source(),
            CliError::Io(e) => e.source(),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<PyramidError> for CliError {
    fn from(e: PyramidError) -> Self {
        CliError::Pyramid(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CliError::Config("zoom range is inverted".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: zoom range is inverted"
        );
    }

    #[test]
    fn test_pyramid_error_passes_through() {
        let err: CliError = PyramidError::Cancelled.into();
        assert_eq!(err.to_string(), "run cancelled");
    }
}
