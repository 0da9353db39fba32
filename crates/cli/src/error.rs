//! Error types for riftctl

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Tracker not found: {0}")]
    DeviceNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Tracker rejected sensor flags: requested {requested:#04x}, device reports {actual:#04x}")]
    FlagsRejected { requested: u8, actual: u8 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::DeviceNotFound(_) => 2,
            Self::InvalidConfiguration(_) | Self::JsonError(_) | Self::YamlError(_) => 4,
            Self::FlagsRejected { .. } => 5,
            Self::IoError(_) => 1,
        }
    }
}

/// Exit code for any error bubbling out of a command.
pub fn exit_code(error: &anyhow::Error) -> u8 {
    error.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = anyhow::Error::from(CliError::DeviceNotFound("2833:0001".to_string()));
        assert_eq!(exit_code(&err), 2);

        let err = anyhow::Error::from(CliError::InvalidConfiguration("raw_scale".to_string()));
        assert_eq!(exit_code(&err), 4);

        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_context_keeps_exit_code() {
        use anyhow::Context;

        let result: Result<(), CliError> = Err(CliError::DeviceNotFound("2833:0001".to_string()));
        let Err(err) = result.context("Opening tracker") else {
            return;
        };
        assert_eq!(exit_code(&err), 2);
    }
}
