use std::io;

use btk_core::{
    error::{ErrorKind, ToolkitError},
    image::ImageError,
};
use thiserror::Error;

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Toolkit(#[from] ToolkitError),

    #[error("No post URL given")]
    MissingUrl,

    #[error("Failed to access file: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    #[error("Failed to read config file: {source}")]
    ConfigParseFail {
        #[from]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config file: {source}")]
    ConfigSerializeFail {
        #[from]
        source: toml::ser::Error,
    },

    #[error("Could not find a config directory for this system. Set BTK_CONFIG_DIR instead")]
    NoConfigDir,

    #[error("Failed to write input to console: {source}")]
    DialoguerIOFail {
        #[from]
        source: dialoguer::Error,
    },

    #[error("Failed to save image: {source}")]
    ImageSaveFail {
        #[from]
        source: ImageError,
    },

    #[error("Failed to serialize result: {source}")]
    JsonSerializeFail {
        #[from]
        source: btk_common::serde_json::Error,
    },
}

impl CliError {
    /// Process exit code for this error.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Toolkit(e) => match e.kind() {
                ErrorKind::InvalidInput => 2,
                ErrorKind::NoHandlerFound => 3,
                ErrorKind::FetchError => 4,
                ErrorKind::ParseError => 5,
            },
            Self::MissingUrl => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod test {
    use btk_core::error::ToolkitError;

    use super::CliError;

    #[test]
    fn exit_codes_follow_error_kind() {
        let err = CliError::from(ToolkitError::NoHandlerFound {
            selector: String::from("https://example.com"),
        });
        assert_eq!(err.exit_code(), 3);

        let err = CliError::from(ToolkitError::InvalidInput {
            message: String::from("empty"),
        });
        assert_eq!(err.exit_code(), 2);

        assert_eq!(CliError::NoConfigDir.exit_code(), 1);
    }
}
