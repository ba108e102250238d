use crate::config::ConfigError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// IndexError
///
/// Programmer-error class failures raised synchronously by view construction
/// and configuration. Absent keys are never errors; they resolve to a gap.
///

#[derive(Debug, ThisError)]
pub enum IndexError {
    #[error("invalid data: {message}")]
    InvalidData { message: String },

    #[error("invalid index: {message}")]
    InvalidIndex { message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl IndexError {
    pub(crate) fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_index(message: impl Into<String>) -> Self {
        Self::InvalidIndex {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Construct the error raised when a record lacks the key field.
    pub(crate) fn missing_key_field(field: &str) -> Self {
        Self::invalid_index(format!("key field '{field}' is not present on the record"))
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidData { .. } => ErrorClass::InvalidData,
            Self::InvalidIndex { .. } => ErrorClass::InvalidIndex,
            Self::InvalidArgument { .. } => ErrorClass::InvalidArgument,
            Self::Config(_) => ErrorClass::Config,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ErrorClass
/// Error taxonomy for caller-side classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvalidData,
    InvalidIndex,
    InvalidArgument,
    Config,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidData => "invalid_data",
            Self::InvalidIndex => "invalid_index",
            Self::InvalidArgument => "invalid_argument",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexConfig;

    #[test]
    fn class_prefixes_display() {
        let err = IndexError::missing_key_field("id");

        assert_eq!(err.class(), ErrorClass::InvalidIndex);
        assert_eq!(
            err.display_with_class(),
            "invalid_index: invalid index: key field 'id' is not present on the record"
        );
    }

    #[test]
    fn config_errors_convert() {
        let parse = IndexConfig::from_toml_str("key_field = ").expect_err("malformed toml");
        let err = IndexError::from(parse);

        assert_eq!(err.class(), ErrorClass::Config);
        assert!(err.display_with_class().starts_with("config: toml parse error"));
    }
}
