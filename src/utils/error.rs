use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExpandError {
    #[error("Missing credential: no API token in the environment or the token file")]
    MissingCredential,

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Malformed record {line:?}: {reason}")]
    MalformedRecord { line: String, reason: String },

    #[error("Remote expand call failed: {message}")]
    RemoteError { message: String },

    #[error("Failed to write output {path}: {source}")]
    OutputWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Input,
    Network,
    Output,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ExpandError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExpandError::MissingCredential
            | ExpandError::ConfigError { .. }
            | ExpandError::InvalidConfigValueError { .. }
            | ExpandError::MissingConfigError { .. } => ErrorCategory::Config,
            ExpandError::InputNotFound { .. } => ErrorCategory::Input,
            ExpandError::MalformedRecord { .. } | ExpandError::ProcessingError { .. } => {
                ErrorCategory::Data
            }
            ExpandError::RemoteError { .. } | ExpandError::ApiError(_) => ErrorCategory::Network,
            ExpandError::OutputWriteError { .. } | ExpandError::CsvError(_) => {
                ErrorCategory::Output
            }
            ExpandError::IoError(_) | ExpandError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Config => ErrorSeverity::Critical,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input
            | ErrorCategory::Data
            | ErrorCategory::Output
            | ErrorCategory::System => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ExpandError::MissingCredential => {
                "Set the token environment variable or create the token file".to_string()
            }
            ExpandError::InputNotFound { path } => {
                format!("Check that the input file exists: {}", path)
            }
            ExpandError::MalformedRecord { .. } => {
                "Fix or remove the malformed line from the input file".to_string()
            }
            ExpandError::RemoteError { .. } | ExpandError::ApiError(_) => {
                "Check network connectivity, the API base URL, and the token".to_string()
            }
            ExpandError::OutputWriteError { path, .. } => {
                format!(
                    "Make sure the output directory for {} exists and is writable",
                    path
                )
            }
            ExpandError::ConfigError { .. }
            | ExpandError::InvalidConfigValueError { .. }
            | ExpandError::MissingConfigError { .. } => {
                "Review the configuration values and try again".to_string()
            }
            _ => "Check the logs for details and retry the run".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ExpandError::MissingCredential => {
                "No API token found: set the environment variable or create the token file"
                    .to_string()
            }
            ExpandError::InputNotFound { path } => format!("Input file not found: {}", path),
            ExpandError::MalformedRecord { line, reason } => {
                format!("Input line could not be parsed ({}): {:?}", reason, line)
            }
            ExpandError::RemoteError { message } => format!("The expand API failed: {}", message),
            ExpandError::ApiError(e) => format!("The expand API request failed: {}", e),
            ExpandError::OutputWriteError { path, .. } => {
                format!("Could not write the output file: {}", path)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExpandError>;
