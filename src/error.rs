//! Error types for the stratus command pipeline.
//!
//! Each stage of an invocation owns one error type; `CliError` aggregates them
//! so the dispatch layer can report any failure and pick the exit status.

use thiserror::Error;

/// Process exit status for a successful invocation.
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit status for any failed invocation.
pub const EXIT_FAILURE: i32 = 1;

/// Configuration errors raised while building the session context.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Malformed API key: {0}")]
    MalformedApiKey(String),

    #[error("Invalid API endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Invalid output mode '{0}' (must be 'human', 'json', or 'yaml')")]
    InvalidOutput(String),

    #[error("Invalid HTTP settings: {0}")]
    InvalidHttp(String),

    #[error("Invalid logging configuration: {0}")]
    Logging(String),

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),

    #[error("Configuration validation failed:\n{}", .0.join("\n"))]
    Invalid(Vec<String>),
}

impl ConfigError {
    /// Fold the problems `StratusConfig::validate` collected into one error.
    /// A single problem keeps its own variant.
    pub fn from_validation(mut errors: Vec<ConfigError>) -> Self {
        if errors.len() == 1 {
            errors.swap_remove(0)
        } else {
            ConfigError::Invalid(errors.iter().map(ToString::to_string).collect())
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Load(err.to_string())
    }
}

/// Authentication gate failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error(
        "Missing credentials: export your API key as an environment variable or add `api_key` \
         to your config file, e.g.\n  export STRATUS_API_KEY='<api_key_from_your_account>'"
    )]
    MissingCredentials,
}

/// Malformed or insufficient command input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for '{field}': {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Failure of the single remote call an invocation makes.
#[derive(Debug, Error)]
#[error("{message}: {cause}")]
pub struct RemoteError {
    pub message: String,
    #[source]
    pub cause: Box<dyn std::error::Error + Send + Sync>,
}

impl RemoteError {
    pub fn new(
        message: impl Into<String>,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            cause: cause.into(),
        }
    }
}

/// No registered command matches the requested path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown command '{path}'. Run with --help for usage.")]
pub struct UnknownCommandError {
    pub path: String,
    pub help: String,
}

/// Command tree construction errors. These are programming errors in how the
/// tree is wired, surfaced before any argv is looked at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrarError {
    #[error("Command '{0}' is already registered")]
    DuplicateName(String),

    #[error("Parent command path '{0}' is not registered")]
    UnknownParent(String),
}

/// Any failure an invocation can report.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    UnknownCommand(#[from] UnknownCommandError),
}

impl CliError {
    /// Stable category name used in structured error output.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Config(_) => "config",
            CliError::Auth(_) => "auth",
            CliError::Validation(_) => "validation",
            CliError::Remote(_) => "remote",
            CliError::UnknownCommand(_) => "unknown_command",
        }
    }

    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }
}
