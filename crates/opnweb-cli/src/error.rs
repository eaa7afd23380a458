//! CLI errors with miette diagnostics and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use opnweb_core::CoreError;

/// Exit codes keyed to the error taxonomy, so scripts can branch on the
/// outcome without parsing stderr.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 5;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("missing {field}")]
    #[diagnostic(
        code(opnweb::missing_config),
        help(
            "Pass --{field}, set OPNWEB_{env}, or add `{field}` to a profile in {path}"
        )
    )]
    MissingConfig {
        field: &'static str,
        env: &'static str,
        path: String,
    },

    #[error("invalid {field}: {reason}")]
    #[diagnostic(code(opnweb::invalid_config))]
    Validation { field: &'static str, reason: String },

    #[error("failed to load config file")]
    #[diagnostic(code(opnweb::config))]
    Config(#[source] Box<figment::Error>),

    #[error("{0}")]
    #[diagnostic(code(opnweb::appliance))]
    Core(#[from] CoreError),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingConfig { .. } | Self::Validation { .. } => exit_code::USAGE,
            Self::Config(_) => exit_code::GENERAL,
            Self::Core(core) => match core {
                CoreError::AuthenticationFailed { .. } | CoreError::Unauthenticated => {
                    exit_code::AUTH
                }
                CoreError::NotFound { .. } => exit_code::NOT_FOUND,
                CoreError::AlreadyExists { .. } => exit_code::CONFLICT,
                CoreError::MutationRejected { .. } => exit_code::REJECTED,
                CoreError::Transport(_) => exit_code::CONNECTION,
                CoreError::InvalidResourceId { .. } => exit_code::USAGE,
                _ => exit_code::GENERAL,
            },
        }
    }
}
