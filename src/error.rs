//! Error kinds for the bootstrap pipeline.
//!
//! Nothing is recovered locally: every error propagates with `?` to `main`,
//! which logs it and exits non-zero.

#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error("invalid decimal input: {0:?}")]
    InvalidDecimalInput(String),

    #[error("unrecognized network name: {0:?}")]
    UnrecognizedNetwork(String),

    #[error("no environment config for network {0:?}")]
    MissingEnvironmentConfig(String),

    #[error("malformed environment config for {scope}: {reason}")]
    InvalidConfigShape { scope: String, reason: String },

    #[error("{component} depends on {dependency}, which has no deployed address yet")]
    UnresolvedDependency {
        component: String,
        dependency: String,
    },

    #[error("remote call {call:?} failed: {reason}")]
    RemoteCallFailure { call: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type BootResult<T> = Result<T, BootError>;
