// Collection pipeline errors. Every variant is absorbed at its stage boundary.

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("cannot read {path}: {source}")]
    ConfigUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot spawn {program}: {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    CommandFailed {
        program: String,
        status: std::process::ExitStatus,
    },

    #[error("{program} did not finish within {timeout:?}")]
    CommandTimeout { program: String, timeout: Duration },

    #[error("unexpected output from {program}: {reason}")]
    UnexpectedOutput { program: String, reason: String },

    #[error("interface {iface}: cannot read {counter} counter: {reason}")]
    InterfaceRead {
        iface: String,
        counter: &'static str,
        reason: String,
    },

    #[error("collector task join: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl CollectError {
    /// Missing sources and vanished interfaces are routine; everything else is worth a warning.
    pub fn is_routine(&self) -> bool {
        matches!(
            self,
            CollectError::ConfigUnavailable { .. } | CollectError::InterfaceRead { .. }
        )
    }
}
