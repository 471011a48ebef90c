//! Error types for the shell.
//!
//! Launch failures get a typed enum so the loop driver can tell fatal from
//! recoverable; everything else goes through `anyhow`.

use std::io;

use thiserror::Error;

pub use anyhow::{Error, Result};

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("fork failure: could not create a child process: {0}")]
    Creation(#[source] io::Error),

    #[error("reap failure: waiting for child {pid} failed: {source}")]
    Reap {
        pid: libc::pid_t,
        #[source]
        source: io::Error,
    },

    #[error("exec failure: could not run {name}: {source}")]
    Exec {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid argument {0:?}: contains a NUL byte")]
    InvalidArgument(String),

    #[error("output failure: {0}")]
    Output(#[source] io::Error),
}

impl LaunchError {
    /// Only a failed exec is fatal: it happens in a forked child, which must
    /// exit instead of running the shell loop again.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LaunchError::Exec { .. })
    }
}
