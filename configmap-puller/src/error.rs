//! Error handling in [`configmap_puller`][crate]
use std::path::PathBuf;

use thiserror::Error;

/// Possible errors while pulling a ConfigMap into a file
///
/// None of these are retried. They bubble up to `main`, which logs them
/// and exits with [`Error::exit_code`] so a supervisor can restart the process.
#[derive(Error, Debug)]
pub enum Error {
    /// The ConfigMap does not exist
    ///
    /// Treated as a misconfiguration rather than a transient condition.
    #[error("ConfigMap {name} in namespace {namespace} not found")]
    NotFound {
        /// Namespace that was queried
        namespace: String,
        /// Name that was queried
        name: String,
    },

    /// The apiserver answered with an error status other than not found
    #[error("Error getting ConfigMap {name} in namespace {namespace}: {message} ({code})")]
    Api {
        /// Namespace that was queried
        namespace: String,
        /// Name that was queried
        name: String,
        /// Status message from the apiserver
        message: String,
        /// Http status code
        code: u16,
    },

    /// The request never produced an apiserver status (transport, decoding)
    #[error("Failed to fetch ConfigMap {name} in namespace {namespace}: {source}")]
    Fetch {
        /// Namespace that was queried
        namespace: String,
        /// Name that was queried
        name: String,
        /// Underlying client error
        #[source]
        source: kube::Error,
    },

    /// Opening or writing the output file failed
    #[error("Could not write to {}: {source}", path.display())]
    Write {
        /// The output file
        path: PathBuf,
        /// Underlying io error
        #[source]
        source: std::io::Error,
    },

    /// The kubeconfig file could not be read or resolved
    #[error("Error loading kubeconfig {}: {source}", path.display())]
    Kubeconfig {
        /// Path passed on the command line
        path: PathBuf,
        /// Underlying config error
        #[source]
        source: kube::config::KubeconfigError,
    },

    /// In-cluster credentials could not be loaded
    #[error("Error loading in-cluster config: {0}")]
    InCluster(#[source] kube::config::InClusterError),

    /// The client could not be built from a resolved config
    #[error("Failed to create client: {0}")]
    Client(#[source] kube::Error),
}

/// Convenient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Process exit status for this error class
    ///
    /// `2` is left to clap for usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::NotFound { .. } => 3,
            Error::Api { .. } | Error::Fetch { .. } => 4,
            Error::Write { .. } => 5,
            Error::Kubeconfig { .. } | Error::InCluster(_) | Error::Client(_) => 6,
        }
    }
}
