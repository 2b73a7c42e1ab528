//! Mirror a single ConfigMap key into a local file
//!
//! A [`Poller`] fetches the ConfigMap named by a [`WatchTarget`] on a fixed
//! interval, extracts one key from its `data` and rewrites the output file
//! whenever that value changes. It is meant to run as a sidecar next to a
//! process that reloads its configuration when the file changes.
//!
//! Every error is fatal. The poller never retries; it returns the error and
//! leaves restarting to whatever supervises the process.
//!
//! # Example
//!
//! ```rust,no_run
//! use configmap_puller::{FileSink, KubeSource, Poller, WatchTarget};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), configmap_puller::Error> {
//!     let client = kube::Client::try_default().await.map_err(configmap_puller::Error::Client)?;
//!     let target = WatchTarget::new("default", "traefik-rules", "rules.toml");
//!     let poller = Poller::new(target, KubeSource::new(client), FileSink::new("/tmp/rules.toml"));
//!     match poller.run().await {
//!         Ok(never) => match never {},
//!         Err(err) => Err(err),
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod poller;
pub mod sink;
pub mod source;
mod target;

pub use config::Opts;
pub use error::{Error, Result};
pub use poller::{PollOutcome, Poller};
pub use sink::{FileSink, Sink};
pub use source::{ConfigSource, KubeSource};
pub use target::WatchTarget;
