//! Startup parameters and client construction
use std::{path::PathBuf, time::Duration};

use kube::{
    config::{Config, KubeConfigOptions, Kubeconfig},
    Client,
};

use crate::{Error, Result, WatchTarget};

/// Command line surface of the `configmap-puller` binary
///
/// Everything is fixed at startup.
#[derive(clap::Parser, Clone, Debug)]
#[command(name = "configmap-puller", version, about)]
pub struct Opts {
    /// Absolute path to the kubeconfig file; empty uses in-cluster credentials
    #[arg(long, default_value = "")]
    pub kubeconfig: String,
    /// Name of the ConfigMap to watch
    #[arg(long, env = "CONFIGMAP_NAME", default_value = "traefik-rules")]
    pub configmap_name: String,
    /// Namespace of the ConfigMap to watch
    #[arg(long, env = "CONFIGMAP_NAMESPACE", default_value = "default")]
    pub configmap_namespace: String,
    /// Key of the ConfigMap to read
    #[arg(long, env = "CONFIGMAP_KEY", default_value = "rules.toml")]
    pub configmap_key: String,
    /// Name of the file to write; it must already exist
    #[arg(long, env = "OUTFILE_NAME", default_value = "/tmp/rules.toml")]
    pub outfile_name: PathBuf,
    /// Seconds to sleep between polls
    #[arg(
        long,
        env = "POLL_INTERVAL_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval: u64,
}

impl Opts {
    /// The ConfigMap key these options point at
    pub fn target(&self) -> WatchTarget {
        WatchTarget::new(&self.configmap_namespace, &self.configmap_name, &self.configmap_key)
    }

    /// Time between polls
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    /// The kubeconfig path, unless it was left empty
    pub fn kubeconfig_path(&self) -> Option<&std::path::Path> {
        Some(self.kubeconfig.as_str())
            .filter(|p| !p.is_empty())
            .map(std::path::Path::new)
    }

    /// Build a client from the kubeconfig file, or from the pod's service account
    pub async fn client(&self) -> Result<Client> {
        let config = match self.kubeconfig_path() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading kubeconfig");
                let err = |source| Error::Kubeconfig {
                    path: path.to_owned(),
                    source,
                };
                let kubeconfig = Kubeconfig::read_from(path).map_err(err)?;
                Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                    .await
                    .map_err(err)?
            }
            None => {
                tracing::debug!("loading in-cluster config");
                Config::incluster().map_err(Error::InCluster)?
            }
        };
        Client::try_from(config).map_err(Error::Client)
    }
}
