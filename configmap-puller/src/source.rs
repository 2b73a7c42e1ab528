//! Where ConfigMap data comes from
use std::{collections::BTreeMap, future::Future};

use k8s_openapi::api::core::v1::ConfigMap;
use kube::{Api, Client};

use crate::{Error, Result, WatchTarget};

/// Fetches the current `data` of the ConfigMap named by a [`WatchTarget`]
///
/// A missing object must surface as [`Error::NotFound`] so callers can tell it
/// apart from other failures.
pub trait ConfigSource {
    /// Fetch the data mapping of `(target.namespace, target.name)`
    fn fetch(&self, target: &WatchTarget) -> impl Future<Output = Result<BTreeMap<String, String>>>;
}

/// A [`ConfigSource`] backed by the Kubernetes apiserver
///
/// Every call is a fresh GET. No caching, no retries.
#[derive(Clone)]
pub struct KubeSource {
    client: Client,
}

impl KubeSource {
    /// Wrap a client
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ConfigSource for KubeSource {
    async fn fetch(&self, target: &WatchTarget) -> Result<BTreeMap<String, String>> {
        let api: Api<ConfigMap> = Api::namespaced(self.client.clone(), &target.namespace);
        let cm = api
            .get_opt(&target.name)
            .await
            .map_err(|err| match err {
                kube::Error::Api(resp) => Error::Api {
                    namespace: target.namespace.clone(),
                    name: target.name.clone(),
                    message: resp.message,
                    code: resp.code,
                },
                source => Error::Fetch {
                    namespace: target.namespace.clone(),
                    name: target.name.clone(),
                    source,
                },
            })?
            .ok_or_else(|| Error::NotFound {
                namespace: target.namespace.clone(),
                name: target.name.clone(),
            })?;
        tracing::debug!(
            namespace = %target.namespace,
            name = %target.name,
            resource_version = cm.metadata.resource_version.as_deref().unwrap_or_default(),
            "fetched configmap"
        );
        Ok(cm.data.unwrap_or_default())
    }
}
