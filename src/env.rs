//! Translation environment
//!
//! Everything a single translation call reads: the Ingress being
//! translated and a name-keyed map of the secrets in its namespace. The
//! environment is assembled once per call, either from secrets the caller
//! already holds or by listing them from the cluster, and the translation
//! passes then run over it without further I/O.

use std::collections::HashMap;

use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::api::networking::v1::{Ingress, IngressTLS};
use kube::api::{Api, ListParams};
use kube::Client;
use tracing::info;

use crate::{Error, Result};

/// Inputs for one translation call
#[derive(Clone, Debug, Default)]
pub struct Env {
    /// The Ingress being translated
    pub ingress: Ingress,
    /// Secrets from the Ingress namespace, keyed by name
    pub secrets_map: HashMap<String, Secret>,
}

impl Env {
    /// Build an environment from prefetched secrets
    ///
    /// Secrets without a name are dropped; they cannot be referenced from
    /// a TLS stanza anyway.
    pub fn new(ingress: Ingress, secrets: impl IntoIterator<Item = Secret>) -> Self {
        let secrets_map = secrets
            .into_iter()
            .filter_map(|s| s.metadata.name.clone().map(|name| (name, s)))
            .collect();
        Self {
            ingress,
            secrets_map,
        }
    }

    /// Build an environment by listing the Ingress namespace's secrets
    ///
    /// Errors from the list call are propagated unmodified as the
    /// fetch-layer error.
    pub async fn from_cluster(ingress: Ingress, client: Client) -> Result<Self> {
        let namespace = ingress
            .metadata
            .namespace
            .clone()
            .ok_or_else(|| Error::validation("ingress has no namespace"))?;

        let secrets: Api<Secret> = Api::namespaced(client, &namespace);
        let list = secrets.list(&ListParams::default()).await?;
        info!(
            namespace = %namespace,
            secrets = list.items.len(),
            "listed secrets for translation environment"
        );
        Ok(Self::new(ingress, list.items))
    }

    /// TLS stanzas on the Ingress, in spec order
    pub fn tls(&self) -> &[IngressTLS] {
        self.ingress
            .spec
            .as_ref()
            .and_then(|spec| spec.tls.as_deref())
            .unwrap_or(&[])
    }
}
