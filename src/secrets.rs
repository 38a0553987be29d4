//! TLS secret validation for the load-balancer frontend
//!
//! An Ingress lists the TLS certificates for its hosts as references to
//! `kubernetes.io/tls` secrets. Before the frontend installs anything,
//! every referenced secret must exist in the environment and carry both
//! certificate and private-key data. Validation is a pure projection:
//! the returned secrets are in TLS-stanza order, which downstream code
//! relies on for certificate installation ordering.

use std::collections::HashMap;

use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::api::networking::v1::IngressTLS;

use crate::{Error, Result};

/// Key under which a kubernetes.io/tls secret stores its certificate
pub const TLS_CERT_KEY: &str = "tls.crt";

/// Key under which a kubernetes.io/tls secret stores its private key
pub const TLS_PRIVATE_KEY_KEY: &str = "tls.key";

/// Resolve and validate the secrets referenced by the given TLS stanzas
///
/// Returns the secrets in stanza order. Fails on the first stanza whose
/// secret is absent or incomplete; no partial result is returned.
pub fn validated_secrets(
    tls: &[IngressTLS],
    secrets_map: &HashMap<String, Secret>,
) -> Result<Vec<Secret>> {
    let mut ret = Vec::with_capacity(tls.len());
    for tls_spec in tls {
        let name = tls_spec
            .secret_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::validation("tls entry does not name a secret"))?;

        let secret = secrets_map
            .get(name)
            .ok_or_else(|| Error::SecretNotFound(name.to_string()))?;

        // Fail fast on the first missing field, no aggregation
        if !has_data(secret, TLS_CERT_KEY) {
            return Err(Error::SecretMissingCert(name.to_string()));
        }
        if !has_data(secret, TLS_PRIVATE_KEY_KEY) {
            return Err(Error::SecretMissingKey(name.to_string()));
        }
        ret.push(secret.clone());
    }
    Ok(ret)
}

/// True if the secret carries non-empty data under `key`
fn has_data(secret: &Secret, key: &str) -> bool {
    secret
        .data
        .as_ref()
        .and_then(|data| data.get(key))
        .is_some_and(|bytes| !bytes.0.is_empty())
}
