//! Abstract host/path routing specification
//!
//! The flat form of Ingress routing: an ordered list of hosts, each with
//! an ordered list of path-to-backend mappings, plus the default backend
//! serving anything no rule matches. The upstream controller builds this
//! from the Ingress resource; the [`urlmap`](crate::urlmap) compiler
//! consumes it.
//!
//! Order is significant everywhere and is preserved into the compiled URL
//! map. That is a determinism requirement for stable diffs against GCE,
//! not a routing-precedence one: GCE resolves overlapping paths by
//! longest prefix on its own.

use serde::{Deserialize, Serialize};

/// A named service backend
///
/// Opaque to the compiler: whatever derived the name (service, node port,
/// NEG) has already happened upstream. The name must be stable for the
/// lifetime of the backend, since it anchors the backend-service resource
/// path.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Backend {
    /// Stable backend-service name
    pub name: String,
}

impl Backend {
    /// Create a backend reference
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Stable name anchoring the backend-service resource path
    pub fn backend_name(&self) -> &str {
        &self.name
    }
}

/// A single path pattern mapped to a backend
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PathRule {
    /// Path prefix or pattern, e.g. `/api/*`
    pub path: String,
    /// Backend serving this path
    pub backend: Backend,
}

impl PathRule {
    /// Create a path rule
    pub fn new(path: impl Into<String>, backend: Backend) -> Self {
        Self {
            path: path.into(),
            backend,
        }
    }
}

/// All path rules for one hostname, in input order
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HostRule {
    /// Hostname; may be a wildcard pattern like `*.example.com`
    pub hostname: String,
    /// Ordered path rules for this host
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<PathRule>,
}

impl HostRule {
    /// Create a host rule
    pub fn new(hostname: impl Into<String>, paths: Vec<PathRule>) -> Self {
        Self {
            hostname: hostname.into(),
            paths,
        }
    }
}

/// The routing an Ingress asks for, in flat host -> path -> backend form
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoutingSpec {
    /// Ordered host rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host_rules: Vec<HostRule>,
    /// Backend serving requests no host rule matches
    ///
    /// Required by the compiler; optional here because the upstream
    /// controller may fill it in after construction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_backend: Option<Backend>,
}

impl RoutingSpec {
    /// Create a routing spec with the given default backend
    pub fn new(default_backend: Backend) -> Self {
        Self {
            host_rules: Vec::new(),
            default_backend: Some(default_backend),
        }
    }

    /// Append a host rule, preserving insertion order
    pub fn with_host_rule(mut self, rule: HostRule) -> Self {
        self.host_rules.push(rule);
        self
    }
}
