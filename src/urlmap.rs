//! GCE URL-map resources and the compiler that produces them
//!
//! A URL map routes a request in two steps: a HostRule matches the host
//! header and names a PathMatcher; the PathMatcher's PathRules map paths
//! to backend services. The API lets many hosts share one PathMatcher,
//! which buys deduplication at the price of update complexity: sharing
//! means a path change on one host fans out to every host referencing the
//! matcher.
//!
//! This compiler emits exactly one PathMatcher per input host rule, never
//! shared. Path changes on a host then touch a single matcher, which is
//! the frequent operation; the duplicated matchers for hosts with equal
//! path sets are accepted. PathMatchers that happen to describe identical
//! path sets across different hosts are deliberately not merged.
//!
//! Paths are emitted in input order. GCE resolves overlapping paths by
//! longest prefix on its own; the compiler does no specificity
//! reordering.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::naming::{FrontendNamer, PathMatcherNamer};
use crate::resource::ResourceTemplate;
use crate::routing::{Backend, RoutingSpec};
use crate::{Error, Result};

// =============================================================================
// URL-map Resource Types
// =============================================================================

/// GCE UrlMap resource
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UrlMap {
    /// Resource name
    pub name: String,
    /// Backend-service path serving requests no host rule matches
    pub default_service: String,
    /// Host-to-path-matcher bindings, in input order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host_rules: Vec<HostRule>,
    /// Path matchers, one per host rule, in input order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path_matchers: Vec<PathMatcher>,
}

/// Binding from a set of hosts to a named path matcher
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HostRule {
    /// Host patterns this rule matches
    pub hosts: Vec<String>,
    /// Name of the path matcher serving these hosts
    pub path_matcher: String,
}

/// Path rules for the hosts bound to this matcher
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PathMatcher {
    /// Matcher name, referenced by host rules
    pub name: String,
    /// Backend-service path for paths no rule matches
    pub default_service: String,
    /// Ordered path rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path_rules: Vec<PathRule>,
}

/// A set of path patterns routed to one backend service
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PathRule {
    /// Path patterns
    pub paths: Vec<String>,
    /// Backend-service path
    pub service: String,
}

// =============================================================================
// URL-map Compiler
// =============================================================================

/// Compiles a [`RoutingSpec`] into a GCE [`UrlMap`]
///
/// A single-pass, side-effect-free transform. The compiler borrows its
/// naming capabilities and builds a fresh resource id per backend
/// resolution, so independent translations may run concurrently against
/// shared namers and templates.
pub struct UrlMapCompiler<'a> {
    frontend_namer: &'a dyn FrontendNamer,
    path_matcher_namer: &'a dyn PathMatcherNamer,
    backend_resources: ResourceTemplate,
}

impl<'a> UrlMapCompiler<'a> {
    /// Create a compiler
    ///
    /// # Arguments
    /// * `frontend_namer` - supplies the URL-map resource name
    /// * `path_matcher_namer` - derives path-matcher names from hostnames
    /// * `backend_resources` - template for backend-service paths, applied
    ///   uniformly to the default backend and every path rule
    pub fn new(
        frontend_namer: &'a dyn FrontendNamer,
        path_matcher_namer: &'a dyn PathMatcherNamer,
        backend_resources: ResourceTemplate,
    ) -> Self {
        Self {
            frontend_namer,
            path_matcher_namer,
            backend_resources,
        }
    }

    /// Compile the routing spec into a URL map
    ///
    /// Emits one host-rule binding and one path matcher per input host
    /// rule, in input order. Host rules with equal hostnames each keep
    /// their own binding and matcher (with equal generated names); they
    /// are not merged.
    ///
    /// Fails fast on malformed input - a missing default backend or a
    /// backend with an empty name - and returns no partial map.
    pub fn compile(&self, spec: &RoutingSpec) -> Result<UrlMap> {
        let default_backend = spec
            .default_backend
            .as_ref()
            .ok_or_else(|| Error::validation("routing spec has no default backend"))?;
        let default_service = self.service_path(default_backend)?;

        let mut url_map = UrlMap {
            name: self.frontend_namer.url_map_name(),
            default_service,
            host_rules: Vec::with_capacity(spec.host_rules.len()),
            path_matchers: Vec::with_capacity(spec.host_rules.len()),
        };

        for host_rule in &spec.host_rules {
            let pm_name = self.path_matcher_namer.name_for(&host_rule.hostname);
            url_map.host_rules.push(HostRule {
                hosts: vec![host_rule.hostname.clone()],
                path_matcher: pm_name.clone(),
            });

            let mut path_matcher = PathMatcher {
                name: pm_name,
                default_service: url_map.default_service.clone(),
                path_rules: Vec::with_capacity(host_rule.paths.len()),
            };
            for rule in &host_rule.paths {
                path_matcher.path_rules.push(PathRule {
                    paths: vec![rule.path.clone()],
                    service: self.service_path(&rule.backend)?,
                });
            }
            url_map.path_matchers.push(path_matcher);
        }

        debug!(
            url_map = %url_map.name,
            host_rules = url_map.host_rules.len(),
            "compiled url map"
        );
        Ok(url_map)
    }

    /// Backend-service path for the given backend
    fn service_path(&self, backend: &Backend) -> Result<String> {
        let name = backend.backend_name();
        if name.is_empty() {
            return Err(Error::validation("backend has an empty name"));
        }
        Ok(self.backend_resources.resolve(name).resource_path())
    }
}
