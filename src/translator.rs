//! Ingress-to-GCE translation facade
//!
//! Bundles the two independent passes over a translation [`Env`]:
//! - [`Translator::url_map`]: compile the routing spec into a URL map
//!   (delegates to [`UrlMapCompiler`](crate::urlmap::UrlMapCompiler))
//! - [`Translator::secrets`]: validate the TLS secrets the Ingress
//!   references (delegates to
//!   [`validated_secrets`](crate::secrets::validated_secrets))
//!
//! The passes share no state and either can be called on its own;
//! [`Translator::translate`] runs both and fails the whole call if either
//! fails.

use k8s_openapi::api::core::v1::Secret;

use crate::env::Env;
use crate::naming::{FrontendNamer, PathMatcherNamer};
use crate::resource::ResourceTemplate;
use crate::routing::RoutingSpec;
use crate::secrets::validated_secrets;
use crate::urlmap::{UrlMap, UrlMapCompiler};
use crate::Result;

/// Combined output of one translation call
#[derive(Clone, Debug)]
pub struct TranslatedIngress {
    /// The compiled URL map
    pub url_map: UrlMap,
    /// Validated TLS secrets, in TLS-stanza order
    pub secrets: Vec<Secret>,
}

impl TranslatedIngress {
    /// True if the Ingress terminates TLS
    pub fn has_tls(&self) -> bool {
        !self.secrets.is_empty()
    }
}

/// Translates one Ingress worth of routing and TLS material
///
/// Stateless aside from the borrowed naming capabilities and the
/// backend-resource template; every method is a pure pass over its
/// inputs.
pub struct Translator<'a> {
    frontend_namer: &'a dyn FrontendNamer,
    path_matcher_namer: &'a dyn PathMatcherNamer,
    backend_resources: ResourceTemplate,
}

impl<'a> Translator<'a> {
    /// Create a translator
    ///
    /// # Arguments
    /// * `frontend_namer` - supplies the URL-map resource name
    /// * `path_matcher_namer` - derives path-matcher names from hostnames
    /// * `backend_resources` - template for every backend-service path
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

    /// Validate the secrets referenced from the environment's Ingress
    ///
    /// Returns them in TLS-stanza order, for certificate installation.
    pub fn secrets(&self, env: &Env) -> Result<Vec<Secret>> {
        validated_secrets(env.tls(), &env.secrets_map)
    }

    /// Compile the routing spec into a URL map
    pub fn url_map(&self, spec: &RoutingSpec) -> Result<UrlMap> {
        UrlMapCompiler::new(
            self.frontend_namer,
            self.path_matcher_namer,
            self.backend_resources.clone(),
        )
        .compile(spec)
    }

    /// Run both passes; either failing fails the whole call
    pub fn translate(&self, env: &Env, spec: &RoutingSpec) -> Result<TranslatedIngress> {
        Ok(TranslatedIngress {
            url_map: self.url_map(spec)?,
            secrets: self.secrets(env)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{HashedHostNamer, PrecomputedFrontendNamer};
    use crate::routing::{Backend, HostRule, PathRule};
    use crate::secrets::{TLS_CERT_KEY, TLS_PRIVATE_KEY_KEY};
    use crate::Error;
    use k8s_openapi::api::networking::v1::{Ingress, IngressSpec, IngressTLS};
    use k8s_openapi::ByteString;
    use kube::api::ObjectMeta;

    fn tls_secret(name: &str) -> Secret {
        let data = [
            (TLS_CERT_KEY.to_string(), ByteString(b"cert".to_vec())),
            (TLS_PRIVATE_KEY_KEY.to_string(), ByteString(b"key".to_vec())),
        ];
        Secret {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            data: Some(data.into_iter().collect()),
            ..Default::default()
        }
    }

    fn ingress_with_tls(secret_names: &[&str]) -> Ingress {
        Ingress {
            metadata: ObjectMeta {
                name: Some("web".to_string()),
                namespace: Some("default".to_string()),
                ..Default::default()
            },
            spec: Some(IngressSpec {
                tls: Some(
                    secret_names
                        .iter()
                        .map(|name| IngressTLS {
                            secret_name: Some(name.to_string()),
                            ..Default::default()
                        })
                        .collect(),
                ),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn routing_spec() -> RoutingSpec {
        RoutingSpec::new(Backend::new("svc-default")).with_host_rule(HostRule::new(
            "foo.com",
            vec![PathRule::new("/a", Backend::new("svc-a"))],
        ))
    }

    // =========================================================================
    // Story: Both Passes Run Through the Facade
    // =========================================================================

    #[test]
    fn story_translate_combines_url_map_and_secrets() {
        let frontend = PrecomputedFrontendNamer::new("um-web");
        let paths = HashedHostNamer::new();
        let translator =
            Translator::new(&frontend, &paths, ResourceTemplate::backend_services(""));

        let env = Env::new(ingress_with_tls(&["web-tls"]), vec![tls_secret("web-tls")]);
        let output = translator.translate(&env, &routing_spec()).unwrap();

        assert_eq!(output.url_map.name, "um-web");
        assert_eq!(output.url_map.host_rules.len(), 1);
        assert_eq!(output.secrets.len(), 1);
        assert!(output.has_tls());
    }

    #[test]
    fn story_ingress_without_tls_translates_to_routing_only() {
        let frontend = PrecomputedFrontendNamer::new("um-web");
        let paths = HashedHostNamer::new();
        let translator =
            Translator::new(&frontend, &paths, ResourceTemplate::backend_services(""));

        let env = Env::new(ingress_with_tls(&[]), vec![]);
        let output = translator.translate(&env, &routing_spec()).unwrap();

        assert!(!output.has_tls());
        assert_eq!(
            output.url_map.default_service,
            "global/backendServices/svc-default"
        );
    }

    // =========================================================================
    // Story: Either Pass Failing Fails the Whole Call
    // =========================================================================

    #[test]
    fn story_bad_secret_fails_the_combined_call() {
        let frontend = PrecomputedFrontendNamer::new("um-web");
        let paths = HashedHostNamer::new();
        let translator =
            Translator::new(&frontend, &paths, ResourceTemplate::backend_services(""));

        let env = Env::new(ingress_with_tls(&["missing-tls"]), vec![]);
        let err = translator.translate(&env, &routing_spec()).unwrap_err();
        assert!(matches!(err, Error::SecretNotFound(_)));
    }

    /// Story: the passes stay independently callable; a broken secret does
    /// not block compiling the URL map on its own.
    #[test]
    fn story_url_map_pass_is_independent_of_secrets() {
        let frontend = PrecomputedFrontendNamer::new("um-web");
        let paths = HashedHostNamer::new();
        let translator =
            Translator::new(&frontend, &paths, ResourceTemplate::backend_services(""));

        let env = Env::new(ingress_with_tls(&["missing-tls"]), vec![]);
        assert!(translator.secrets(&env).is_err());
        assert!(translator.url_map(&routing_spec()).is_ok());
    }
}
