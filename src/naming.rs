//! Deterministic names for generated frontend resources
//!
//! The GCE API associates a HostRule with its PathMatcher by name, and
//! resource names accept a narrower character set than hostnames do (a
//! hostname may be a wildcard pattern). Path-matcher names are therefore
//! derived by hashing the hostname bytes and rendering the digest as hex
//! under a constant prefix.
//!
//! Identical hostnames always produce identical names, across calls and
//! processes: the digest has no salt and no time component. Distinct
//! hostnames colliding is accepted as a negligible-probability risk and
//! not mitigated.

/// Prefix tag for generated path-matcher names
const PATH_MATCHER_PREFIX: &str = "host";

/// Width in bytes of the full digest backing a path-matcher name
const DIGEST_WIDTH: usize = 16;

/// Capability producing the top-level URL-map resource name
///
/// The controller owns frontend naming (it derives names from the Ingress
/// and its naming scheme version); the compiler only consumes the name.
pub trait FrontendNamer {
    /// Name of the URL map for the Ingress being translated
    fn url_map_name(&self) -> String;
}

/// Derives a path-matcher name from a hostname
pub trait PathMatcherNamer {
    /// Name for the path matcher serving the given hostname
    ///
    /// Must be pure and deterministic: equal hostnames yield equal names.
    fn name_for(&self, hostname: &str) -> String;
}

/// Frontend namer returning a precomputed URL-map name
#[derive(Clone, Debug)]
pub struct PrecomputedFrontendNamer {
    url_map: String,
}

impl PrecomputedFrontendNamer {
    /// Wrap an already-derived URL-map name
    pub fn new(url_map: impl Into<String>) -> Self {
        Self {
            url_map: url_map.into(),
        }
    }
}

impl FrontendNamer for PrecomputedFrontendNamer {
    fn url_map_name(&self) -> String {
        self.url_map.clone()
    }
}

/// Hash-based path-matcher namer
///
/// Renders `"host"` followed by the lowercase hex MD5 digest of the
/// hostname bytes. The rendered digest width is a construction parameter:
/// shortening it trades collision resistance for name length without
/// changing the [`PathMatcherNamer`] contract.
#[derive(Clone, Debug)]
pub struct HashedHostNamer {
    digest_width: usize,
}

impl HashedHostNamer {
    /// Namer rendering the full digest
    pub fn new() -> Self {
        Self {
            digest_width: DIGEST_WIDTH,
        }
    }

    /// Namer rendering only the first `width` bytes of the digest
    ///
    /// `width` is clamped to the full digest width.
    pub fn with_digest_width(width: usize) -> Self {
        Self {
            digest_width: width.clamp(1, DIGEST_WIDTH),
        }
    }
}

impl Default for HashedHostNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl PathMatcherNamer for HashedHostNamer {
    fn name_for(&self, hostname: &str) -> String {
        let digest = md5::compute(hostname.as_bytes());
        let hex = format!("{:x}", digest);
        format!("{}{}", PATH_MATCHER_PREFIX, &hex[..self.digest_width * 2])
    }
}
