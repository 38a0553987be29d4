//! gce-urlmap - translates Kubernetes Ingress routing into GCE URL maps
//!
//! The GCE L7 load balancer routes requests through a URL map: a two-level
//! graph of HostRules and PathMatchers. An Ingress describes the same
//! routing as a flat `host -> {path: backend}` table. This crate compiles
//! the flat form into the URL-map form, and validates the TLS secrets the
//! Ingress references so a frontend can install its certificates.
//!
//! Everything here is a pure, single-pass transform over inputs handed in
//! by the caller. Reconciling the compiled map against GCE and translating
//! the other resource kinds (backend services, health checks, forwarding
//! rules) belong to the surrounding controller, not to this crate.
//!
//! # Modules
//!
//! - [`routing`] - the abstract host/path routing specification
//! - [`urlmap`] - GCE URL-map resource types and the compiler producing them
//! - [`secrets`] - TLS secret validation for the frontend
//! - [`env`] - the translation environment (Ingress + prefetched secrets)
//! - [`naming`] - deterministic names for generated frontend resources
//! - [`resource`] - fully-qualified GCE resource paths
//! - [`translator`] - facade combining the URL-map and secret passes
//! - [`error`] - error types

#![deny(missing_docs)]

pub mod env;
pub mod error;
pub mod naming;
pub mod resource;
pub mod routing;
pub mod secrets;
pub mod translator;
pub mod urlmap;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;
