//! Fully-qualified GCE resource paths
//!
//! GCE resources are addressed by paths of the form
//! `global/backendServices/<name>` (optionally scoped under
//! `projects/<project>/`). The URL-map compiler links every path rule and
//! the default route to a backend service through such a path.
//!
//! A [`ResourceTemplate`] fixes the project scope, resource kind, and
//! location once, and every resolution builds a fresh [`ResourceId`]
//! value. Nothing here is mutated in place across resolutions, so
//! concurrent translations can share a template freely.

use serde::{Deserialize, Serialize};

/// Resource kind under which GCE exposes backend services
pub const BACKEND_SERVICES: &str = "backendServices";

/// Location scope of a GCE resource
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Location {
    /// Globally scoped (the L7 load balancer frontend)
    #[default]
    Global,
    /// Scoped to a region
    Region(String),
    /// Scoped to a zone
    Zone(String),
}

/// Identity of a single GCE resource
///
/// An immutable value: build one per resolution instead of reusing a
/// mutable key across iterations.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    /// Project scope; empty for project-relative paths
    pub project: String,
    /// Resource kind, e.g. `backendServices`
    pub resource: String,
    /// Location scope
    pub location: Location,
    /// Resource name
    pub name: String,
}

impl ResourceId {
    /// Create a globally scoped resource id
    pub fn global(
        project: impl Into<String>,
        resource: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            resource: resource.into(),
            location: Location::Global,
            name: name.into(),
        }
    }

    /// Path of this resource below its project, e.g.
    /// `global/backendServices/web` or `regions/us-west1/backendServices/web`
    pub fn resource_path(&self) -> String {
        match &self.location {
            Location::Global => format!("global/{}/{}", self.resource, self.name),
            Location::Region(region) => {
                format!("regions/{}/{}/{}", region, self.resource, self.name)
            }
            Location::Zone(zone) => format!("zones/{}/{}/{}", zone, self.resource, self.name),
        }
    }

    /// Path of this resource including its project scope, e.g.
    /// `projects/my-project/global/backendServices/web`
    pub fn relative_resource_name(&self) -> String {
        format!("projects/{}/{}", self.project, self.resource_path())
    }
}

/// Template for per-backend resource ids
///
/// Fixes project, resource kind, and location; [`resolve`](Self::resolve)
/// substitutes the name and returns a fresh [`ResourceId`] each call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceTemplate {
    project: String,
    resource: String,
    location: Location,
}

impl ResourceTemplate {
    /// Create a template for globally scoped resources
    pub fn new(project: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            resource: resource.into(),
            location: Location::Global,
        }
    }

    /// Template for the backend-service links a URL map points at
    pub fn backend_services(project: impl Into<String>) -> Self {
        Self::new(project, BACKEND_SERVICES)
    }

    /// Scope the template to a region or zone
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Build the resource id for the given name
    pub fn resolve(&self, name: impl Into<String>) -> ResourceId {
        ResourceId {
            project: self.project.clone(),
            resource: self.resource.clone(),
            location: self.location.clone(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Story: Backend Service Links
    // =========================================================================

    #[test]
    fn story_global_backend_service_path() {
        let id = ResourceId::global("", BACKEND_SERVICES, "web");
        assert_eq!(id.resource_path(), "global/backendServices/web");
    }

    #[test]
    fn story_project_scoped_resource_name() {
        let id = ResourceId::global("my-project", BACKEND_SERVICES, "web");
        assert_eq!(
            id.relative_resource_name(),
            "projects/my-project/global/backendServices/web"
        );
    }

    #[test]
    fn story_regional_and_zonal_paths() {
        let regional = ResourceTemplate::backend_services("")
            .with_location(Location::Region("us-west1".to_string()))
            .resolve("web");
        assert_eq!(
            regional.resource_path(),
            "regions/us-west1/backendServices/web"
        );

        let zonal = ResourceTemplate::new("", "instanceGroups")
            .with_location(Location::Zone("us-west1-a".to_string()))
            .resolve("ig");
        assert_eq!(zonal.resource_path(), "zones/us-west1-a/instanceGroups/ig");
    }

    // =========================================================================
    // Story: Templates Hand Out Fresh Values
    // =========================================================================

    /// Story: resolving two names from one template yields two independent
    /// ids; neither resolution observes the other.
    #[test]
    fn story_template_resolutions_are_independent() {
        let template = ResourceTemplate::backend_services("");
        let a = template.resolve("svc-a");
        let b = template.resolve("svc-b");
        assert_eq!(a.resource_path(), "global/backendServices/svc-a");
        assert_eq!(b.resource_path(), "global/backendServices/svc-b");
        assert_eq!(a.name, "svc-a");

        // The template itself is unchanged and reusable
        assert_eq!(
            template.resolve("svc-a").resource_path(),
            a.resource_path()
        );
    }
}
