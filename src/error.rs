//! Error types for URL-map translation

use thiserror::Error;

/// Main error type for translation operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Kubernetes API error from the secret prefetch
    #[error("kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// The Ingress references a secret that is not in the environment
    #[error("secret {0:?} does not exist")]
    SecretNotFound(String),

    /// A referenced secret carries no certificate data
    #[error("secret {0:?} does not specify cert as string data")]
    SecretMissingCert(String),

    /// A referenced secret carries no private-key data
    #[error("secret {0:?} does not specify private key as string data")]
    SecretMissingKey(String),

    /// Malformed translation input
    #[error("validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Create a validation error with the given message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Name of the secret this error is about, if any
    pub fn secret_name(&self) -> Option<&str> {
        match self {
            Self::SecretNotFound(name)
            | Self::SecretMissingCert(name)
            | Self::SecretMissingKey(name) => Some(name),
            _ => None,
        }
    }
}
