//! Error taxonomy shared by the caches and the model registry.
//!
//! External collaborators (asset loaders, playback engines, renderers) report
//! failures as `anyhow::Error`. The core wraps those into [`CacheError`] so
//! callers can match on *why* an operation failed without caring about the
//! collaborator behind it.

/// Failures surfaced by the caches and the registry.
///
/// Every failure is synchronous and reported to the immediate caller. Nothing
/// is retried and a failed load never occupies its key.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The key has no backing asset.
    #[error("resource not found: {key}")]
    ResourceNotFound { key: String },

    /// The asset exists but the loader (or the derived-object constructor)
    /// rejected it.
    #[error("failed to load {key}: {source}")]
    LoadFailure {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// A freshly loaded resource collided with an entry already cached under
    /// the same key. Cached resources are never replaced.
    #[error("resource already cached: {key}")]
    DuplicateResource { key: String },

    /// The operation was invoked outside the lifecycle window it is valid in.
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    /// A draw was requested while the registry holds no models.
    #[error("rendering resources are not acquired (requested {kind})")]
    NotAcquired { kind: String },

    /// The renderer rejected a draw call.
    #[error("failed to draw {kind}: {source}")]
    DrawFailure {
        kind: String,
        #[source]
        source: anyhow::Error,
    },
}

impl CacheError {
    pub(crate) fn not_found(key: &impl std::fmt::Debug) -> Self {
        Self::ResourceNotFound {
            key: format!("{key:?}"),
        }
    }

    pub(crate) fn load_failure(key: &impl std::fmt::Debug, source: anyhow::Error) -> Self {
        Self::LoadFailure {
            key: format!("{key:?}"),
            source,
        }
    }

    pub(crate) fn duplicate(key: &impl std::fmt::Debug) -> Self {
        Self::DuplicateResource {
            key: format!("{key:?}"),
        }
    }
}

pub type Result<T, E = CacheError> = std::result::Result<T, E>;
