//! Version repository trait.
//!
//! Defines the interface for version history persistence, decoupling the
//! promote/dedup logic's callers from the storage mechanism.

use async_trait::async_trait;

use super::model::{Version, VersionDraft, VersionPatch};
use crate::error::Result;

/// An abstract store of version entries, keyed by parent template id.
///
/// # Concurrency
///
/// Implementations follow the single-writer cooperative model: operations
/// are read-check-write with no transaction boundary, so callers that need
/// true concurrency safety must serialize mutations per `parent_id`
/// externally.
#[async_trait]
pub trait VersionRepository: Send + Sync {
    /// Lists the versions of one parent, deduplicated by id (first
    /// occurrence wins). A missing parent yields an empty list.
    async fn list(&self, parent_id: &str) -> Result<Vec<Version>>;

    /// Creates a version entry.
    ///
    /// Fails with `VaultError::Validation` if the draft has no parent id.
    /// Unless the draft is marked `is_history`, a same-parent entry with
    /// identical title and content created within the suppression window
    /// makes this call a persisted-state no-op; the returned value is still
    /// version-shaped.
    async fn create(&self, draft: VersionDraft) -> Result<Version>;

    /// Shallow-merges `patch` over the version with this id, bumping
    /// `updated_at`. Fails with `VaultError::NotFound` if the id is absent
    /// from every parent.
    async fn update(&self, version_id: &str, patch: VersionPatch) -> Result<Version>;

    /// Applies the store half of a promotion: removes the promoted version
    /// and every same-parent entry sharing its `(title, content)`, then
    /// clears `is_current_version` on the remainder.
    ///
    /// Writing the promoted content to the parent template is the caller's
    /// half of the protocol; see `PromotionService` for the combined
    /// operation.
    async fn promote(&self, parent_id: &str, version_id: &str) -> Result<()>;

    /// Removes the version with this id from whichever parent holds it.
    /// Fails with `VaultError::NotFound` if absent.
    async fn delete(&self, version_id: &str) -> Result<()>;
}
