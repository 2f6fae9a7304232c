//! User-added prompt repository trait.

use async_trait::async_trait;

use super::model::{UserAddedPrompt, UserPromptDraft, UserPromptPatch};
use crate::error::Result;

/// An abstract store of user-added prompts, keyed by parent template id.
///
/// Shares the version store's persistence shape and single-writer model,
/// but not its duplicate rule: creation is suppressed on matching title
/// alone, content is not part of the key.
#[async_trait]
pub trait UserPromptRepository: Send + Sync {
    /// Lists one parent's prompts in stored order. A missing parent yields
    /// an empty list.
    async fn list(&self, parent_id: &str) -> Result<Vec<UserAddedPrompt>>;

    /// Creates a prompt. Fails with `VaultError::Validation` if the draft
    /// has no parent id. A same-parent entry with an identical title
    /// created within the suppression window makes this call a
    /// persisted-state no-op.
    async fn create(&self, draft: UserPromptDraft) -> Result<UserAddedPrompt>;

    /// Shallow-merges `patch` over the prompt with this id, bumping
    /// `updated_at`. Fails with `VaultError::NotFound` if absent.
    async fn update(&self, prompt_id: &str, patch: UserPromptPatch) -> Result<UserAddedPrompt>;

    /// Removes the prompt with this id. Fails with `VaultError::NotFound`
    /// if absent.
    async fn delete(&self, prompt_id: &str) -> Result<()>;

    /// Replaces one parent's stored order with `ordered`.
    ///
    /// The new list must be a permutation of the stored one; an id set
    /// mismatch fails with `VaultError::Validation` so a stale client
    /// cannot silently drop entries.
    async fn reorder(&self, parent_id: &str, ordered: Vec<UserAddedPrompt>) -> Result<()>;
}
