//! Key-value backed version store.
//!
//! Persists the whole namespace as one JSON document under the fixed key
//! `prompt_versions`, mapping each parent template id to its ordered list
//! of versions. All mutations are read-modify-write over that document;
//! the single-writer cooperative model of the store contract applies.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use promptvault_core::error::{Result, VaultError};
use promptvault_core::version::{Version, VersionDraft, VersionPatch, VersionRepository};

use crate::dto::{StoreEnvelope, VersionEnvelope};
use crate::storage::KeyValueStorage;

/// Wall-clock window inside which a same-parent `(title, content)` match
/// counts as an accidental duplicate.
const DUPLICATE_WINDOW_MS: i64 = 60_000;

/// Version store over an injected [`KeyValueStorage`].
pub struct KvVersionRepository {
    storage: Arc<dyn KeyValueStorage>,
}

impl KvVersionRepository {
    const STORE_KEY: &'static str = "prompt_versions";

    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Globally unique id: epoch millis plus a random suffix.
    fn next_id(now: DateTime<Utc>) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}-{}", now.timestamp_millis(), &suffix[..8])
    }

    /// Fail-open read of the whole namespace.
    async fn load(&self) -> VersionEnvelope {
        match self.storage.get(Self::STORE_KEY).await {
            Ok(text) => StoreEnvelope::parse_or_empty(text.as_deref()),
            Err(e) => {
                tracing::warn!(error = %e, "version store read failed, starting empty");
                VersionEnvelope::default()
            }
        }
    }

    async fn save(&self, envelope: &VersionEnvelope) -> Result<()> {
        self.storage.set(Self::STORE_KEY, &envelope.to_json()?).await
    }
}

#[async_trait]
impl VersionRepository for KvVersionRepository {
    async fn list(&self, parent_id: &str) -> Result<Vec<Version>> {
        let envelope = self.load().await;
        let Some(bucket) = envelope.buckets.get(parent_id) else {
            return Ok(Vec::new());
        };

        let mut seen = HashSet::new();
        Ok(bucket
            .iter()
            .filter(|v| seen.insert(v.id.clone()))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: VersionDraft) -> Result<Version> {
        if draft.parent_id.trim().is_empty() {
            return Err(VaultError::validation("parent_id is required"));
        }

        let now = Utc::now();
        let version = Version {
            id: Self::next_id(now),
            parent_id: draft.parent_id,
            title: draft.title,
            content: draft.content,
            variables: draft.variables,
            tags: draft.tags,
            folder: draft.folder,
            memo: draft.memo,
            created_at: now.to_rfc3339(),
            updated_at: now.to_rfc3339(),
            is_history: draft.is_history,
            is_current_version: draft.is_current_version,
        };

        let mut envelope = self.load().await;
        let bucket = envelope.buckets.entry(version.parent_id.clone()).or_default();

        if version.is_history {
            // History snapshots bypass the duplicate check and append
            // chronologically.
            bucket.push(version.clone());
        } else {
            let duplicate = bucket.iter().any(|existing| {
                existing.title == version.title
                    && existing.content == version.content
                    && existing.created_within_window(now, DUPLICATE_WINDOW_MS)
            });
            if duplicate {
                debug!(parent_id = %version.parent_id, "suppressing duplicate version create");
                return Ok(version);
            }
            bucket.insert(0, version.clone());
        }

        self.save(&envelope).await?;
        Ok(version)
    }

    async fn update(&self, version_id: &str, patch: VersionPatch) -> Result<Version> {
        let mut envelope = self.load().await;

        let Some(version) = envelope
            .buckets
            .values_mut()
            .flat_map(|bucket| bucket.iter_mut())
            .find(|v| v.id == version_id)
        else {
            return Err(VaultError::not_found("version", version_id));
        };

        version.apply_patch(patch);
        version.updated_at = Utc::now().to_rfc3339();
        let updated = version.clone();

        self.save(&envelope).await?;
        Ok(updated)
    }

    async fn promote(&self, parent_id: &str, version_id: &str) -> Result<()> {
        let mut envelope = self.load().await;

        let Some(bucket) = envelope.buckets.get_mut(parent_id) else {
            return Err(VaultError::not_found("version bucket", parent_id));
        };
        let Some(promoted) = bucket.iter().find(|v| v.id == version_id).cloned() else {
            return Err(VaultError::not_found("version", version_id));
        };

        let before = bucket.len();
        bucket.retain(|v| !(v.title == promoted.title && v.content == promoted.content));
        for v in bucket.iter_mut() {
            v.is_current_version = false;
        }
        debug!(
            parent_id,
            removed = before - bucket.len(),
            "removed promoted version and its twins"
        );

        self.save(&envelope).await
    }

    async fn delete(&self, version_id: &str) -> Result<()> {
        let mut envelope = self.load().await;

        let mut found = false;
        for bucket in envelope.buckets.values_mut() {
            let before = bucket.len();
            bucket.retain(|v| v.id != version_id);
            if bucket.len() != before {
                found = true;
                break;
            }
        }
        if !found {
            return Err(VaultError::not_found("version", version_id));
        }

        self.save(&envelope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::Duration;

    fn repository() -> KvVersionRepository {
        KvVersionRepository::new(Arc::new(MemoryStorage::new()))
    }

    fn draft(parent_id: &str, title: &str, content: &str) -> VersionDraft {
        VersionDraft {
            parent_id: parent_id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            ..Default::default()
        }
    }

    /// Writes a bucket whose single entry was created `age_secs` ago.
    async fn seed_backdated(repo: &KvVersionRepository, parent_id: &str, age_secs: i64) {
        let created = repo.create(draft(parent_id, "T", "C")).await.unwrap();
        let backdated = (Utc::now() - Duration::seconds(age_secs)).to_rfc3339();

        let mut envelope = repo.load().await;
        for v in envelope.buckets.get_mut(parent_id).unwrap() {
            if v.id == created.id {
                v.created_at = backdated.clone();
            }
        }
        repo.save(&envelope).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_requires_parent_id() {
        let repo = repository();
        let err = repo.create(draft("", "T", "C")).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let repo = repository();
        let a = repo.create(draft("p1", "A", "1")).await.unwrap();
        let b = repo.create(draft("p1", "B", "2")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_duplicate_create_suppressed_inside_window() {
        let repo = repository();
        repo.create(draft("p1", "T", "C")).await.unwrap();
        let second = repo.create(draft("p1", "T", "C")).await.unwrap();

        // the call still returns a version-shaped value
        assert_eq!(second.title, "T");
        assert_eq!(repo.list("p1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_create_allowed_after_window() {
        let repo = repository();
        seed_backdated(&repo, "p1", 120).await;

        repo.create(draft("p1", "T", "C")).await.unwrap();
        assert_eq!(repo.list("p1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_history_bypasses_duplicate_check_and_appends() {
        let repo = repository();
        repo.create(draft("p1", "T", "C")).await.unwrap();

        let mut history = draft("p1", "T", "C");
        history.is_history = true;
        repo.create(history).await.unwrap();

        let listed = repo.list("p1").await.unwrap();
        assert_eq!(listed.len(), 2);
        // history at the tail, ordinary entry at the head
        assert!(!listed[0].is_history);
        assert!(listed[1].is_history);
    }

    #[tokio::test]
    async fn test_non_history_prepends() {
        let repo = repository();
        repo.create(draft("p1", "First", "1")).await.unwrap();
        repo.create(draft("p1", "Second", "2")).await.unwrap();

        let listed = repo.list("p1").await.unwrap();
        assert_eq!(listed[0].title, "Second");
        assert_eq!(listed[1].title, "First");
    }

    #[tokio::test]
    async fn test_list_missing_parent_is_empty() {
        let repo = repository();
        assert!(repo.list("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_dedups_by_id_first_occurrence_wins() {
        let repo = repository();
        let created = repo.create(draft("p1", "T", "C")).await.unwrap();

        // simulate a historical double-insert of the same id
        let mut envelope = repo.load().await;
        let twin = created.clone();
        envelope.buckets.get_mut("p1").unwrap().push(twin);
        repo.save(&envelope).await.unwrap();

        assert_eq!(repo.list("p1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_and_bumps_updated_at() {
        let repo = repository();
        let created = repo.create(draft("p1", "T", "C")).await.unwrap();

        let updated = repo
            .update(
                &created.id,
                VersionPatch {
                    memo: Some("note".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.memo.as_deref(), Some("note"));
        assert_eq!(updated.title, "T");

        let listed = repo.list("p1").await.unwrap();
        assert_eq!(listed[0].memo.as_deref(), Some("note"));
    }

    #[tokio::test]
    async fn test_update_missing_id_not_found() {
        let repo = repository();
        let err = repo
            .update("missing-id", VersionPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_promote_removes_twins_and_clears_current_flags() {
        let repo = repository();
        seed_backdated(&repo, "p1", 120).await; // a "T"/"C" twin outside the window
        let target = repo.create(draft("p1", "T", "C")).await.unwrap();

        let mut other = draft("p1", "Other", "Z");
        other.is_current_version = true;
        repo.create(other).await.unwrap();

        repo.promote("p1", &target.id).await.unwrap();

        let listed = repo.list("p1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Other");
        assert!(listed.iter().all(|v| !v.is_current_version));
    }

    #[tokio::test]
    async fn test_promote_missing_parent_or_version() {
        let repo = repository();
        assert!(repo.promote("p1", "v1").await.unwrap_err().is_not_found());

        repo.create(draft("p1", "T", "C")).await.unwrap();
        assert!(repo.promote("p1", "v1").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repository();
        let created = repo.create(draft("p1", "T", "C")).await.unwrap();

        repo.delete(&created.id).await.unwrap();
        assert!(repo.list("p1").await.unwrap().is_empty());

        let err = repo.delete(&created.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_corrupt_store_reads_as_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set("prompt_versions", "{{ not json").await.unwrap();
        let repo = KvVersionRepository::new(storage);

        assert!(repo.list("p1").await.unwrap().is_empty());

        // a write replaces the corrupt document
        repo.create(draft("p1", "T", "C")).await.unwrap();
        assert_eq!(repo.list("p1").await.unwrap().len(), 1);
    }
}
