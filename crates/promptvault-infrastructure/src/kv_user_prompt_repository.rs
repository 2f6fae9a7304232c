//! Key-value backed user-added prompt store.
//!
//! Same persistence shape as the version store, under the fixed key
//! `user_added_prompts`. The duplicate rule differs: only the title takes
//! part in the suppression key.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use promptvault_core::error::{Result, VaultError};
use promptvault_core::user_prompt::{
    UserAddedPrompt, UserPromptDraft, UserPromptPatch, UserPromptRepository,
};

use crate::dto::{StoreEnvelope, UserPromptEnvelope};
use crate::storage::KeyValueStorage;

const DUPLICATE_WINDOW_MS: i64 = 60_000;

/// User-added prompt store over an injected [`KeyValueStorage`].
pub struct KvUserPromptRepository {
    storage: Arc<dyn KeyValueStorage>,
}

impl KvUserPromptRepository {
    const STORE_KEY: &'static str = "user_added_prompts";

    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    fn next_id(now: DateTime<Utc>) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}-{}", now.timestamp_millis(), &suffix[..8])
    }

    async fn load(&self) -> UserPromptEnvelope {
        match self.storage.get(Self::STORE_KEY).await {
            Ok(text) => StoreEnvelope::parse_or_empty(text.as_deref()),
            Err(e) => {
                tracing::warn!(error = %e, "user prompt store read failed, starting empty");
                UserPromptEnvelope::default()
            }
        }
    }

    async fn save(&self, envelope: &UserPromptEnvelope) -> Result<()> {
        self.storage.set(Self::STORE_KEY, &envelope.to_json()?).await
    }
}

#[async_trait]
impl UserPromptRepository for KvUserPromptRepository {
    async fn list(&self, parent_id: &str) -> Result<Vec<UserAddedPrompt>> {
        let envelope = self.load().await;
        let Some(bucket) = envelope.buckets.get(parent_id) else {
            return Ok(Vec::new());
        };

        let mut seen = HashSet::new();
        Ok(bucket
            .iter()
            .filter(|p| seen.insert(p.id.clone()))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: UserPromptDraft) -> Result<UserAddedPrompt> {
        if draft.parent_id.trim().is_empty() {
            return Err(VaultError::validation("parent_id is required"));
        }

        let now = Utc::now();
        let prompt = UserAddedPrompt {
            id: Self::next_id(now),
            parent_id: draft.parent_id,
            parent_title: draft.parent_title,
            title: draft.title,
            content: draft.content,
            variables: draft.variables,
            tags: draft.tags,
            memo: draft.memo,
            folder_id: draft.folder_id,
            folder_name: draft.folder_name,
            is_favorite: draft.is_favorite,
            created_at: now.to_rfc3339(),
            updated_at: now.to_rfc3339(),
        };

        let mut envelope = self.load().await;
        let bucket = envelope.buckets.entry(prompt.parent_id.clone()).or_default();

        // Title alone is the duplicate key here; content is not compared.
        let duplicate = bucket.iter().any(|existing| {
            existing.title == prompt.title
                && existing.created_within_window(now, DUPLICATE_WINDOW_MS)
        });
        if duplicate {
            debug!(parent_id = %prompt.parent_id, "suppressing duplicate prompt create");
            return Ok(prompt);
        }

        bucket.insert(0, prompt.clone());
        self.save(&envelope).await?;
        Ok(prompt)
    }

    async fn update(&self, prompt_id: &str, patch: UserPromptPatch) -> Result<UserAddedPrompt> {
        let mut envelope = self.load().await;

        let Some(prompt) = envelope
            .buckets
            .values_mut()
            .flat_map(|bucket| bucket.iter_mut())
            .find(|p| p.id == prompt_id)
        else {
            return Err(VaultError::not_found("user prompt", prompt_id));
        };

        prompt.apply_patch(patch);
        prompt.updated_at = Utc::now().to_rfc3339();
        let updated = prompt.clone();

        self.save(&envelope).await?;
        Ok(updated)
    }

    async fn delete(&self, prompt_id: &str) -> Result<()> {
        let mut envelope = self.load().await;

        let mut found = false;
        for bucket in envelope.buckets.values_mut() {
            let before = bucket.len();
            bucket.retain(|p| p.id != prompt_id);
            if bucket.len() != before {
                found = true;
                break;
            }
        }
        if !found {
            return Err(VaultError::not_found("user prompt", prompt_id));
        }

        self.save(&envelope).await
    }

    async fn reorder(&self, parent_id: &str, ordered: Vec<UserAddedPrompt>) -> Result<()> {
        let mut envelope = self.load().await;
        let bucket = envelope.buckets.entry(parent_id.to_string()).or_default();

        let mut stored_ids: Vec<&str> = bucket.iter().map(|p| p.id.as_str()).collect();
        let mut incoming_ids: Vec<&str> = ordered.iter().map(|p| p.id.as_str()).collect();
        stored_ids.sort_unstable();
        incoming_ids.sort_unstable();
        if stored_ids != incoming_ids {
            return Err(VaultError::validation(
                "reordered id set does not match the stored bucket",
            ));
        }

        *bucket = ordered;
        self.save(&envelope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::Duration;

    fn repository() -> KvUserPromptRepository {
        KvUserPromptRepository::new(Arc::new(MemoryStorage::new()))
    }

    fn draft(parent_id: &str, title: &str, content: &str) -> UserPromptDraft {
        UserPromptDraft {
            parent_id: parent_id.to_string(),
            parent_title: "Parent".to_string(),
            title: title.to_string(),
            content: content.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_requires_parent_id() {
        let repo = repository();
        let err = repo.create(draft("", "T", "C")).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_duplicate_keys_on_title_only() {
        let repo = repository();
        repo.create(draft("p1", "Same title", "one")).await.unwrap();
        // different content, same title: still suppressed
        repo.create(draft("p1", "Same title", "two")).await.unwrap();

        let listed = repo.list("p1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].content, "one");
    }

    #[tokio::test]
    async fn test_duplicate_allowed_after_window() {
        let repo = repository();
        let created = repo.create(draft("p1", "T", "C")).await.unwrap();

        // back-date the stored entry past the window
        let mut envelope = repo.load().await;
        for p in envelope.buckets.get_mut("p1").unwrap() {
            if p.id == created.id {
                p.created_at = (Utc::now() - Duration::seconds(120)).to_rfc3339();
            }
        }
        repo.save(&envelope).await.unwrap();

        repo.create(draft("p1", "T", "C")).await.unwrap();
        assert_eq!(repo.list("p1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = repository();
        let created = repo.create(draft("p1", "T", "C")).await.unwrap();

        let updated = repo
            .update(
                &created.id,
                UserPromptPatch {
                    is_favorite: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_favorite);

        repo.delete(&created.id).await.unwrap();
        assert!(repo.delete(&created.id).await.unwrap_err().is_not_found());
        assert!(repo
            .update(&created.id, UserPromptPatch::default())
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_reorder_applies_caller_order() {
        let repo = repository();
        repo.create(draft("p1", "A", "1")).await.unwrap();
        repo.create(draft("p1", "B", "2")).await.unwrap();

        let mut listed = repo.list("p1").await.unwrap();
        listed.reverse();
        let expected: Vec<String> = listed.iter().map(|p| p.id.clone()).collect();

        repo.reorder("p1", listed).await.unwrap();

        let after: Vec<String> = repo
            .list("p1")
            .await
            .unwrap()
            .iter()
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(after, expected);
    }

    #[tokio::test]
    async fn test_reorder_rejects_mismatched_id_set() {
        let repo = repository();
        repo.create(draft("p1", "A", "1")).await.unwrap();
        repo.create(draft("p1", "B", "2")).await.unwrap();

        let mut listed = repo.list("p1").await.unwrap();
        listed.pop(); // stale client lost an entry

        let err = repo.reorder("p1", listed).await.unwrap_err();
        assert!(err.is_validation());
        // nothing was dropped
        assert_eq!(repo.list("p1").await.unwrap().len(), 2);
    }
}
