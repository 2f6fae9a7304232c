//! Promotion service.
//!
//! The store half of a promotion (`VersionRepository::promote`) and the
//! template write are separate steps in the wire protocol. This service
//! collapses them into one call with a safe ordering: snapshot the live
//! content first, then write the template, then mutate the version list. A
//! failure before the final step leaves the version list untouched.

use std::sync::Arc;

use crate::error::{Result, VaultError};
use crate::template::TemplateRepository;
use crate::version::{Version, VersionDraft, VersionRepository};

/// Promotes a version into its parent template in one call.
pub struct PromotionService {
    templates: Arc<dyn TemplateRepository>,
    versions: Arc<dyn VersionRepository>,
}

impl PromotionService {
    pub fn new(
        templates: Arc<dyn TemplateRepository>,
        versions: Arc<dyn VersionRepository>,
    ) -> Self {
        Self {
            templates,
            versions,
        }
    }

    /// Replaces the parent template's live content with the version's
    /// content, snapshotting the previous content as a history entry.
    ///
    /// Returns the promoted version. If the template write fails, the
    /// version list has not been touched; if the final list cleanup fails,
    /// the error carries the stranded state so the caller can retry
    /// `promote` alone.
    pub async fn promote_with_snapshot(
        &self,
        parent_id: &str,
        version_id: &str,
    ) -> Result<Version> {
        let template = self.templates.get(parent_id).await?;

        let promoted = self
            .versions
            .list(parent_id)
            .await?
            .into_iter()
            .find(|v| v.id == version_id)
            .ok_or_else(|| VaultError::not_found("version", version_id))?;

        // Snapshot before anything is overwritten. History entries bypass
        // the duplicate check and append at the tail.
        self.versions
            .create(VersionDraft {
                parent_id: parent_id.to_string(),
                title: template.title.clone(),
                content: template.content.clone(),
                variables: template.variables.clone(),
                is_history: true,
                ..Default::default()
            })
            .await?;

        self.templates
            .update_content(parent_id, &promoted.content, &promoted.variables)
            .await?;

        self.versions
            .promote(parent_id, version_id)
            .await
            .map_err(|e| {
                VaultError::data_access(format!(
                    "template '{parent_id}' now holds the promoted content but the \
                     version list cleanup failed; retry promote for version \
                     '{version_id}': {e}"
                ))
            })?;

        Ok(promoted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{Template, TemplateVariable};
    use crate::version::VersionPatch;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeTemplates {
        template: Mutex<Template>,
    }

    #[async_trait]
    impl TemplateRepository for FakeTemplates {
        async fn get(&self, template_id: &str) -> Result<Template> {
            let template = self.template.lock().unwrap().clone();
            if template.id == template_id {
                Ok(template)
            } else {
                Err(VaultError::not_found("template", template_id))
            }
        }

        async fn update_content(
            &self,
            _template_id: &str,
            content: &str,
            variables: &[TemplateVariable],
        ) -> Result<()> {
            let mut template = self.template.lock().unwrap();
            template.content = content.to_string();
            template.variables = variables.to_vec();
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeVersions {
        entries: Mutex<Vec<Version>>,
    }

    #[async_trait]
    impl VersionRepository for FakeVersions {
        async fn list(&self, parent_id: &str) -> Result<Vec<Version>> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|v| v.parent_id == parent_id)
                .cloned()
                .collect())
        }

        async fn create(&self, draft: VersionDraft) -> Result<Version> {
            let now = crate::time::now_rfc3339();
            let version = Version {
                id: format!("v{}", self.entries.lock().unwrap().len() + 1),
                parent_id: draft.parent_id,
                title: draft.title,
                content: draft.content,
                variables: draft.variables,
                tags: draft.tags,
                folder: draft.folder,
                memo: draft.memo,
                created_at: now.clone(),
                updated_at: now,
                is_history: draft.is_history,
                is_current_version: draft.is_current_version,
            };
            self.entries.lock().unwrap().push(version.clone());
            Ok(version)
        }

        async fn update(&self, version_id: &str, _patch: VersionPatch) -> Result<Version> {
            Err(VaultError::not_found("version", version_id))
        }

        async fn promote(&self, _parent_id: &str, version_id: &str) -> Result<()> {
            let mut entries = self.entries.lock().unwrap();
            let promoted = entries
                .iter()
                .find(|v| v.id == version_id)
                .cloned()
                .ok_or_else(|| VaultError::not_found("version", version_id))?;
            entries.retain(|v| !(v.title == promoted.title && v.content == promoted.content));
            for v in entries.iter_mut() {
                v.is_current_version = false;
            }
            Ok(())
        }

        async fn delete(&self, version_id: &str) -> Result<()> {
            Err(VaultError::not_found("version", version_id))
        }
    }

    #[tokio::test]
    async fn test_promote_with_snapshot() {
        let templates = Arc::new(FakeTemplates {
            template: Mutex::new(Template::new("p1", "My prompt", "old {a}")),
        });
        let versions = Arc::new(FakeVersions::default());
        versions
            .create(VersionDraft {
                parent_id: "p1".to_string(),
                title: "My prompt".to_string(),
                content: "new {b}".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let service = PromotionService::new(templates.clone(), versions.clone());
        let promoted = service.promote_with_snapshot("p1", "v1").await.unwrap();
        assert_eq!(promoted.content, "new {b}");

        // template now carries the promoted content
        let template = templates.get("p1").await.unwrap();
        assert_eq!(template.content, "new {b}");

        // the old live content survives as a history snapshot
        let remaining = versions.list("p1").await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining[0].is_history);
        assert_eq!(remaining[0].content, "old {a}");
    }

    #[tokio::test]
    async fn test_promote_with_snapshot_missing_version() {
        let templates = Arc::new(FakeTemplates {
            template: Mutex::new(Template::new("p1", "My prompt", "old")),
        });
        let versions = Arc::new(FakeVersions::default());
        let service = PromotionService::new(templates, versions.clone());

        let err = service
            .promote_with_snapshot("p1", "missing")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        // nothing was snapshotted
        assert!(versions.list("p1").await.unwrap().is_empty());
    }
}
