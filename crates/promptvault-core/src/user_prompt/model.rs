//! User-added prompt domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::template::{Template, TemplateVariable};
use crate::time::within_window;

/// A child prompt a user attached to a parent template.
///
/// User-added prompts have their own lifecycle: they are created blank or
/// imported from the parent, edited and reordered freely, and never take
/// part in version promotion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAddedPrompt {
    pub id: String,
    pub parent_id: String,
    /// Denormalized for list rendering without a template lookup.
    pub parent_title: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    /// RFC 3339
    pub created_at: String,
    /// RFC 3339
    pub updated_at: String,
}

impl UserAddedPrompt {
    /// Whether this entry was created within `window_ms` of `now`.
    pub fn created_within_window(&self, now: DateTime<Utc>, window_ms: i64) -> bool {
        within_window(&self.created_at, now, window_ms)
    }

    /// Shallow-merges a patch over this record. `updated_at` is the
    /// caller's responsibility.
    pub fn apply_patch(&mut self, patch: UserPromptPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(variables) = patch.variables {
            self.variables = variables;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(memo) = patch.memo {
            self.memo = Some(memo);
        }
        if let Some(folder_id) = patch.folder_id {
            self.folder_id = Some(folder_id);
        }
        if let Some(folder_name) = patch.folder_name {
            self.folder_name = Some(folder_name);
        }
        if let Some(is_favorite) = patch.is_favorite {
            self.is_favorite = is_favorite;
        }
    }
}

/// Input for creating a user-added prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPromptDraft {
    pub parent_id: String,
    #[serde(default)]
    pub parent_title: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub folder_name: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl UserPromptDraft {
    /// A blank child prompt under `template`.
    pub fn blank(template: &Template, title: impl Into<String>) -> Self {
        Self {
            parent_id: template.id.clone(),
            parent_title: template.title.clone(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// A child prompt seeded from the parent template's current content.
    pub fn from_template(template: &Template) -> Self {
        Self {
            parent_id: template.id.clone(),
            parent_title: template.title.clone(),
            title: template.title.clone(),
            content: template.content.clone(),
            variables: template.variables.clone(),
            ..Default::default()
        }
    }
}

/// Shallow-merge patch for an existing user-added prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPromptPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub variables: Option<Vec<TemplateVariable>>,
    pub tags: Option<Vec<String>>,
    pub memo: Option<String>,
    pub folder_id: Option<String>,
    pub folder_name: Option<String>,
    pub is_favorite: Option<bool>,
}
