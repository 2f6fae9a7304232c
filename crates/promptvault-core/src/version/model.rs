//! Version history domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::template::TemplateVariable;
use crate::time::within_window;

/// A stored snapshot of a template's content, linked to its parent by
/// `parent_id`.
///
/// History snapshots (`is_history`) are appended chronologically at the tail
/// of their parent's list; ordinary versions (manual duplicates) are kept
/// most-recent-first at the head.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    pub content: String,
    /// Variable list snapshotted with the content, so a promote restores
    /// the parent's defaults too.
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// RFC 3339
    pub created_at: String,
    /// RFC 3339
    pub updated_at: String,
    /// Snapshot taken automatically during promotion (bypasses the
    /// duplicate check).
    #[serde(default)]
    pub is_history: bool,
    #[serde(default)]
    pub is_current_version: bool,
}

impl Version {
    /// Whether this entry was created within `window_ms` of `now`.
    pub fn created_within_window(&self, now: DateTime<Utc>, window_ms: i64) -> bool {
        within_window(&self.created_at, now, window_ms)
    }

    /// Shallow-merges a patch over this record. `updated_at` is the
    /// caller's responsibility.
    pub fn apply_patch(&mut self, patch: VersionPatch) {
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
        if let Some(folder) = patch.folder {
            self.folder = Some(folder);
        }
        if let Some(memo) = patch.memo {
            self.memo = Some(memo);
        }
        if let Some(is_history) = patch.is_history {
            self.is_history = is_history;
        }
        if let Some(is_current_version) = patch.is_current_version {
            self.is_current_version = is_current_version;
        }
    }
}

/// Input for creating a version entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionDraft {
    pub parent_id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub is_history: bool,
    #[serde(default)]
    pub is_current_version: bool,
}

/// Shallow-merge patch for an existing version; `None` keeps the stored
/// value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub variables: Option<Vec<TemplateVariable>>,
    pub tags: Option<Vec<String>>,
    pub folder: Option<String>,
    pub memo: Option<String>,
    pub is_history: Option<bool>,
    pub is_current_version: Option<bool>,
}
