//! Persisted envelope DTOs.
//!
//! Each namespace serializes as one JSON document: a schema version plus
//! the parent-id keyed buckets. The legacy storage format carried no
//! version field; `schema_version` is introduced here so a future format
//! change can migrate on load instead of discarding data.

use std::collections::HashMap;

use promptvault_core::error::Result;
use promptvault_core::user_prompt::UserAddedPrompt;
use promptvault_core::version::Version;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Current on-disk schema version for both namespaces.
pub const STORE_SCHEMA_VERSION: &str = "1.0.0";

/// One namespace's persisted document: `parent_id -> ordered entries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct StoreEnvelope<T> {
    pub schema_version: String,
    #[serde(default)]
    pub buckets: HashMap<String, Vec<T>>,
}

pub type VersionEnvelope = StoreEnvelope<Version>;
pub type UserPromptEnvelope = StoreEnvelope<UserAddedPrompt>;

impl<T> Default for StoreEnvelope<T> {
    fn default() -> Self {
        Self {
            schema_version: STORE_SCHEMA_VERSION.to_string(),
            buckets: HashMap::new(),
        }
    }
}

impl<T> StoreEnvelope<T> {
    /// Parses stored text, degrading to an empty envelope when the text is
    /// missing or unreadable (fail-open read path).
    pub fn parse_or_empty(text: Option<&str>) -> Self
    where
        T: DeserializeOwned,
    {
        let Some(raw) = text else {
            return Self::default();
        };
        match serde_json::from_str(raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable store document");
                Self::default()
            }
        }
    }

    /// Serializes the envelope for persistence. Failures propagate: the
    /// write path is fail-loud.
    pub fn to_json(&self) -> Result<String>
    where
        T: Serialize,
    {
        Ok(serde_json::to_string(self)?)
    }
}
