//! Template repository trait.
//!
//! The template read/update interface is the external collaborator side of
//! the promote protocol: the version store never writes template content
//! itself.

use async_trait::async_trait;

use super::model::{Template, TemplateVariable};
use crate::error::Result;

/// Read/update access to the parent templates.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Loads a template by id.
    ///
    /// Fails with `VaultError::NotFound` if the template does not exist.
    async fn get(&self, template_id: &str) -> Result<Template>;

    /// Replaces a template's live content and variable list.
    async fn update_content(
        &self,
        template_id: &str,
        content: &str,
        variables: &[TemplateVariable],
    ) -> Result<()>;
}
