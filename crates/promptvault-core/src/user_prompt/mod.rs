//! User-added prompt domain: child prompts attached to a parent template.

pub mod model;
pub mod repository;

pub use model::{UserAddedPrompt, UserPromptDraft, UserPromptPatch};
pub use repository::UserPromptRepository;
