//! Template engine: placeholder extraction, name matching, and rendering.
//!
//! Everything in this module is pure and synchronous. Malformed input never
//! raises; rendering degrades to returning the content unmodified.

pub mod extract;
pub mod matcher;
pub mod model;
pub mod render;
pub mod repository;

pub use extract::extract_variables;
pub use matcher::{AliasRule, MatcherConfig, SynonymGroup};
pub use model::{Template, TemplateVariable};
pub use render::{HighlightSpan, Segment, TemplateEngine};
pub use repository::TemplateRepository;
