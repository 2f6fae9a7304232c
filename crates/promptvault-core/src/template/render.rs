//! Rendering and segmentation of template content.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::extract::{extract_variables, PLACEHOLDER};
use super::matcher::MatcherConfig;

/// One piece of a lossless template segmentation.
///
/// Concatenating the segments of a `split` in order reproduces the source
/// content byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// Literal text between placeholders.
    Text { content: String },
    /// A placeholder token; `raw` is the full `{name}` text.
    Variable { name: String, raw: String },
}

impl Segment {
    /// The exact source text this segment covers.
    pub fn source_text(&self) -> &str {
        match self {
            Segment::Text { content } => content,
            Segment::Variable { raw, .. } => raw,
        }
    }
}

/// A segment annotated with its binding status, for UI emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpan {
    pub segment: Segment,
    /// Whether a variable segment resolved to a non-empty bound value.
    /// Always `false` for text segments.
    pub resolved: bool,
    /// The value the segment would render to, when resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Substitutes `{variable}` placeholders using the matcher tables.
///
/// All methods are pure and never fail; content that does not parse as a
/// template simply passes through unmodified.
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    config: MatcherConfig,
}

impl TemplateEngine {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Replaces every resolvable placeholder with its bound value.
    ///
    /// A placeholder is replaced only when the matcher resolves its name and
    /// the bound value is non-empty after trimming; otherwise the original
    /// `{name}` token stays in place. Replacement targets the literal
    /// template token, never occurrences of the canonical name.
    pub fn render(&self, content: &str, bindings: &HashMap<String, String>) -> String {
        if content.is_empty() || bindings.is_empty() {
            return content.to_string();
        }

        let user_vars: HashSet<String> = bindings.keys().cloned().collect();
        let mut rendered = content.to_string();

        for name in extract_variables(content) {
            let Some(canonical) = self.config.resolve(&name, &user_vars) else {
                continue;
            };
            let Some(value) = bindings.get(&canonical) else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }
            let token = format!("{{{name}}}");
            rendered = rendered.replace(&token, value);
        }

        rendered
    }

    /// Splits content into its ordered Text/Variable segments.
    pub fn split(&self, content: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for token in PLACEHOLDER.find_iter(content) {
            if token.start() > cursor {
                segments.push(Segment::Text {
                    content: content[cursor..token.start()].to_string(),
                });
            }
            let raw = token.as_str();
            segments.push(Segment::Variable {
                // the braces are single ASCII bytes
                name: raw[1..raw.len() - 1].to_string(),
                raw: raw.to_string(),
            });
            cursor = token.end();
        }

        if cursor < content.len() {
            segments.push(Segment::Text {
                content: content[cursor..].to_string(),
            });
        }

        segments
    }

    /// `split` plus per-variable resolution status.
    pub fn highlight(
        &self,
        content: &str,
        bindings: &HashMap<String, String>,
    ) -> Vec<HighlightSpan> {
        let user_vars: HashSet<String> = bindings.keys().cloned().collect();

        self.split(content)
            .into_iter()
            .map(|segment| {
                let value = match &segment {
                    Segment::Variable { name, .. } => self
                        .config
                        .resolve(name, &user_vars)
                        .and_then(|canonical| bindings.get(&canonical))
                        .filter(|v| !v.trim().is_empty())
                        .cloned(),
                    Segment::Text { .. } => None,
                };
                HighlightSpan {
                    resolved: value.is_some(),
                    value,
                    segment,
                }
            })
            .collect()
    }
}
