//! Variable name matching against caller-supplied binding names.
//!
//! Resolution is a static lookup in strict priority order: exact match,
//! synonym groups, then direct alias rules. This is deliberately not fuzzy
//! matching; a template variable either hits a table entry or stays
//! unresolved.
//!
//! The tables are configuration data, not algorithm constants. They
//! deserialize from the user's `matcher.toml`, so deployments can replace or
//! localize them without touching the matching logic. [`MatcherConfig::default`]
//! carries the built-in tables shipped with the app.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A canonical binding name plus the template-side spellings that map to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynonymGroup {
    /// The binding name callers actually supply.
    pub canonical: String,
    /// Template spellings that resolve to `canonical`.
    pub variants: Vec<String>,
}

/// A direct template-string to canonical-name rewrite.
///
/// Unlike a synonym group, an alias maps one specific template string to one
/// specific canonical name. Alias rules are evaluated after the synonym
/// table regardless of whether a synonym group listed the variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasRule {
    /// The exact template variable text to rewrite.
    pub pattern: String,
    /// The binding name it resolves to.
    pub canonical: String,
}

/// The matcher lookup tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    #[serde(default)]
    pub synonyms: Vec<SynonymGroup>,
    #[serde(default)]
    pub aliases: Vec<AliasRule>,
}

impl MatcherConfig {
    /// A config with no table entries; only exact matches resolve.
    pub fn empty() -> Self {
        Self {
            synonyms: Vec::new(),
            aliases: Vec::new(),
        }
    }

    /// Resolves a template variable name to one of the caller's binding
    /// names, or `None` if nothing matches.
    ///
    /// Priority order:
    /// 1. exact match against `user_vars`
    /// 2. synonym groups: `template_var` is a listed variant and the group's
    ///    canonical name is in `user_vars`
    /// 3. alias rules: `template_var` equals a rule's pattern and the rule's
    ///    canonical name is in `user_vars`
    pub fn resolve(&self, template_var: &str, user_vars: &HashSet<String>) -> Option<String> {
        if user_vars.contains(template_var) {
            return Some(template_var.to_string());
        }

        for group in &self.synonyms {
            if group.variants.iter().any(|v| v == template_var)
                && user_vars.contains(&group.canonical)
            {
                return Some(group.canonical.clone());
            }
        }

        for rule in &self.aliases {
            if rule.pattern == template_var && user_vars.contains(&rule.canonical) {
                return Some(rule.canonical.clone());
            }
        }

        None
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            synonyms: vec![
                SynonymGroup {
                    canonical: "버전 기록".to_string(),
                    variants: vec![
                        "버전".to_string(),
                        "버전기록".to_string(),
                        "v1.345 버전".to_string(),
                        "version history".to_string(),
                    ],
                },
                SynonymGroup {
                    canonical: "내용".to_string(),
                    variants: vec![
                        "본문".to_string(),
                        "content".to_string(),
                        "body".to_string(),
                    ],
                },
                SynonymGroup {
                    canonical: "주제".to_string(),
                    variants: vec!["topic".to_string(), "subject".to_string()],
                },
                SynonymGroup {
                    canonical: "이름".to_string(),
                    variants: vec!["성명".to_string(), "name".to_string()],
                },
                SynonymGroup {
                    canonical: "언어".to_string(),
                    variants: vec!["language".to_string(), "lang".to_string()],
                },
                SynonymGroup {
                    canonical: "날짜".to_string(),
                    variants: vec!["일자".to_string(), "date".to_string()],
                },
            ],
            aliases: vec![
                AliasRule {
                    pattern: "프롬프트".to_string(),
                    canonical: "내용".to_string(),
                },
                AliasRule {
                    pattern: "현재 버전".to_string(),
                    canonical: "버전 기록".to_string(),
                },
                AliasRule {
                    pattern: "오늘".to_string(),
                    canonical: "날짜".to_string(),
                },
            ],
        }
    }
}
