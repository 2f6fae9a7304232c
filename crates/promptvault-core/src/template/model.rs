//! Prompt template domain models.

use serde::{Deserialize, Serialize};

use super::extract::extract_variables;

/// A single named placeholder with its default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVariable {
    pub name: String,
    #[serde(default)]
    pub default_value: String,
}

impl TemplateVariable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_value: String::new(),
        }
    }
}

/// A parent prompt whose content holds `{variable}` placeholders.
///
/// Versions and user-added prompts attach to a template via its `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,
}

impl Template {
    /// Creates a template, deriving its variable list from the content.
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let variables = extract_variables(&content)
            .into_iter()
            .map(TemplateVariable::new)
            .collect();
        Self {
            id: id.into(),
            title: title.into(),
            content,
            variables,
        }
    }

    /// Re-derives the variable list after a content edit, keeping the
    /// default values of variables that survive.
    pub fn refresh_variables(&mut self) {
        let previous = std::mem::take(&mut self.variables);
        self.variables = extract_variables(&self.content)
            .into_iter()
            .map(|name| {
                previous
                    .iter()
                    .find(|v| v.name == name)
                    .cloned()
                    .unwrap_or_else(|| TemplateVariable::new(name))
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_extracts_variables() {
        let template = Template::new("t1", "Greeting", "Hello {name}, today is {date}");
        let names: Vec<&str> = template.variables.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["name", "date"]);
    }

    #[test]
    fn test_refresh_keeps_surviving_defaults() {
        let mut template = Template::new("t1", "Greeting", "Hello {name}");
        template.variables[0].default_value = "Bob".to_string();

        template.content = "Hello {name}, from {city}".to_string();
        template.refresh_variables();

        assert_eq!(template.variables.len(), 2);
        assert_eq!(template.variables[0].default_value, "Bob");
        assert_eq!(template.variables[1].name, "city");
        assert_eq!(template.variables[1].default_value, "");
    }
}
