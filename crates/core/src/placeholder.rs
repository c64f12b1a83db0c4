//! Placeholder schema model and validation.
//!
//! A [`PlaceholderSchema`] declares one named token a contract type exposes:
//! its input type, display label, whether it is required, and optional
//! refinements (default value, select options, validation rules).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{generate_id, normalize_id, EntityId, PLACEHOLDER_ID_PREFIX};
use crate::validation::{validate_text, MAX_NAME_LENGTH};

/// Loose shape check for email values: `local@domain.tld`, no whitespace.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));

/// Date values use the ISO calendar format produced by `<input type="date">`.
const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input type of a placeholder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderType {
    #[default]
    Text,
    Number,
    Date,
    Email,
    Url,
    Textarea,
    Select,
    Checkbox,
}

impl PlaceholderType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Email => "email",
            Self::Url => "url",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
        }
    }
}

impl fmt::Display for PlaceholderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional value constraints attached to a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Whole-value pattern, anchored like an HTML `pattern` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// A named token declared by a contract type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderSchema {
    pub id: EntityId,
    /// Machine token used inside `{{name}}` markers.
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub placeholder_type: PlaceholderType,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Allowed values; only meaningful for [`PlaceholderType::Select`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
}

/// Placeholder as submitted in a contract type save payload.
///
/// Identical to [`PlaceholderSchema`] except that the id is optional; new
/// entries receive a generated one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderDraft {
    pub id: Option<EntityId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "type")]
    pub placeholder_type: PlaceholderType,
    #[serde(default)]
    pub required: bool,
    pub default_value: Option<String>,
    pub options: Option<Vec<String>>,
    pub validation: Option<ValidationRules>,
}

impl PlaceholderDraft {
    /// Convert into a schema, assigning a fresh id when none was supplied.
    pub fn into_schema(self) -> PlaceholderSchema {
        PlaceholderSchema {
            id: normalize_id(self.id).unwrap_or_else(|| generate_id(PLACEHOLDER_ID_PREFIX)),
            name: self.name,
            label: self.label,
            placeholder_type: self.placeholder_type,
            required: self.required,
            default_value: self.default_value,
            options: self.options,
            validation: self.validation,
        }
    }
}

impl From<PlaceholderSchema> for PlaceholderDraft {
    fn from(schema: PlaceholderSchema) -> Self {
        Self {
            id: Some(schema.id),
            name: schema.name,
            label: schema.label,
            placeholder_type: schema.placeholder_type,
            required: schema.required,
            default_value: schema.default_value,
            options: schema.options,
            validation: schema.validation,
        }
    }
}

// ---------------------------------------------------------------------------
// Schema validation
// ---------------------------------------------------------------------------

impl PlaceholderSchema {
    /// A blank, optional text placeholder with a fresh id.
    pub fn blank() -> Self {
        Self {
            id: generate_id(PLACEHOLDER_ID_PREFIX),
            name: String::new(),
            label: String::new(),
            placeholder_type: PlaceholderType::Text,
            required: false,
            default_value: None,
            options: None,
            validation: None,
        }
    }

    /// Validate the schema's own fields before it is persisted.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_text("Placeholder name", &self.name, MAX_NAME_LENGTH)?;
        if self.name.contains('}') {
            return Err(self.invalid("name must not contain '}'"));
        }
        validate_text(
            &format!("Label of placeholder '{}'", self.name),
            &self.label,
            MAX_NAME_LENGTH,
        )?;

        match (&self.options, self.placeholder_type) {
            (Some(options), PlaceholderType::Select) if options.is_empty() => {
                return Err(self.invalid("select placeholders need at least one option"));
            }
            (None, PlaceholderType::Select) => {
                return Err(self.invalid("select placeholders need at least one option"));
            }
            (Some(_), other) if other != PlaceholderType::Select => {
                return Err(self.invalid(&format!("options are not allowed for type '{other}'")));
            }
            _ => {}
        }

        if let Some(rules) = &self.validation {
            if let (Some(min), Some(max)) = (rules.min_length, rules.max_length) {
                if min > max {
                    return Err(self.invalid(&format!(
                        "minLength ({min}) must not exceed maxLength ({max})"
                    )));
                }
            }
            if let (Some(min), Some(max)) = (rules.min, rules.max) {
                if min > max {
                    return Err(self.invalid(&format!("min ({min}) must not exceed max ({max})")));
                }
            }
            if let Some(pattern) = &rules.pattern {
                compile_pattern(pattern)
                    .map_err(|e| self.invalid(&format!("invalid pattern '{pattern}': {e}")))?;
            }
        }

        if let Some(default) = self.default_value.as_deref().filter(|v| !v.is_empty()) {
            self.check_value(default)?;
        }

        Ok(())
    }

    /// Check a candidate value against the declared type and rules.
    ///
    /// An empty value is accepted unless the placeholder is required.
    pub fn check_value(&self, value: &str) -> Result<(), CoreError> {
        if value.is_empty() {
            if self.required {
                return Err(self.invalid("a value is required"));
            }
            return Ok(());
        }

        match self.placeholder_type {
            PlaceholderType::Text | PlaceholderType::Textarea => {}
            PlaceholderType::Number => {
                let number: f64 = value
                    .trim()
                    .parse()
                    .ok()
                    .filter(|n: &f64| n.is_finite())
                    .ok_or_else(|| self.invalid(&format!("'{value}' is not a number")))?;
                if let Some(rules) = &self.validation {
                    if let Some(min) = rules.min.filter(|min| number < *min) {
                        return Err(self.invalid(&format!("{number} is below the minimum {min}")));
                    }
                    if let Some(max) = rules.max.filter(|max| number > *max) {
                        return Err(self.invalid(&format!("{number} is above the maximum {max}")));
                    }
                }
            }
            PlaceholderType::Date => {
                chrono::NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
                    self.invalid(&format!("'{value}' is not a date in YYYY-MM-DD format"))
                })?;
            }
            PlaceholderType::Email => {
                if !EMAIL_RE.is_match(value) {
                    return Err(self.invalid(&format!("'{value}' is not an email address")));
                }
            }
            PlaceholderType::Url => {
                let valid = url::Url::parse(value)
                    .map(|u| u.has_host())
                    .unwrap_or(false);
                if !valid {
                    return Err(self.invalid(&format!("'{value}' is not an absolute URL")));
                }
            }
            PlaceholderType::Select => {
                let allowed = self
                    .options
                    .as_deref()
                    .is_some_and(|options| options.iter().any(|o| o == value));
                if !allowed {
                    return Err(self.invalid(&format!("'{value}' is not one of the options")));
                }
            }
            PlaceholderType::Checkbox => {
                if value != "true" && value != "false" {
                    return Err(self.invalid(&format!("'{value}' must be 'true' or 'false'")));
                }
            }
        }

        if let Some(rules) = &self.validation {
            let len = value.chars().count();
            if let Some(min) = rules.min_length.filter(|min| len < *min) {
                return Err(self.invalid(&format!("value is shorter than {min} characters")));
            }
            if let Some(max) = rules.max_length.filter(|max| len > *max) {
                return Err(self.invalid(&format!("value is longer than {max} characters")));
            }
            if let Some(pattern) = &rules.pattern {
                let re = compile_pattern(pattern)
                    .map_err(|e| self.invalid(&format!("invalid pattern '{pattern}': {e}")))?;
                if !re.is_match(value) {
                    return Err(self.invalid(&format!("'{value}' does not match '{pattern}'")));
                }
            }
        }

        Ok(())
    }

    fn invalid(&self, reason: &str) -> CoreError {
        CoreError::Validation(format!("Placeholder '{}': {reason}", self.name))
    }
}

/// Compile a user pattern anchored to the whole value.
///
/// The pattern must parse on its own first, so unbalanced groups cannot
/// escape the anchoring group.
fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(pattern)?;
    Regex::new(&format!("^(?:{pattern})$"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
