//! Templates, their listing previews, and the template registry.
//!
//! A template owns its HTML and CSS and is bound to exactly one contract
//! type. On every save the registry re-extracts the placeholder names from
//! the markup and refreshes the template's [`TemplatePreview`], which carries
//! a snapshot of the contract type's name taken at save time.

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::contract_type::ContractTypeRegistry;
use crate::error::CoreError;
use crate::extraction::extract_placeholders;
use crate::types::{generate_id, normalize_id, touch, EntityId, Timestamp, TEMPLATE_ID_PREFIX};
use crate::validation::{
    validate_max_length, validate_save_field, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH,
};

const ENTITY: &str = "Template";

/// Suffix appended to the name of a duplicated template.
pub const DUPLICATE_NAME_SUFFIX: &str = " (copy)";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A unit of markup and style bound to one contract type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub contract_type_id: EntityId,
    pub html_content: String,
    pub css_content: String,
    /// Distinct `{{name}}` tokens found in `html_content` at the last save.
    pub placeholders: Vec<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub created_by: String,
}

/// Listing summary of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePreview {
    pub id: EntityId,
    pub name: String,
    /// Contract type name as it was when the template was last saved.
    /// Empty if the contract type could not be resolved at that time.
    pub contract_type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub last_modified: Timestamp,
    pub is_active: bool,
}

/// Save payload for a template. Absent fields keep their stored value on
/// update; on create, content defaults to empty and `is_active` to true.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTemplate {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub contract_type_id: Option<EntityId>,
    pub html_content: Option<String>,
    pub css_content: Option<String>,
    pub is_active: Option<bool>,
}

fn build_preview(template: &Template, contract_types: &ContractTypeRegistry) -> TemplatePreview {
    TemplatePreview {
        id: template.id.clone(),
        name: template.name.clone(),
        contract_type_name: contract_types
            .name_of(&template.contract_type_id)
            .unwrap_or_default()
            .to_string(),
        thumbnail: None,
        last_modified: template.updated_at,
        is_active: template.is_active,
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Owned, insertion-ordered store of templates and their previews.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: IndexMap<EntityId, Template>,
    previews: IndexMap<EntityId, TemplatePreview>,
}

impl TemplateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from existing templates, resolving each preview's
    /// contract type name against `contract_types`.
    pub fn from_entries(
        templates: impl IntoIterator<Item = Template>,
        contract_types: &ContractTypeRegistry,
    ) -> Self {
        let mut registry = Self::new();
        for template in templates {
            registry.commit(template, contract_types);
        }
        registry
    }

    /// Create or update a template, stamped with the current time.
    pub fn save(
        &mut self,
        input: SaveTemplate,
        contract_types: &ContractTypeRegistry,
        actor: &str,
    ) -> Result<Template, CoreError> {
        self.save_at(input, contract_types, actor, Utc::now())
    }

    /// Create or update a template, stamped with `now`.
    ///
    /// `name` and `contract_type_id` must be present on create and non-empty
    /// whenever supplied. A contract type id that does not resolve is not an
    /// error; the preview just gets an empty contract type name. `actor` is
    /// recorded as `created_by` on create only.
    pub fn save_at(
        &mut self,
        input: SaveTemplate,
        contract_types: &ContractTypeRegistry,
        actor: &str,
        now: Timestamp,
    ) -> Result<Template, CoreError> {
        let id = normalize_id(input.id);
        let existing = id.as_deref().and_then(|id| self.templates.get(id));
        let creating = existing.is_none();

        validate_save_field("name", input.name.as_deref(), creating, MAX_NAME_LENGTH)?;
        validate_save_field(
            "contractTypeId",
            input.contract_type_id.as_deref(),
            creating,
            MAX_NAME_LENGTH,
        )?;
        if let Some(description) = input.description.as_deref() {
            validate_max_length("description", description, MAX_DESCRIPTION_LENGTH)?;
        }

        let mut template = match existing {
            Some(current) => {
                let mut updated = current.clone();
                if let Some(name) = input.name {
                    updated.name = name;
                }
                if let Some(description) = input.description {
                    updated.description = description;
                }
                if let Some(contract_type_id) = input.contract_type_id {
                    updated.contract_type_id = contract_type_id;
                }
                if let Some(html) = input.html_content {
                    updated.html_content = html;
                }
                if let Some(css) = input.css_content {
                    updated.css_content = css;
                }
                if let Some(is_active) = input.is_active {
                    updated.is_active = is_active;
                }
                updated.updated_at = touch(current.updated_at, now);
                updated
            }
            None => Template {
                id: id.unwrap_or_else(|| generate_id(TEMPLATE_ID_PREFIX)),
                name: input.name.unwrap_or_default(),
                description: input.description.unwrap_or_default(),
                contract_type_id: input.contract_type_id.unwrap_or_default(),
                html_content: input.html_content.unwrap_or_default(),
                css_content: input.css_content.unwrap_or_default(),
                placeholders: Vec::new(),
                is_active: input.is_active.unwrap_or(true),
                created_at: now,
                updated_at: now,
                created_by: actor.to_string(),
            },
        };
        template.placeholders = extract_placeholders(&template.html_content);

        Ok(self.commit(template, contract_types))
    }

    /// Copy a template under a fresh id, stamped with the current time.
    pub fn duplicate(
        &mut self,
        id: &str,
        contract_types: &ContractTypeRegistry,
        actor: &str,
    ) -> Result<Template, CoreError> {
        self.duplicate_at(id, contract_types, actor, Utc::now())
    }

    /// Copy a template under a fresh id.
    ///
    /// The copy owns its own markup and style, gets `" (copy)"` appended to
    /// its name, new timestamps, and `actor` as its creator.
    pub fn duplicate_at(
        &mut self,
        id: &str,
        contract_types: &ContractTypeRegistry,
        actor: &str,
        now: Timestamp,
    ) -> Result<Template, CoreError> {
        let source = self.get(id)?;
        let copy = Template {
            id: generate_id(TEMPLATE_ID_PREFIX),
            name: format!("{}{DUPLICATE_NAME_SUFFIX}", source.name),
            created_at: now,
            updated_at: now,
            created_by: actor.to_string(),
            ..source.clone()
        };
        Ok(self.commit(copy, contract_types))
    }

    /// Render a template as a standalone HTML document.
    ///
    /// Placeholder tokens are left as-is.
    pub fn render_preview(&self, id: &str) -> Result<String, CoreError> {
        let template = self.get(id)?;
        Ok(format!(
            "<!DOCTYPE html>\n\
             <html>\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <title>Preview - {title}</title>\n\
             <style>{css}</style>\n\
             </head>\n\
             <body>{html}</body>\n\
             </html>\n",
            title = escape_html(&template.name),
            css = template.css_content,
            html = template.html_content,
        ))
    }

    /// Remove a template and its preview.
    pub fn delete(&mut self, id: &str) -> Result<Template, CoreError> {
        let removed = self
            .templates
            .shift_remove(id)
            .ok_or_else(|| CoreError::not_found(ENTITY, id))?;
        self.previews.shift_remove(id);
        Ok(removed)
    }

    /// Look up a template, failing with `NotFound`.
    pub fn get(&self, id: &str) -> Result<&Template, CoreError> {
        self.find(id).ok_or_else(|| CoreError::not_found(ENTITY, id))
    }

    /// Look up a template.
    pub fn find(&self, id: &str) -> Option<&Template> {
        self.templates.get(id)
    }

    /// All templates in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &Template> {
        self.templates.values()
    }

    /// All previews in template insertion order.
    pub fn previews(&self) -> impl Iterator<Item = &TemplatePreview> {
        self.previews.values()
    }

    /// Look up a template's preview.
    pub fn preview(&self, id: &str) -> Option<&TemplatePreview> {
        self.previews.get(id)
    }

    /// Ids of the templates bound to `contract_type_id`.
    pub fn referencing(&self, contract_type_id: &str) -> Vec<EntityId> {
        self.templates
            .values()
            .filter(|t| t.contract_type_id == contract_type_id)
            .map(|t| t.id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    fn commit(&mut self, template: Template, contract_types: &ContractTypeRegistry) -> Template {
        let preview = build_preview(&template, contract_types);
        self.previews.insert(template.id.clone(), preview);
        self.templates.insert(template.id.clone(), template.clone());
        template
    }
}

/// Escape text for inclusion in HTML element content.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Duration;

    use super::*;
    use crate::contract_type::SaveContractType;

    fn contract_types() -> (ContractTypeRegistry, EntityId) {
        let mut registry = ContractTypeRegistry::new();
        let ct = registry
            .save(SaveContractType {
                name: Some("Contrato Laboral".into()),
                description: Some("Contratos de trabajo".into()),
                ..Default::default()
            })
            .unwrap();
        (registry, ct.id)
    }

    fn input(contract_type_id: &str, html: &str) -> SaveTemplate {
        SaveTemplate {
            name: Some("Contrato de Trabajo Estándar".into()),
            contract_type_id: Some(contract_type_id.into()),
            html_content: Some(html.into()),
            css_content: Some("p { color: red; }".into()),
            ..Default::default()
        }
    }

    #[test]
    fn create_extracts_placeholders_and_builds_preview() {
        let (cts, ct_id) = contract_types();
        let mut registry = TemplateRegistry::new();
        let now = Utc::now();

        let t = registry
            .save_at(
                input(&ct_id, "<p>{{nombre_empleado}} {{salario}} {{nombre_empleado}}</p>"),
                &cts,
                "usuario@example.com",
                now,
            )
            .unwrap();

        assert!(t.id.starts_with("t_"));
        assert_eq!(t.placeholders, vec!["nombre_empleado", "salario"]);
        assert!(t.is_active);
        assert_eq!(t.created_by, "usuario@example.com");
        assert_eq!(t.created_at, now);

        let preview = registry.preview(&t.id).unwrap();
        assert_eq!(preview.contract_type_name, "Contrato Laboral");
        assert_eq!(preview.last_modified, now);
        assert!(preview.is_active);
        assert!(preview.thumbnail.is_none());
    }

    #[test]
    fn create_requires_name_and_contract_type() {
        let (cts, ct_id) = contract_types();
        let mut registry = TemplateRegistry::new();

        let err = registry
            .save(
                SaveTemplate {
                    name: None,
                    ..input(&ct_id, "")
                },
                &cts,
                "u",
            )
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("name is required"));

        let err = registry
            .save(
                SaveTemplate {
                    contract_type_id: Some(String::new()),
                    ..input(&ct_id, "")
                },
                &cts,
                "u",
            )
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("contractTypeId"));

        assert!(registry.is_empty());
        assert_eq!(registry.previews().count(), 0);
    }

    #[test]
    fn unresolved_contract_type_gives_empty_preview_name() {
        let (cts, _) = contract_types();
        let mut registry = TemplateRegistry::new();
        let t = registry.save(input("ct_missing", ""), &cts, "u").unwrap();
        assert_eq!(registry.preview(&t.id).unwrap().contract_type_name, "");
    }

    #[test]
    fn update_merges_and_keeps_creation_metadata() {
        let (cts, ct_id) = contract_types();
        let mut registry = TemplateRegistry::new();
        let t0 = Utc::now();
        let created = registry
            .save_at(input(&ct_id, "{{a}}"), &cts, "creator", t0)
            .unwrap();

        let t1 = t0 + Duration::minutes(5);
        let updated = registry
            .save_at(
                SaveTemplate {
                    id: Some(created.id.clone()),
                    html_content: Some("{{b}} {{c}}".into()),
                    is_active: Some(false),
                    ..Default::default()
                },
                &cts,
                "editor",
                t1,
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.css_content, created.css_content);
        assert_eq!(updated.placeholders, vec!["b", "c"]);
        assert_eq!(updated.created_by, "creator");
        assert_eq!(updated.created_at, t0);
        assert_eq!(updated.updated_at, t1);
        assert!(!updated.is_active);

        let preview = registry.preview(&created.id).unwrap();
        assert_eq!(preview.last_modified, t1);
        assert!(!preview.is_active);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn preview_name_is_a_save_time_snapshot() {
        let (mut cts, ct_id) = contract_types();
        let mut registry = TemplateRegistry::new();
        let t = registry.save(input(&ct_id, ""), &cts, "u").unwrap();

        cts.save(SaveContractType {
            id: Some(ct_id.clone()),
            name: Some("Contrato Laboral 2025".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            registry.preview(&t.id).unwrap().contract_type_name,
            "Contrato Laboral"
        );

        // Saving the template again picks up the new name.
        registry
            .save(
                SaveTemplate {
                    id: Some(t.id.clone()),
                    ..Default::default()
                },
                &cts,
                "u",
            )
            .unwrap();
        assert_eq!(
            registry.preview(&t.id).unwrap().contract_type_name,
            "Contrato Laboral 2025"
        );
    }

    #[test]
    fn duplicate_is_a_deep_copy_with_fresh_identity() {
        let (cts, ct_id) = contract_types();
        let mut registry = TemplateRegistry::new();
        let t0 = Utc::now();
        let source = registry
            .save_at(input(&ct_id, "<p>{{salario}}</p>"), &cts, "creator", t0)
            .unwrap();

        let t1 = t0 + Duration::hours(1);
        let copy = registry
            .duplicate_at(&source.id, &cts, "copier", t1)
            .unwrap();

        assert_ne!(copy.id, source.id);
        assert_eq!(copy.name, "Contrato de Trabajo Estándar (copy)");
        assert_eq!(copy.html_content, source.html_content);
        assert_eq!(copy.css_content, source.css_content);
        assert_eq!(copy.placeholders, source.placeholders);
        assert_eq!(copy.contract_type_id, source.contract_type_id);
        assert_eq!(copy.created_by, "copier");
        assert_eq!(copy.created_at, t1);
        assert_eq!(registry.len(), 2);

        // Editing the copy leaves the source untouched.
        registry
            .save(
                SaveTemplate {
                    id: Some(copy.id.clone()),
                    html_content: Some("<p>cambiado</p>".into()),
                    ..Default::default()
                },
                &cts,
                "copier",
            )
            .unwrap();
        assert_eq!(
            registry.get(&source.id).unwrap().html_content,
            "<p>{{salario}}</p>"
        );

        let names: Vec<&str> = registry.previews().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Contrato de Trabajo Estándar", "Contrato de Trabajo Estándar (copy)"]
        );
    }

    #[test]
    fn duplicate_unknown_is_not_found() {
        let (cts, _) = contract_types();
        let mut registry = TemplateRegistry::new();
        assert_matches!(
            registry.duplicate("t_nope", &cts, "u"),
            Err(CoreError::NotFound { entity: "Template", .. })
        );
    }

    #[test]
    fn render_preview_builds_standalone_document() {
        let (cts, ct_id) = contract_types();
        let mut registry = TemplateRegistry::new();
        let t = registry
            .save(
                SaveTemplate {
                    name: Some("Servicios <B&B>".into()),
                    ..input(&ct_id, "<p>{{nombre_proveedor}}</p>")
                },
                &cts,
                "u",
            )
            .unwrap();

        let html = registry.render_preview(&t.id).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Preview - Servicios &lt;B&amp;B&gt;</title>"));
        assert!(html.contains("<style>p { color: red; }</style>"));
        assert!(html.contains("<body><p>{{nombre_proveedor}}</p></body>"));
    }

    #[test]
    fn delete_removes_template_and_preview() {
        let (cts, ct_id) = contract_types();
        let mut registry = TemplateRegistry::new();
        let t = registry.save(input(&ct_id, ""), &cts, "u").unwrap();

        registry.delete(&t.id).unwrap();
        assert_matches!(registry.get(&t.id), Err(CoreError::NotFound { .. }));
        assert!(registry.preview(&t.id).is_none());
        assert_matches!(registry.delete(&t.id), Err(CoreError::NotFound { .. }));
        assert_matches!(registry.render_preview(&t.id), Err(CoreError::NotFound { .. }));
    }

    #[test]
    fn referencing_lists_bound_templates() {
        let (cts, ct_id) = contract_types();
        let mut registry = TemplateRegistry::new();
        let a = registry.save(input(&ct_id, ""), &cts, "u").unwrap();
        registry.save(input("ct_other", ""), &cts, "u").unwrap();
        assert_eq!(registry.referencing(&ct_id), vec![a.id]);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let (cts, ct_id) = contract_types();
        let mut registry = TemplateRegistry::new();
        let t = registry.save(input(&ct_id, "{{x}}"), &cts, "u").unwrap();
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["contractTypeId"], ct_id.as_str());
        assert_eq!(json["isActive"], true);
        assert_eq!(json["placeholders"], serde_json::json!(["x"]));
        assert!(json["createdBy"].is_string());
    }
}
