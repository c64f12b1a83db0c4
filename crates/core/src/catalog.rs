//! The catalog: single owner of the contract type and template registries.
//!
//! Cross-entity operations live here: saving a template resolves its
//! contract type and reports consistency findings, deleting a contract type
//! reports the templates it leaves orphaned, and listings are filtered
//! against current contract type names.

use serde::Serialize;

use crate::consistency::{self, Finding};
use crate::contract_type::{ContractType, ContractTypeRegistry, SaveContractType};
use crate::error::CoreError;
use crate::listing::{filter_previews, TemplateFilter};
use crate::seed;
use crate::template::{SaveTemplate, Template, TemplatePreview, TemplateRegistry};
use crate::types::EntityId;

/// A committed template together with its advisory findings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedTemplate {
    pub template: Template,
    pub findings: Vec<Finding>,
}

/// Owned store for all contract types and templates.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    contract_types: ContractTypeRegistry,
    templates: TemplateRegistry,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from injected initial state.
    pub fn from_parts(contract_types: ContractTypeRegistry, templates: TemplateRegistry) -> Self {
        Self {
            contract_types,
            templates,
        }
    }

    /// Create a catalog holding the demo contract types and templates.
    pub fn with_demo_data() -> Self {
        let contract_types = ContractTypeRegistry::from_entries(seed::demo_contract_types());
        let templates = TemplateRegistry::from_entries(seed::demo_templates(), &contract_types);
        Self::from_parts(contract_types, templates)
    }

    pub fn contract_types(&self) -> &ContractTypeRegistry {
        &self.contract_types
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    // -- Contract types --

    pub fn save_contract_type(&mut self, input: SaveContractType) -> Result<ContractType, CoreError> {
        self.contract_types.save(input)
    }

    /// Delete a contract type, returning the ids of the templates still
    /// bound to it. Those templates are kept and surface as orphans.
    pub fn delete_contract_type(&mut self, id: &str) -> Result<Vec<EntityId>, CoreError> {
        self.contract_types.delete(id)?;
        Ok(self.templates.referencing(id))
    }

    pub fn get_contract_type(&self, id: &str) -> Result<&ContractType, CoreError> {
        self.contract_types.get(id)
    }

    pub fn list_contract_types(&self) -> Vec<&ContractType> {
        self.contract_types.list().collect()
    }

    // -- Templates --

    /// Save a template and check it against its contract type.
    pub fn save_template(
        &mut self,
        input: SaveTemplate,
        actor: &str,
    ) -> Result<SavedTemplate, CoreError> {
        let template = self.templates.save(input, &self.contract_types, actor)?;
        let findings = self.findings_for(&template);
        Ok(SavedTemplate { template, findings })
    }

    pub fn delete_template(&mut self, id: &str) -> Result<Template, CoreError> {
        self.templates.delete(id)
    }

    pub fn duplicate_template(&mut self, id: &str, actor: &str) -> Result<Template, CoreError> {
        self.templates.duplicate(id, &self.contract_types, actor)
    }

    pub fn render_preview(&self, id: &str) -> Result<String, CoreError> {
        self.templates.render_preview(id)
    }

    pub fn get_template(&self, id: &str) -> Result<&Template, CoreError> {
        self.templates.get(id)
    }

    pub fn list_templates(&self) -> Vec<&Template> {
        self.templates.list().collect()
    }

    /// Previews matching `filter`, in insertion order.
    pub fn list_previews(&self, filter: &TemplateFilter) -> Vec<TemplatePreview> {
        filter_previews(self.templates.previews(), filter, &self.contract_types)
    }

    /// Consistency findings for a stored template.
    pub fn check_template(&self, id: &str) -> Result<Vec<Finding>, CoreError> {
        let template = self.templates.get(id)?;
        Ok(self.findings_for(template))
    }

    /// Templates whose contract type no longer exists.
    pub fn orphaned_templates(&self) -> Vec<&Template> {
        self.templates
            .list()
            .filter(|t| self.contract_types.find(&t.contract_type_id).is_none())
            .collect()
    }

    fn findings_for(&self, template: &Template) -> Vec<Finding> {
        match self.contract_types.find(&template.contract_type_id) {
            Some(contract_type) => consistency::check(template, contract_type),
            None => vec![Finding::OrphanReference {
                contract_type_id: template.contract_type_id.clone(),
            }],
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
