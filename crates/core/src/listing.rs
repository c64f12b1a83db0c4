//! Filtering of template previews for listings.

use serde::Deserialize;

use crate::contract_type::ContractTypeRegistry;
use crate::template::TemplatePreview;
use crate::types::EntityId;

/// Listing criteria. All set criteria must match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateFilter {
    /// Case-insensitive substring matched against the template name or the
    /// contract type name. Empty matches everything.
    #[serde(default, rename = "q")]
    pub query: String,
    /// Keep only templates whose contract type name equals the current name
    /// of this contract type.
    #[serde(default)]
    pub contract_type_id: Option<EntityId>,
    /// Keep only active templates.
    #[serde(default)]
    pub active_only: bool,
}

impl TemplateFilter {
    pub fn matches(&self, preview: &TemplatePreview, contract_types: &ContractTypeRegistry) -> bool {
        self.matches_query(preview)
            && self.matches_contract_type(preview, contract_types)
            && (!self.active_only || preview.is_active)
    }

    fn matches_query(&self, preview: &TemplatePreview) -> bool {
        let query = self.query.to_lowercase();
        let query = query.as_str();
        query.is_empty()
            || preview.name.to_lowercase().contains(query)
            || preview.contract_type_name.to_lowercase().contains(query)
    }

    /// Compares against the snapshot stored on the preview, so a template
    /// saved before its contract type was renamed no longer matches until it
    /// is saved again.
    fn matches_contract_type(
        &self,
        preview: &TemplatePreview,
        contract_types: &ContractTypeRegistry,
    ) -> bool {
        match self.contract_type_id.as_deref().filter(|id| !id.is_empty()) {
            None => true,
            Some(id) => contract_types
                .name_of(id)
                .is_some_and(|current| current == preview.contract_type_name),
        }
    }
}

/// Filter previews, preserving their order.
pub fn filter_previews<'a>(
    previews: impl IntoIterator<Item = &'a TemplatePreview>,
    filter: &TemplateFilter,
    contract_types: &ContractTypeRegistry,
) -> Vec<TemplatePreview> {
    previews
        .into_iter()
        .filter(|p| filter.matches(p, contract_types))
        .cloned()
        .collect()
}
