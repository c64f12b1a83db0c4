//! Contract types and their registry.
//!
//! A contract type is a reusable schema: an ordered list of placeholders that
//! templates bound to it may reference. The registry keeps entries in
//! insertion order and implements create-or-update `save` semantics keyed on
//! the payload id.

use std::collections::HashSet;

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::placeholder::{PlaceholderDraft, PlaceholderSchema};
use crate::types::{generate_id, normalize_id, touch, EntityId, Timestamp, CONTRACT_TYPE_ID_PREFIX};
use crate::validation::{validate_save_field, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};

const ENTITY: &str = "ContractType";

/// A named placeholder schema that templates bind to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractType {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    /// Declared placeholders in display order. Duplicate names are kept.
    pub placeholders: Vec<PlaceholderSchema>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ContractType {
    /// First placeholder declared with `name`.
    pub fn placeholder(&self, name: &str) -> Option<&PlaceholderSchema> {
        self.placeholders.iter().find(|p| p.name == name)
    }

    /// Append a blank, optional text placeholder and return it for editing.
    pub fn add_placeholder(&mut self) -> &mut PlaceholderSchema {
        self.placeholders.push(PlaceholderSchema::blank());
        let last = self.placeholders.len() - 1;
        &mut self.placeholders[last]
    }

    /// Remove the placeholder at `index`, if any.
    pub fn remove_placeholder(&mut self, index: usize) -> Option<PlaceholderSchema> {
        (index < self.placeholders.len()).then(|| self.placeholders.remove(index))
    }

    /// Names of the placeholders flagged as required, in declaration order.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.placeholders
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
    }
}

/// Save payload for a contract type. Absent fields keep their stored value
/// on update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveContractType {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub placeholders: Option<Vec<PlaceholderDraft>>,
}

/// Owned, insertion-ordered store of contract types.
#[derive(Debug, Clone, Default)]
pub struct ContractTypeRegistry {
    entries: IndexMap<EntityId, ContractType>,
}

impl ContractTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from existing entries, keeping their order.
    ///
    /// A later entry with an id already seen replaces the earlier one.
    pub fn from_entries(entries: impl IntoIterator<Item = ContractType>) -> Self {
        Self {
            entries: entries.into_iter().map(|ct| (ct.id.clone(), ct)).collect(),
        }
    }

    /// Create or update a contract type, stamped with the current time.
    pub fn save(&mut self, input: SaveContractType) -> Result<ContractType, CoreError> {
        self.save_at(input, Utc::now())
    }

    /// Create or update a contract type, stamped with `now`.
    ///
    /// A payload id that matches an entry updates it; an unknown id creates
    /// a new entry under that id; no id creates one under a generated id.
    /// Nothing is mutated when validation fails.
    pub fn save_at(
        &mut self,
        input: SaveContractType,
        now: Timestamp,
    ) -> Result<ContractType, CoreError> {
        let id = normalize_id(input.id);
        let existing = id.as_deref().and_then(|id| self.entries.get(id));
        let creating = existing.is_none();

        validate_save_field("name", input.name.as_deref(), creating, MAX_NAME_LENGTH)?;
        validate_save_field(
            "description",
            input.description.as_deref(),
            creating,
            MAX_DESCRIPTION_LENGTH,
        )?;

        let placeholders = input
            .placeholders
            .map(|drafts| build_placeholders(drafts, existing))
            .transpose()?;

        let committed = match existing {
            Some(current) => {
                let mut updated = current.clone();
                if let Some(name) = input.name {
                    updated.name = name;
                }
                if let Some(description) = input.description {
                    updated.description = description;
                }
                if let Some(placeholders) = placeholders {
                    updated.placeholders = placeholders;
                }
                updated.updated_at = touch(current.updated_at, now);
                updated
            }
            None => ContractType {
                id: id.unwrap_or_else(|| generate_id(CONTRACT_TYPE_ID_PREFIX)),
                name: input.name.unwrap_or_default(),
                description: input.description.unwrap_or_default(),
                placeholders: placeholders.unwrap_or_default(),
                created_at: now,
                updated_at: now,
            },
        };

        self.entries.insert(committed.id.clone(), committed.clone());
        Ok(committed)
    }

    /// Remove a contract type. Templates bound to it are not consulted.
    pub fn delete(&mut self, id: &str) -> Result<ContractType, CoreError> {
        self.entries
            .shift_remove(id)
            .ok_or_else(|| CoreError::not_found(ENTITY, id))
    }

    /// Look up a contract type, failing with `NotFound`.
    pub fn get(&self, id: &str) -> Result<&ContractType, CoreError> {
        self.find(id).ok_or_else(|| CoreError::not_found(ENTITY, id))
    }

    /// Look up a contract type.
    pub fn find(&self, id: &str) -> Option<&ContractType> {
        self.entries.get(id)
    }

    /// Current name of a contract type, if it exists.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.find(id).map(|ct| ct.name.as_str())
    }

    /// All contract types in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &ContractType> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Turn submitted drafts into validated schemas.
///
/// On update, a draft id that is not already on the stored entry is replaced
/// with a fresh one, so existing placeholder ids can be kept but never
/// reassigned. Ids must be unique within the list.
fn build_placeholders(
    drafts: Vec<PlaceholderDraft>,
    existing: Option<&ContractType>,
) -> Result<Vec<PlaceholderSchema>, CoreError> {
    let known: HashSet<&str> = existing
        .map(|ct| ct.placeholders.iter().map(|p| p.id.as_str()).collect())
        .unwrap_or_default();

    let schemas: Vec<PlaceholderSchema> = drafts
        .into_iter()
        .map(|mut draft| {
            if existing.is_some() {
                draft.id = normalize_id(draft.id).filter(|id| known.contains(id.as_str()));
            }
            draft.into_schema()
        })
        .collect();

    let mut seen = HashSet::new();
    for schema in &schemas {
        schema.validate()?;
        if !seen.insert(schema.id.as_str()) {
            return Err(CoreError::Validation(format!(
                "Placeholder id '{}' is used more than once",
                schema.id
            )));
        }
    }
    Ok(schemas)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
