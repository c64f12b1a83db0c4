//! Consistency checking between a template and its contract type.
//!
//! Findings are advisory: saving never fails because of them. They are
//! computed by comparing the placeholder names extracted from the template
//! markup with the names declared on the contract type.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::contract_type::ContractType;
use crate::placeholder::PlaceholderSchema;
use crate::template::Template;
use crate::types::EntityId;

/// A non-fatal consistency diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// A token used in the markup that the contract type does not declare.
    UnknownToken { name: String },
    /// A required placeholder the markup never uses.
    MissingRequired { name: String },
    /// A name declared more than once on the contract type; later
    /// declarations are shadowed by the first.
    DuplicatePlaceholder { name: String },
    /// The template's contract type no longer exists.
    OrphanReference {
        #[serde(rename = "contractTypeId")]
        contract_type_id: EntityId,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownToken { name } => {
                write!(f, "placeholder '{{{{{name}}}}}' is not declared by the contract type")
            }
            Self::MissingRequired { name } => {
                write!(f, "required placeholder '{name}' is not used in the template")
            }
            Self::DuplicatePlaceholder { name } => {
                write!(f, "placeholder '{name}' is declared more than once")
            }
            Self::OrphanReference { contract_type_id } => {
                write!(f, "contract type '{contract_type_id}' does not exist")
            }
        }
    }
}

/// Check a template against its contract type.
pub fn check(template: &Template, contract_type: &ContractType) -> Vec<Finding> {
    check_placeholders(&template.placeholders, &contract_type.placeholders)
}

/// Compare used placeholder names with a declared schema.
///
/// Findings are ordered: duplicate declarations (declaration order), unknown
/// tokens (usage order), then missing required placeholders (declaration
/// order).
pub fn check_placeholders(used: &[String], declared: &[PlaceholderSchema]) -> Vec<Finding> {
    let mut findings = Vec::new();

    let mut declared_counts: IndexMap<&str, usize> = IndexMap::new();
    for schema in declared {
        *declared_counts.entry(schema.name.as_str()).or_default() += 1;
    }
    findings.extend(
        declared_counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(name, _)| Finding::DuplicatePlaceholder {
                name: (*name).to_string(),
            }),
    );

    findings.extend(
        used.iter()
            .filter(|name| !declared_counts.contains_key(name.as_str()))
            .map(|name| Finding::UnknownToken { name: name.clone() }),
    );

    let used: HashSet<&str> = used.iter().map(String::as_str).collect();
    let mut reported: HashSet<&str> = HashSet::new();
    for schema in declared.iter().filter(|s| s.required) {
        let name = schema.name.as_str();
        if !used.contains(name) && reported.insert(name) {
            findings.push(Finding::MissingRequired {
                name: name.to_string(),
            });
        }
    }

    findings
}

/// Whether a set of findings describes a consistent template.
pub fn is_consistent(findings: &[Finding]) -> bool {
    findings.is_empty()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
