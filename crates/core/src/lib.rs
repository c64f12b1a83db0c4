//! Domain core for the contract template catalog.
//!
//! Holds the placeholder schema model, the `{{placeholder}}` extraction
//! engine, the contract type and template registries, the consistency
//! checker and the listing filter. No I/O and no logging happen here; every
//! failure is returned to the caller as a [`error::CoreError`].

pub mod catalog;
pub mod consistency;
pub mod contract_type;
pub mod error;
pub mod extraction;
pub mod listing;
pub mod placeholder;
pub mod seed;
pub mod template;
pub mod types;
pub mod validation;
