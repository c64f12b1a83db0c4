pub mod contract_types;
pub mod placeholders;
pub mod templates;
