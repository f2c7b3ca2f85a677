pub mod catalog;
pub mod config;
pub mod data;
pub mod rules;

pub use catalog::{CatalogField, CatalogPage, INSURANCE_FORM};
pub use config::ExtractionConfig;
pub use data::*;
pub use rules::ValidationRule;
