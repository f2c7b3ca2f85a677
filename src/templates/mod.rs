pub mod builtin;
pub mod persist;
pub mod store;

pub use store::{FieldMatch, TemplateStore};
