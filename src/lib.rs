pub mod form_extractor;
pub mod models;
pub mod processing;
pub mod templates;
pub mod utils;
pub mod validation;
pub mod verification;

pub use form_extractor::{DocumentExtraction, FormExtractor, TemplateChoice, VerifiedExtraction};
pub use processing::OcrProcessor;
pub use templates::TemplateStore;
pub use utils::FormError;
pub use verification::Verifier;
