pub mod classifier;
pub mod fuzzy;
pub mod locator;
pub mod matcher;
pub mod normalizer;
pub mod ocr;

pub use classifier::{Classification, ClassifiedField, SpanClassifier};
pub use locator::SpatialLocator;
pub use matcher::FieldMatcher;
pub use normalizer::extract_typed;
pub use ocr::OcrProcessor;
