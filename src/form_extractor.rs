use crate::models::{ExtractionConfig, ExtractionResult, OcrSpan, VerificationReport};
use crate::processing::OcrProcessor;
use crate::templates::TemplateStore;
use crate::utils::FormError;
use crate::verification::Verifier;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How the template for a document is chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateChoice {
    Auto,
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentExtraction {
    /// Template used, or `None` when auto-detection found no match.
    pub template: Option<String>,
    pub fields: ExtractionResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedExtraction {
    #[serde(flatten)]
    pub extraction: DocumentExtraction,
    pub report: VerificationReport,
}

/// Runs a whole document (all pages) through template selection and
/// field extraction.
pub struct FormExtractor {
    store: Arc<TemplateStore>,
    processor: OcrProcessor,
    config: ExtractionConfig,
}

impl FormExtractor {
    pub fn new(store: Arc<TemplateStore>, config: ExtractionConfig) -> Self {
        FormExtractor {
            processor: OcrProcessor::with_config(&config),
            store,
            config,
        }
    }

    pub fn extract(
        &self,
        pages: &[Vec<OcrSpan>],
        choice: &TemplateChoice,
    ) -> Result<DocumentExtraction, FormError> {
        // Step 1: Keep confident spans, pages in order
        let spans: Vec<OcrSpan> = pages
            .iter()
            .flatten()
            .filter(|span| span.confidence >= self.config.min_confidence)
            .cloned()
            .collect();

        // Step 2: Pick the template
        let template = match choice {
            TemplateChoice::Named(name) => Some(
                self.store
                    .get_template(name)
                    .ok_or_else(|| FormError::TemplateNotFound(name.clone()))?,
            ),
            TemplateChoice::Auto => {
                let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
                self.store
                    .auto_detect_template(&texts)
                    .and_then(|name| self.store.get_template(&name))
            }
        };

        let Some(template) = template else {
            warn!("No template matched the document ({} spans)", spans.len());
            return Ok(DocumentExtraction {
                template: None,
                fields: ExtractionResult::new(),
            });
        };

        // Step 3: Extract fields
        let fields = self.processor.process_results(&spans, &template.fields);
        info!(
            "Extracted {}/{} fields with template '{}'",
            fields.len(),
            template.fields.len(),
            template.name
        );

        Ok(DocumentExtraction {
            template: Some(template.name),
            fields,
        })
    }

    pub fn extract_and_verify(
        &self,
        pages: &[Vec<OcrSpan>],
        choice: &TemplateChoice,
    ) -> Result<VerifiedExtraction, FormError> {
        let extraction = self.extract(pages, choice)?;
        let report = Verifier::run_all_checks(&extraction.fields);
        Ok(VerifiedExtraction { extraction, report })
    }
}
