//! Invoice field extraction and validation.

mod parser;
pub mod rules;
mod validator;

pub use parser::FieldExtractor;
pub use validator::{FieldValidator, ValidationResult};

/// Extract a record from aggregated text and validate it.
pub fn extract_and_validate(
    extractor: &FieldExtractor,
    validator: &FieldValidator,
    text: &str,
) -> ValidationResult {
    validator.validate(extractor.extract(text))
}
