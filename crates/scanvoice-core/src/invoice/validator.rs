//! Arithmetic consistency checks on an extracted record.

use tracing::warn;

use crate::models::config::ExtractionConfig;
use crate::models::record::{Field, FieldRecord};

use super::rules::parse_amount;

/// A record that went through validation, with any issues found.
///
/// Validation never alters values; warnings are advisory only.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub record: FieldRecord,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_consistent(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Checks that quantity times unit price matches the net amount.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    tolerance: f64,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self { tolerance: 0.01 }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_tolerance(config.net_amount_tolerance)
    }

    /// Set the absolute tolerance for the net amount check.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    /// Validate a record and hand it back unchanged.
    ///
    /// The check only runs when Qty Ordered, Unit Price and Net Amount are
    /// all resolved.
    pub fn validate(&self, record: FieldRecord) -> ValidationResult {
        let mut warnings = Vec::new();

        let operands = [Field::QtyOrdered, Field::UnitPrice, Field::NetAmount];
        if operands.iter().all(|&f| record.is_resolved(f)) {
            let parsed = (
                parse_amount(record.get(Field::QtyOrdered)),
                parse_amount(record.get(Field::UnitPrice)),
                parse_amount(record.get(Field::NetAmount)),
            );

            match parsed {
                (Some(qty), Some(price), Some(net)) => {
                    let expected = qty * price;
                    if (expected - net).abs() > self.tolerance {
                        warnings.push(format!(
                            "Qty Ordered x Unit Price ({:.2}) differs from Net Amount ({:.2})",
                            expected, net
                        ));
                    }
                }
                _ => warnings.push("Could not validate numeric fields".to_string()),
            }
        }

        for warning in &warnings {
            warn!("{}", warning);
        }

        ValidationResult { record, warnings }
    }
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new()
    }
}
