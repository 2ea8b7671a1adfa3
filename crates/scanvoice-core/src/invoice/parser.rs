//! Rule cascade field extractor.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::record::{Field, FieldRecord};

use super::rules::{cascade, fallback_vendor, source_of, FieldSource};

/// Extracts the fixed invoice record from aggregated OCR text.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    /// Whether to guess the vendor from token frequencies.
    vendor_fallback: bool,
}

impl FieldExtractor {
    /// Create a new extractor with default settings.
    pub fn new() -> Self {
        Self {
            vendor_fallback: true,
        }
    }

    /// Build an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_vendor_fallback(config.vendor_fallback)
    }

    /// Set the vendor fallback pass.
    pub fn with_vendor_fallback(mut self, enabled: bool) -> Self {
        self.vendor_fallback = enabled;
        self
    }

    /// Resolve every field of the record from `text`.
    ///
    /// Fields are resolved in column order; aliases are filled once all
    /// cascades have run. The result depends only on `text`.
    pub fn extract(&self, text: &str) -> FieldRecord {
        let start = Instant::now();
        let mut record = FieldRecord::unresolved();
        let mut resolved = 0usize;

        info!("Extracting fields from {} characters of text", text.len());

        for field in Field::ALL {
            let Some(cascade) = cascade(field) else {
                continue;
            };
            if let Some(found) = cascade.resolve(text) {
                debug!(
                    "{} = {:?} (rule {}, bytes {}..{})",
                    field, found.value, found.rule, found.position.0, found.position.1
                );
                record.set(field, found.value);
                resolved += 1;
            }
        }

        for field in Field::ALL {
            if let FieldSource::AliasOf(target) = source_of(field) {
                let value = record.get(target).to_string();
                record.set(field, value);
            }
        }

        if self.vendor_fallback && !record.is_resolved(Field::VendorName) {
            if let Some(vendor) = fallback_vendor(text) {
                debug!("Vendor Name = {:?} (token frequency fallback)", vendor);
                record.set(Field::VendorName, vendor);
            }
        }

        debug!(
            "Resolved {} fields by pattern in {}ms",
            resolved,
            start.elapsed().as_millis()
        );

        record
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::NOT_FOUND;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
--- Page 1 ---
Globex International
Invoice Number: INV20931
Purchase Order Number: 4500123
Date: 12/01/2024

Bill To:
Initrode Corp
42 Main Street

Ship To:
Initrode Warehouse
7 Dock Road

Terms: Net 30
Part: SWL-2231-A
Qty: 4
Unit Price: 1,250.00
Subtotal: 5,000.00
VAT: 950.00
--- Page 2 ---
Invoice Total: 5,950.00
Due Date: 11-Feb-24
"#;

    #[test]
    fn test_extract_full_invoice() {
        let record = FieldExtractor::new().extract(SAMPLE);

        assert_eq!(record.get(Field::VendorName), "Globex International");
        assert_eq!(record.get(Field::PoNumber), "4500123");
        assert_eq!(record.get(Field::PoDate), "12/01/2024");
        assert_eq!(record.get(Field::DocumentNumber), "INV20931");
        assert_eq!(record.get(Field::DocumentDate), "12/01/2024");
        assert_eq!(record.get(Field::BillTo), "Initrode Corp");
        assert_eq!(record.get(Field::ShipTo), "Initrode Warehouse");
        assert_eq!(record.get(Field::PaymentTerms), "30");
        assert_eq!(record.get(Field::PartNo), "SWL-2231-A");
        assert_eq!(record.get(Field::QtyOrdered), "4");
        assert_eq!(record.get(Field::UnitPrice), "1250.00");
        assert_eq!(record.get(Field::NetAmount), "5000.00");
        assert_eq!(record.get(Field::TaxAmount), "950.00");
        assert_eq!(record.get(Field::TotalInvoiceAmount), "5950.00");
        assert_eq!(record.get(Field::DueDate), "11-Feb-24");
    }

    #[test]
    fn test_unextracted_fields_always_sentinel() {
        let text = "Mode of Shipment: Air\nTransaction Type: Sale\nHS Code: 8471";
        let record = FieldExtractor::new().extract(text);

        assert_eq!(record.get(Field::ModeOfShipment), NOT_FOUND);
        assert_eq!(record.get(Field::TransactionType), NOT_FOUND);
        assert_eq!(record.get(Field::HsCode), NOT_FOUND);
    }

    #[test]
    fn test_no_patterns_gives_sentinels() {
        let record = FieldExtractor::new().extract("lorem ipsum dolor sit amet");

        for (field, value) in record.iter() {
            match field {
                Field::TaxAmount => assert_eq!(value, "0"),
                _ => assert_eq!(value, NOT_FOUND, "{field}"),
            }
        }
    }

    #[test]
    fn test_empty_text() {
        let record = FieldExtractor::new().extract("");
        assert_eq!(record, FieldRecord::unresolved());
    }

    #[test]
    fn test_po_number_and_due_date() {
        let record = FieldExtractor::new().extract("PO Number: 4521\nDue Date: 12-Jan-24");

        assert_eq!(record.get(Field::PoNumber), "4521");
        assert_eq!(record.get(Field::DueDate), "12-Jan-24");
    }

    #[test]
    fn test_document_date_aliases_po_date() {
        for text in ["Order placed 2024/03/05", "nothing dated", "03/05/2024 and 2024-01-01"] {
            let record = FieldExtractor::new().extract(text);
            assert_eq!(record.get(Field::DocumentDate), record.get(Field::PoDate));
        }
    }

    #[test]
    fn test_monetary_comma_stripped() {
        let record = FieldExtractor::new().extract("Unit Price: 1,234.56");
        assert_eq!(record.get(Field::UnitPrice), "1234.56");
    }

    #[test]
    fn test_vendor_fallback_only_when_unresolved() {
        let text = "3mcorp 100\n3mcorp 200\nxinc 5";
        let record = FieldExtractor::new().extract(text);
        assert_eq!(record.get(Field::VendorName), "3Mcorp");

        let record = FieldExtractor::new().with_vendor_fallback(false).extract(text);
        assert_eq!(record.get(Field::VendorName), NOT_FOUND);

        let text = "From: Hooli Inc\n42 Main Street\n3mcorp 3mcorp";
        let record = FieldExtractor::new().extract(text);
        assert_eq!(record.get(Field::VendorName), "Hooli Inc");
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let extractor = FieldExtractor::new();
        let text = "umbrellacorp billed\nhooliinc paid\nQty: 3\nPrice: 9.99";
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }
}
