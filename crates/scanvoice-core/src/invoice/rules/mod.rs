//! Rule table for invoice field extraction.
//!
//! Each field maps to a [`FieldSource`]: an ordered cascade of patterns
//! (first match wins), an alias of another field, or nothing at all. The
//! table is plain data; [`cascade`] hands out the compiled form.

pub mod amounts;
pub mod patterns;
pub mod vendor;

pub use amounts::{parse_amount, strip_thousands};
pub use vendor::{fallback_vendor, COMPANY_SUFFIXES};

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

use crate::models::record::Field;
use patterns::*;

/// Transformation applied to a captured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcess {
    /// Trim surrounding whitespace.
    Trim,
    /// Trim, then drop thousands-separator commas.
    StripThousands,
}

impl PostProcess {
    pub fn apply(self, raw: &str) -> String {
        match self {
            PostProcess::Trim => raw.trim().to_string(),
            PostProcess::StripThousands => strip_thousands(raw.trim()),
        }
    }
}

/// One pattern in a field's cascade.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub pattern: &'static str,
    pub group: usize,
    pub post: PostProcess,
}

const fn text(pattern: &'static str) -> Rule {
    Rule {
        pattern,
        group: 1,
        post: PostProcess::Trim,
    }
}

const fn money(pattern: &'static str) -> Rule {
    Rule {
        pattern,
        group: 1,
        post: PostProcess::StripThousands,
    }
}

/// Where a field's value comes from.
#[derive(Debug, Clone, Copy)]
pub enum FieldSource {
    /// Try each rule in order; the first match wins.
    Cascade(&'static [Rule]),
    /// Copy the resolved value of another field.
    AliasOf(Field),
    /// Never extracted; always holds the unresolved value.
    NotExtracted,
}

const VENDOR_RULES: &[Rule] = &[text(VENDOR_COMPANY), text(VENDOR_AFTER_BRAND), text(VENDOR_FROM)];
const PO_NUMBER_RULES: &[Rule] = &[
    text(PO_NUMBER_LONG),
    text(PO_NUMBER_LABELED),
    text(PO_NUMBER_SHORT),
];
const PO_DATE_RULES: &[Rule] = &[text(DATE_DAY_MONTH_NAME), text(DATE_DMY), text(DATE_YMD)];
const DOCUMENT_NUMBER_RULES: &[Rule] = &[
    text(INVOICE_NUMBER),
    text(DOCUMENT_NUMBER),
    text(INVOICE_NUMBER_SHORT),
];
const BILL_TO_RULES: &[Rule] = &[text(BILL_TO)];
const SHIP_TO_RULES: &[Rule] = &[text(SHIP_TO)];
const PAYMENT_TERMS_RULES: &[Rule] = &[text(TERMS_NET), text(TERMS_LABELED_NET), text(PAYMENT_TERMS)];
const PART_NO_RULES: &[Rule] = &[text(PART_CODE), text(PART_LABELED), text(SKU_LABELED)];
const QTY_RULES: &[Rule] = &[text(QTY_LABELED), text(QUANTITY_LABELED), text(QTY_TABLE_ROW)];
const UNIT_PRICE_RULES: &[Rule] = &[
    money(UNIT_PRICE_LABELED),
    money(UNIT_PRICE_TABLE_ROW),
    money(PRICE_LABELED),
];
const NET_AMOUNT_RULES: &[Rule] = &[money(SUBTOTAL), money(NET_AMOUNT), money(NET_BEFORE_ZERO_TAX)];
const TAX_RULES: &[Rule] = &[money(VAT_AMOUNT), money(TAX_AMOUNT), money(GST_AMOUNT)];
const TOTAL_RULES: &[Rule] = &[money(TOTAL), money(AMOUNT_DUE), money(INVOICE_TOTAL)];
const DUE_DATE_RULES: &[Rule] = &[text(DUE_DATE), text(PAYMENT_DUE)];

/// The extraction table, in record column order.
pub const FIELD_TABLE: [(Field, FieldSource); Field::COUNT] = [
    (Field::VendorName, FieldSource::Cascade(VENDOR_RULES)),
    (Field::PoNumber, FieldSource::Cascade(PO_NUMBER_RULES)),
    (Field::PoDate, FieldSource::Cascade(PO_DATE_RULES)),
    (Field::DocumentNumber, FieldSource::Cascade(DOCUMENT_NUMBER_RULES)),
    (Field::DocumentDate, FieldSource::AliasOf(Field::PoDate)),
    (Field::BillTo, FieldSource::Cascade(BILL_TO_RULES)),
    (Field::ShipTo, FieldSource::Cascade(SHIP_TO_RULES)),
    (Field::PaymentTerms, FieldSource::Cascade(PAYMENT_TERMS_RULES)),
    (Field::ModeOfShipment, FieldSource::NotExtracted),
    (Field::TransactionType, FieldSource::NotExtracted),
    (Field::HsCode, FieldSource::NotExtracted),
    (Field::PartNo, FieldSource::Cascade(PART_NO_RULES)),
    (Field::QtyOrdered, FieldSource::Cascade(QTY_RULES)),
    (Field::UnitPrice, FieldSource::Cascade(UNIT_PRICE_RULES)),
    (Field::NetAmount, FieldSource::Cascade(NET_AMOUNT_RULES)),
    (Field::TaxAmount, FieldSource::Cascade(TAX_RULES)),
    (Field::TotalInvoiceAmount, FieldSource::Cascade(TOTAL_RULES)),
    (Field::DueDate, FieldSource::Cascade(DUE_DATE_RULES)),
];

/// How a field is resolved.
pub fn source_of(field: Field) -> FieldSource {
    FIELD_TABLE[field.index()].1
}

/// A value found by a cascade, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch {
    /// Post-processed value.
    pub value: String,
    /// Index of the rule that matched.
    pub rule: usize,
    /// Byte span of the capture in the source text.
    pub position: (usize, usize),
}

/// A compiled rule.
#[derive(Debug)]
pub struct CompiledRule {
    regex: Regex,
    group: usize,
    post: PostProcess,
}

/// The compiled rules of one field.
#[derive(Debug)]
pub struct Cascade {
    field: Field,
    rules: Vec<CompiledRule>,
}

impl Cascade {
    pub fn field(&self) -> Field {
        self.field
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Try rules in declared order and return the first capture.
    pub fn resolve(&self, text: &str) -> Option<ExtractionMatch> {
        self.rules.iter().enumerate().find_map(|(i, rule)| {
            let caps = rule.regex.captures(text)?;
            let capture = caps.get(rule.group)?;
            Some(ExtractionMatch {
                value: rule.post.apply(capture.as_str()),
                rule: i,
                position: (capture.start(), capture.end()),
            })
        })
    }
}

fn compile(rule: &Rule) -> CompiledRule {
    let regex = RegexBuilder::new(rule.pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
        .unwrap();
    CompiledRule {
        regex,
        group: rule.group,
        post: rule.post,
    }
}

lazy_static! {
    static ref CASCADES: Vec<Option<Cascade>> = FIELD_TABLE
        .iter()
        .map(|(field, source)| match source {
            FieldSource::Cascade(rules) => Some(Cascade {
                field: *field,
                rules: rules.iter().map(compile).collect(),
            }),
            FieldSource::AliasOf(_) | FieldSource::NotExtracted => None,
        })
        .collect();
}

/// The compiled cascade of a field, if it has one.
pub fn cascade(field: Field) -> Option<&'static Cascade> {
    CASCADES[field.index()].as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_in_column_order() {
        for (i, (field, _)) in FIELD_TABLE.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_all_patterns_compile() {
        for field in Field::ALL {
            match source_of(field) {
                FieldSource::Cascade(rules) => {
                    assert!((1..=3).contains(&rules.len()), "{field} has {} rules", rules.len());
                    assert_eq!(cascade(field).map(Cascade::len), Some(rules.len()));
                }
                _ => assert!(cascade(field).is_none()),
            }
        }
    }

    #[test]
    fn test_first_rule_wins() {
        let text = "PO: 111\nPurchase Order Number: 222";
        let found = cascade(Field::PoNumber).unwrap().resolve(text).unwrap();
        assert_eq!(found.value, "222");
        assert_eq!(found.rule, 0);
    }

    #[test]
    fn test_later_rule_when_earlier_miss() {
        let found = cascade(Field::PoNumber).unwrap().resolve("P.O. # 9981").unwrap();
        assert_eq!(found.value, "9981");
        assert_eq!(found.rule, 2);
    }

    #[test]
    fn test_case_insensitive_across_lines() {
        let found = cascade(Field::BillTo)
            .unwrap()
            .resolve("BILL TO:\n   Wayne Enterprises  \n1007 Mountain Drive")
            .unwrap();
        assert_eq!(found.value, "Wayne Enterprises");
    }

    #[test]
    fn test_money_strips_commas() {
        let found = cascade(Field::TotalInvoiceAmount)
            .unwrap()
            .resolve("Amount Due: 1,234.56")
            .unwrap();
        assert_eq!(found.value, "1234.56");
    }

    #[test]
    fn test_table_row_anchor() {
        let text = "Widget  2  12.50 25.00\nThanks";
        let found = cascade(Field::UnitPrice).unwrap().resolve(text).unwrap();
        assert_eq!(found.value, "12.50");
        assert_eq!(found.rule, 1);
    }
}
