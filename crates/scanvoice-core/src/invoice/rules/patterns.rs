//! Regex sources for invoice field extraction.
//!
//! Every pattern is compiled case-insensitive and multi-line, so `^`/`$`
//! anchor at line boundaries and `\s` crosses them. The value is always
//! capture group 1.

// Vendor name: a run of words ending in a company suffix
pub const VENDOR_COMPANY: &str =
    r"([A-Z][A-Za-z\s&]+(?:Ltd|Inc|Corporation|Corp|International|Limited))";
pub const VENDOR_AFTER_BRAND: &str =
    r"SONICWALL[^\n]*\n([A-Za-z\s]+(?:Ltd|Inc|International))";
pub const VENDOR_FROM: &str = r"From:\s*([A-Za-z\s]+(?:Ltd|Inc|International))";

// Purchase order number
pub const PO_NUMBER_LONG: &str = r"Purchase\s+Order\s+(?:Number|No\.?)[:\s#]+(\d+)";
pub const PO_NUMBER_LABELED: &str = r"\bPO\s*(?:Number|No\.?)[:\s#]+(\d+)";
pub const PO_NUMBER_SHORT: &str = r"\bP\.?O\.?[:\s#]+(\d+)";

// Dates: 12-Jan-2024, 12/01/2024, 2024-01-12
pub const DATE_DAY_MONTH_NAME: &str = r"(\d{1,2}[-/]\w{3}[-/]\d{4})";
pub const DATE_DMY: &str = r"(\d{1,2}[-/]\d{1,2}[-/]\d{4})";
pub const DATE_YMD: &str = r"(\d{4}[-/]\d{1,2}[-/]\d{1,2})";

// Invoice / document number
pub const INVOICE_NUMBER: &str = r"Invoice Number[:\s]+(\w+)";
pub const DOCUMENT_NUMBER: &str = r"Document Number[:\s]+(\w+)";
pub const INVOICE_NUMBER_SHORT: &str = r"Invoice[:\s#]+(\w+)";

// Party blocks: first line after the heading
pub const BILL_TO: &str = r"Bill To:\s*\n([^\n]+)";
pub const SHIP_TO: &str = r"Ship To:\s*\n([^\n]+)";

// Payment terms, numeric part only
pub const TERMS_NET: &str = r"Net\s+(\d+)";
pub const TERMS_LABELED_NET: &str = r"Terms[:\s]+Net\s+(\d+)";
pub const PAYMENT_TERMS: &str = r"Payment Terms[:\s]+(\d+)";

// Part numbers: 01-ABC-2345 style codes, or labeled
pub const PART_CODE: &str = r"(\d{2}-[A-Z]{3}-\d{4})";
pub const PART_LABELED: &str = r"Part[:\s#]+([A-Z0-9-]+)";
pub const SKU_LABELED: &str = r"SKU[:\s#]+([A-Z0-9-]+)";

// Quantity
pub const QTY_LABELED: &str = r"Qty[:\s]+(\d+)";
pub const QUANTITY_LABELED: &str = r"Quantity[:\s]+(\d+)";
pub const QTY_TABLE_ROW: &str = r"\s(\d+)\s+\d+[.,]\d{2}\s+\d+[.,]\d{2}";

// Amounts accept 1,234.56 grouping as well as plain 1234.56 / 1234,56
pub const UNIT_PRICE_LABELED: &str =
    r"Unit Price[:\s]+(\d{1,3}(?:,\d{3})+(?:\.\d{2})?|\d+[.,]\d{2})";
pub const UNIT_PRICE_TABLE_ROW: &str = r"(\d+[.,]\d{2})\s+\d+[.,]\d{2}$";
pub const PRICE_LABELED: &str = r"Price[:\s]+(\d{1,3}(?:,\d{3})+(?:\.\d{2})?|\d+[.,]\d{2})";

pub const SUBTOTAL: &str = r"Subtotal[:\s]+(\d{1,3}(?:,\d{3})+(?:\.\d{2})?|\d+[.,]\d{2})";
pub const NET_AMOUNT: &str = r"Net Amount[:\s]+(\d{1,3}(?:,\d{3})+(?:\.\d{2})?|\d+[.,]\d{2})";
pub const NET_BEFORE_ZERO_TAX: &str = r"(\d+[.,]\d{2})\s+0\s*$";

pub const VAT_AMOUNT: &str = r"VAT[:\s]+(\d{1,3}(?:,\d{3})+(?:\.\d{2})?|\d+[.,]\d{2})";
pub const TAX_AMOUNT: &str = r"Tax[:\s]+(\d{1,3}(?:,\d{3})+(?:\.\d{2})?|\d+[.,]\d{2})";
pub const GST_AMOUNT: &str = r"GST[:\s]+(\d{1,3}(?:,\d{3})+(?:\.\d{2})?|\d+[.,]\d{2})";

pub const TOTAL: &str = r"\bTotal[:\s]+(\d{1,3}(?:,\d{3})+(?:\.\d{2})?|\d+[.,]\d{2})";
pub const AMOUNT_DUE: &str = r"Amount Due[:\s]+(\d{1,3}(?:,\d{3})+(?:\.\d{2})?|\d+[.,]\d{2})";
pub const INVOICE_TOTAL: &str =
    r"Invoice Total[:\s]+(\d{1,3}(?:,\d{3})+(?:\.\d{2})?|\d+[.,]\d{2})";

// Due date: 12-Jan-24 or 12/Jan/2024
pub const DUE_DATE: &str = r"Due Date[:\s]+(\d{1,2}[-/]\w{3}[-/]\d{2,4})";
pub const PAYMENT_DUE: &str = r"Payment Due[:\s]+(\d{1,2}[-/]\w{3}[-/]\d{2,4})";
