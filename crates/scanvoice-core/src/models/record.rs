//! The fixed 18-field invoice record.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Value held by a field that no rule resolved.
pub const NOT_FOUND: &str = "null";

/// Default for Tax/VAT Amount when no tax line is found.
pub const ZERO_TAX: &str = "0";

/// Invoice fields, in output column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    VendorName,
    PoNumber,
    PoDate,
    DocumentNumber,
    DocumentDate,
    BillTo,
    ShipTo,
    PaymentTerms,
    ModeOfShipment,
    TransactionType,
    HsCode,
    PartNo,
    QtyOrdered,
    UnitPrice,
    NetAmount,
    TaxAmount,
    TotalInvoiceAmount,
    DueDate,
}

impl Field {
    /// Number of fields in a record.
    pub const COUNT: usize = 18;

    /// All fields in column order.
    pub const ALL: [Field; Field::COUNT] = [
        Field::VendorName,
        Field::PoNumber,
        Field::PoDate,
        Field::DocumentNumber,
        Field::DocumentDate,
        Field::BillTo,
        Field::ShipTo,
        Field::PaymentTerms,
        Field::ModeOfShipment,
        Field::TransactionType,
        Field::HsCode,
        Field::PartNo,
        Field::QtyOrdered,
        Field::UnitPrice,
        Field::NetAmount,
        Field::TaxAmount,
        Field::TotalInvoiceAmount,
        Field::DueDate,
    ];

    /// Column header used in CSV output.
    pub fn header(self) -> &'static str {
        match self {
            Field::VendorName => "Vendor Name",
            Field::PoNumber => "PO Number",
            Field::PoDate => "PO Date",
            Field::DocumentNumber => "Document Number",
            Field::DocumentDate => "Document Date",
            Field::BillTo => "Bill To (First Line)",
            Field::ShipTo => "Ship To (First Line)",
            Field::PaymentTerms => "Payment Terms (numeric part)",
            Field::ModeOfShipment => "Mode of Shipment",
            Field::TransactionType => "Transaction Type",
            Field::HsCode => "HS Code",
            Field::PartNo => "Part No",
            Field::QtyOrdered => "Qty Ordered",
            Field::UnitPrice => "Unit Price",
            Field::NetAmount => "Net Amount",
            Field::TaxAmount => "Tax/VAT Amount",
            Field::TotalInvoiceAmount => "Total Invoice Amount",
            Field::DueDate => "Due Date",
        }
    }

    /// Position of this field in the record.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether the value is a money amount with thousands separators stripped.
    pub fn is_monetary(self) -> bool {
        matches!(
            self,
            Field::UnitPrice | Field::NetAmount | Field::TaxAmount | Field::TotalInvoiceAmount
        )
    }

    /// The value this field holds when unresolved.
    pub fn unresolved_value(self) -> &'static str {
        match self {
            Field::TaxAmount => ZERO_TAX,
            _ => NOT_FOUND,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// A complete invoice record: every field always has a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    values: [String; Field::COUNT],
}

impl FieldRecord {
    /// Create a record where every field holds its unresolved value.
    pub fn unresolved() -> Self {
        Self {
            values: Field::ALL.map(|f| f.unresolved_value().to_string()),
        }
    }

    /// Value of a field.
    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Replace the value of a field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Whether a field holds a value other than the generic sentinel.
    pub fn is_resolved(&self, field: Field) -> bool {
        self.get(field) != NOT_FOUND
    }

    /// Iterate `(field, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Values in column order.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl Default for FieldRecord {
    fn default() -> Self {
        Self::unresolved()
    }
}

impl Serialize for FieldRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.header(), value)?;
        }
        map.end()
    }
}
