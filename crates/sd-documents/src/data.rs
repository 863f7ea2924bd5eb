//! Input data for document rendering
//!
//! Callers assemble one [`DocumentData`] from their entities; nothing in
//! this crate talks to the database.

use chrono::NaiveDate;

/// Which document to lay out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Estimate,
    Invoice,
    /// Receipt for one payment phase (1-based)
    Receipt { phase: i32 },
    PaymentReport,
}

impl DocumentKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Estimate => "ESTIMATE",
            Self::Invoice => "INVOICE",
            Self::Receipt { .. } => "RECEIPT",
            Self::PaymentReport => "PAYMENT REPORT",
        }
    }

    /// Name fragment used in the generated file name
    pub fn label(&self) -> String {
        match self {
            Self::Estimate => "Estimate".to_string(),
            Self::Invoice => "Invoice".to_string(),
            Self::Receipt { phase } => format!("Receipt-Phase{}", phase),
            Self::PaymentReport => "Payment_Report".to_string(),
        }
    }

    /// Only receipts are stamped PAID
    pub fn stamped_paid(&self) -> bool {
        matches!(self, Self::Receipt { .. })
    }
}

/// Letterhead block
#[derive(Debug, Clone)]
pub struct CompanyInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// PNG read from disk; skipped when unset
    pub logo_png: Option<Vec<u8>>,
}

/// The client the document is addressed to
#[derive(Debug, Clone)]
pub struct PartyInfo {
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
    pub city: Option<String>,
}

/// One row of the line-item table
#[derive(Debug, Clone)]
pub struct LineRow {
    pub name: String,
    /// Dimensions or piece count, already formatted
    pub measure: String,
    pub unit_price: f64,
    pub total: f64,
}

/// Subtotal / discount / grand total block
#[derive(Debug, Clone, Copy)]
pub struct TotalsBlock {
    pub subtotal: f64,
    pub discount: f64,
    pub grand_total: i64,
}

/// One payment schedule row for reports and receipts
#[derive(Debug, Clone)]
pub struct PaymentRowData {
    pub phase: i32,
    pub amount: i64,
    pub status: String,
    pub paid_on: Option<NaiveDate>,
}

/// Bank instructions block; the QR is generated from `upi_id`
#[derive(Debug, Clone)]
pub struct BankInfo {
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub ifsc: String,
    pub upi_id: Option<String>,
}

/// Everything a single document needs.
#[derive(Debug, Clone)]
pub struct DocumentData {
    pub kind: DocumentKind,
    pub company: CompanyInfo,
    pub client: PartyInfo,
    pub date: NaiveDate,
    pub lines: Vec<LineRow>,
    pub totals: TotalsBlock,
    /// Present on invoices, receipts, and reports
    pub payments: Vec<PaymentRowData>,
    pub amount_received: i64,
    pub balance: i64,
    pub bank: Option<BankInfo>,
    pub notes: Vec<String>,
}

/// Amounts are shown in whole-rupee style with the INR marker.
pub fn format_money(amount: f64) -> String {
    if (amount - amount.trunc()).abs() < 0.005 {
        format!("Rs. {}", group_digits(amount.trunc() as i64))
    } else {
        format!("Rs. {:.2}", amount)
    }
}

pub fn format_money_int(amount: i64) -> String {
    format!("Rs. {}", group_digits(amount))
}

fn group_digits(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(DocumentKind::Invoice.label(), "Invoice");
        assert_eq!(DocumentKind::Receipt { phase: 2 }.label(), "Receipt-Phase2");
        assert!(DocumentKind::Receipt { phase: 1 }.stamped_paid());
        assert!(!DocumentKind::Invoice.stamped_paid());
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(format_money_int(1_400), "Rs. 1,400");
        assert_eq!(format_money_int(100_000), "Rs. 100,000");
        assert_eq!(format_money(1_500.0), "Rs. 1,500");
        assert_eq!(format_money(1_076.39), "Rs. 1076.39");
    }
}
