//! Deterministic file names
//!
//! `<ClientName>_<DocumentType>[-PhaseN].pdf` with whitespace runs
//! collapsed to single underscores.

use regex::Regex;

use crate::data::DocumentKind;

pub fn document_file_name(client_name: &str, kind: DocumentKind) -> String {
    let whitespace = Regex::new(r"\s+").unwrap();
    let client = whitespace.replace_all(client_name.trim(), "_");
    format!("{}_{}.pdf", client, kind.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_collapse_to_underscores() {
        assert_eq!(
            document_file_name("A B  C", DocumentKind::Invoice),
            "A_B_C_Invoice.pdf"
        );
    }

    #[test]
    fn test_receipt_carries_phase() {
        assert_eq!(
            document_file_name("Asha Varma", DocumentKind::Receipt { phase: 2 }),
            "Asha_Varma_Receipt-Phase2.pdf"
        );
    }

    #[test]
    fn test_report_name() {
        assert_eq!(
            document_file_name(" Asha  Varma ", DocumentKind::PaymentReport),
            "Asha_Varma_Payment_Report.pdf"
        );
    }
}
