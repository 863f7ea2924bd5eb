//! Estimate contracts
//!
//! Every material line must pass before totals are computed or any PDF
//! is generated: a name, and strictly positive dimensions, quantity, and
//! rate for its measurement type.

use sd_core::error::ValidationErrors;
use sd_models::{Estimate, MaterialLine, MeasurementType};

use crate::base::{require, Contract, ValidationResult};

/// Validates a single material line.
pub struct MaterialLineContract;

impl Contract<MaterialLine> for MaterialLineContract {
    fn validate(&self, line: &MaterialLine) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        require(&mut errors, "name", !line.name.trim().is_empty(), "is required");

        match line.measurement_type {
            MeasurementType::Area => {
                require(
                    &mut errors,
                    "length",
                    line.length_cm.map(|v| v > 0.0).unwrap_or(false),
                    "must be greater than zero",
                );
                require(
                    &mut errors,
                    "breadth",
                    line.breadth_cm.map(|v| v > 0.0).unwrap_or(false),
                    "must be greater than zero",
                );
            }
            MeasurementType::Piece => {
                require(
                    &mut errors,
                    "quantity",
                    line.quantity.map(|v| v > 0.0).unwrap_or(false),
                    "must be greater than zero",
                );
            }
        }

        require(
            &mut errors,
            "unitPrice",
            line.unit_price > 0.0,
            "must be greater than zero",
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Validates an estimate: a client, at least one line, every line valid,
/// and a custom total (if any) not above the computed subtotal.
pub struct EstimateContract;

impl Contract<Estimate> for EstimateContract {
    fn validate(&self, estimate: &Estimate) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if estimate.client_id <= 0 {
            errors.add("clientId", "is required");
        }
        if estimate.lines.is_empty() {
            errors.add_base("estimate needs at least one material");
        }

        let line_contract = MaterialLineContract;
        for (index, line) in estimate.lines.iter().enumerate() {
            if let Err(line_errors) = line_contract.validate(line) {
                for (field, messages) in line_errors.errors {
                    for message in messages {
                        errors.add(format!("lines[{}].{}", index, field), message);
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_models::EstimateStatus;

    fn estimate_with(lines: Vec<MaterialLine>) -> Estimate {
        Estimate {
            id: None,
            client_id: 1,
            lines,
            subtotal: 0.0,
            discount: 0.0,
            grand_total: 0,
            status: EstimateStatus::Pending,
            created_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_valid_area_line() {
        let line = MaterialLine::area("Wardrobe shutter", 210.0, 45.0, 1_450.0);
        assert!(MaterialLineContract.validate(&line).is_ok());
    }

    #[test]
    fn test_zero_length_is_rejected() {
        let line = MaterialLine::area("Wardrobe shutter", 0.0, 45.0, 1_450.0);
        let errors = MaterialLineContract.validate(&line).unwrap_err();
        assert!(errors.has_error("length"));
        assert!(!errors.has_error("breadth"));
    }

    #[test]
    fn test_missing_breadth_is_rejected() {
        let mut line = MaterialLine::area("Panel", 100.0, 45.0, 200.0);
        line.breadth_cm = None;
        let errors = MaterialLineContract.validate(&line).unwrap_err();
        assert!(errors.has_error("breadth"));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let line = MaterialLine::area("  ", 100.0, 45.0, 200.0);
        let errors = MaterialLineContract.validate(&line).unwrap_err();
        assert_eq!(errors.get("name").unwrap(), &vec!["is required".to_string()]);
    }

    #[test]
    fn test_piece_line_needs_quantity_not_dimensions() {
        let line = MaterialLine::piece("Handle", 4.0, 350.0);
        assert!(MaterialLineContract.validate(&line).is_ok());

        let bad = MaterialLine::piece("Handle", 0.0, 350.0);
        let errors = MaterialLineContract.validate(&bad).unwrap_err();
        assert!(errors.has_error("quantity"));
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let line = MaterialLine::piece("Handle", 4.0, -1.0);
        let errors = MaterialLineContract.validate(&line).unwrap_err();
        assert!(errors.has_error("unitPrice"));
    }

    #[test]
    fn test_estimate_requires_lines() {
        let estimate = estimate_with(vec![]);
        let errors = EstimateContract.validate(&estimate).unwrap_err();
        assert!(!errors.base_errors.is_empty());
    }

    #[test]
    fn test_estimate_reports_line_index() {
        let estimate = estimate_with(vec![
            MaterialLine::area("Ok", 100.0, 50.0, 200.0),
            MaterialLine::area("Bad", 0.0, 50.0, 200.0),
        ]);
        let errors = EstimateContract.validate(&estimate).unwrap_err();
        assert!(errors.has_error("lines[1].length"));
        assert!(!errors.has_error("lines[0].length"));
    }
}
