//! Estimate totals
//!
//! Dimensions are entered in centimeters; rates are per square foot
//! (area materials) or per piece. The conversion factor is applied per
//! axis, so an area in cm² scales by the factor squared.

use sd_models::{MaterialLine, MeasurementType};

/// Centimeters to feet, applied once per axis
pub const CM_TO_FT: f64 = 0.0328084;

/// Area of one line in square feet.
pub fn area_sqft(length_cm: f64, breadth_cm: f64) -> f64 {
    (length_cm * CM_TO_FT) * (breadth_cm * CM_TO_FT)
}

/// Total for a single line: area × rate or pieces × rate.
/// Missing dimensions count as zero; the contracts reject them before
/// anything is persisted or rendered.
pub fn line_total(line: &MaterialLine) -> f64 {
    match line.measurement_type {
        MeasurementType::Area => {
            let length = line.length_cm.unwrap_or(0.0);
            let breadth = line.breadth_cm.unwrap_or(0.0);
            area_sqft(length, breadth) * line.unit_price
        }
        MeasurementType::Piece => line.quantity.unwrap_or(0.0) * line.unit_price,
    }
}

/// Computed totals for an estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateTotals {
    /// Sum of line totals before any discount
    pub subtotal: f64,
    /// subtotal - grand_total when a custom total was given, else 0
    pub discount: f64,
    /// Final amount, truncated toward zero for persistence
    pub grand_total: i64,
}

impl EstimateTotals {
    /// Compute totals, writing each line's total back onto the line.
    ///
    /// When `custom_total` is given it becomes the grand total and the
    /// difference to the subtotal is recorded as the discount; otherwise
    /// the subtotal is the grand total and the discount is zero.
    pub fn compute(lines: &mut [MaterialLine], custom_total: Option<f64>) -> Self {
        let mut subtotal = 0.0;
        for line in lines.iter_mut() {
            line.line_total = line_total(line);
            subtotal += line.line_total;
        }

        let (grand, discount) = match custom_total {
            Some(total) => (total, subtotal - total),
            None => (subtotal, 0.0),
        };

        Self {
            subtotal,
            discount,
            grand_total: grand.trunc() as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1 sq ft is 30.48 cm on each side
    const ONE_SQFT_CM: f64 = 30.48;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 0.01, "{} !≈ {}", a, b);
    }

    #[test]
    fn test_area_conversion() {
        assert_close(area_sqft(ONE_SQFT_CM, ONE_SQFT_CM), 1.0);
        assert_close(area_sqft(100.0, 100.0), 10.7639);
    }

    #[test]
    fn test_area_line_total() {
        let line = MaterialLine::area("Panel", 100.0, 100.0, 100.0);
        assert_close(line_total(&line), 1_076.39);
    }

    #[test]
    fn test_piece_line_total() {
        let line = MaterialLine::piece("Handle", 8.0, 350.0);
        assert_close(line_total(&line), 2_800.0);
    }

    #[test]
    fn test_subtotal_is_sum_of_lines() {
        let mut lines = vec![
            MaterialLine::area("A", ONE_SQFT_CM * 2.0, ONE_SQFT_CM, 100.0),
            MaterialLine::piece("B", 3.0, 50.0),
        ];
        let totals = EstimateTotals::compute(&mut lines, None);

        assert_close(lines[0].line_total, 200.0);
        assert_close(lines[1].line_total, 150.0);
        assert_close(totals.subtotal, lines[0].line_total + lines[1].line_total);
        assert_eq!(totals.discount, 0.0);
    }

    #[test]
    fn test_custom_total_yields_discount() {
        // Two materials of 10 and 5 sq ft at 100/sq ft: subtotal 1500.
        let mut lines = vec![
            MaterialLine::area("A", ONE_SQFT_CM * 5.0, ONE_SQFT_CM * 2.0, 100.0),
            MaterialLine::area("B", ONE_SQFT_CM * 5.0, ONE_SQFT_CM, 100.0),
        ];
        let totals = EstimateTotals::compute(&mut lines, Some(1_400.0));

        assert_close(totals.subtotal, 1_500.0);
        assert_close(totals.discount, 100.0);
        assert_eq!(totals.grand_total, 1_400);
    }

    #[test]
    fn test_flooring_never_increases() {
        let mut lines = vec![MaterialLine::piece("A", 3.0, 33.33)];
        let totals = EstimateTotals::compute(&mut lines, None);

        assert_close(totals.subtotal, 99.99);
        assert_eq!(totals.grand_total, 99);
        assert!((totals.grand_total as f64) <= totals.subtotal);
    }
}
