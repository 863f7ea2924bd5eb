//! Estimate model
//!
//! An estimate collects material lines for a client. Line and grand
//! totals are computed in `sd-billing` and stored alongside the raw
//! dimensions so documents can be regenerated without recomputation.

use chrono::{DateTime, Utc};
use sd_core::traits::{Entity, Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};

use crate::material::MeasurementType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EstimateStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl EstimateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// One material line on an estimate.
///
/// Area lines carry length/breadth in centimeters; piece lines carry a
/// quantity. Unit price is per square foot or per piece accordingly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialLine {
    pub id: Option<Id>,
    pub name: String,
    pub category_id: Option<Id>,
    pub subcategory_id: Option<Id>,
    pub measurement_type: MeasurementType,
    pub length_cm: Option<f64>,
    pub breadth_cm: Option<f64>,
    pub quantity: Option<f64>,
    pub unit_price: f64,
    /// Computed in sd-billing when the estimate is created
    pub line_total: f64,
}

impl MaterialLine {
    pub fn area(
        name: impl Into<String>,
        length_cm: f64,
        breadth_cm: f64,
        unit_price: f64,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            category_id: None,
            subcategory_id: None,
            measurement_type: MeasurementType::Area,
            length_cm: Some(length_cm),
            breadth_cm: Some(breadth_cm),
            quantity: None,
            unit_price,
            line_total: 0.0,
        }
    }

    pub fn piece(name: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            category_id: None,
            subcategory_id: None,
            measurement_type: MeasurementType::Piece,
            length_cm: None,
            breadth_cm: None,
            quantity: Some(quantity),
            unit_price,
            line_total: 0.0,
        }
    }
}

/// Estimate entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub id: Option<Id>,
    pub client_id: Id,
    pub lines: Vec<MaterialLine>,
    /// Sum of line totals before any discount
    pub subtotal: f64,
    /// subtotal - grand_total when a custom total was supplied, else 0
    pub discount: f64,
    /// Final amount, truncated toward zero for persistence
    pub grand_total: i64,
    #[serde(default)]
    pub status: EstimateStatus,
    pub created_by: Option<Id>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identifiable for Estimate {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Estimate {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Entity for Estimate {
    const TABLE_NAME: &'static str = "estimates";
    const TYPE_NAME: &'static str = "Estimate";
}

/// DTO for creating an estimate; totals are computed server-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEstimateDto {
    pub client_id: Id,
    pub lines: Vec<CreateMaterialLineDto>,
    /// Overrides the computed subtotal; the difference becomes the discount
    pub custom_total: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterialLineDto {
    pub name: String,
    pub category_id: Option<Id>,
    pub subcategory_id: Option<Id>,
    pub measurement_type: MeasurementType,
    pub length_cm: Option<f64>,
    pub breadth_cm: Option<f64>,
    pub quantity: Option<f64>,
    pub unit_price: f64,
}

impl From<CreateMaterialLineDto> for MaterialLine {
    fn from(dto: CreateMaterialLineDto) -> Self {
        Self {
            id: None,
            name: dto.name,
            category_id: dto.category_id,
            subcategory_id: dto.subcategory_id,
            measurement_type: dto.measurement_type,
            length_cm: dto.length_cm,
            breadth_cm: dto.breadth_cm,
            quantity: dto.quantity,
            unit_price: dto.unit_price,
            line_total: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        assert_eq!(EstimateStatus::parse("approved"), Some(EstimateStatus::Approved));
        assert_eq!(EstimateStatus::parse("bogus"), None);
        assert_eq!(EstimateStatus::Rejected.as_str(), "rejected");
    }

    #[test]
    fn test_line_constructors() {
        let area = MaterialLine::area("Wardrobe shutter", 210.0, 45.0, 1_450.0);
        assert_eq!(area.measurement_type, MeasurementType::Area);
        assert_eq!(area.quantity, None);

        let piece = MaterialLine::piece("Handle", 8.0, 350.0);
        assert_eq!(piece.measurement_type, MeasurementType::Piece);
        assert_eq!(piece.length_cm, None);
    }
}
