//! Material catalog
//!
//! Catalog entries seed estimate lines with a name, category, measurement
//! type, and default unit price. Entries are soft-deleted via the status
//! flag like categories.

use chrono::{DateTime, Utc};
use sd_core::traits::{Id, Identifiable, SoftDeletable, Timestamped};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Whether a material's total derives from an area or a piece count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementType {
    #[default]
    Area,
    Piece,
}

impl MeasurementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Piece => "piece",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "area" => Some(Self::Area),
            "piece" => Some(Self::Piece),
            _ => None,
        }
    }
}

/// Material catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub category_id: Id,
    pub subcategory_id: Option<Id>,

    #[serde(default)]
    pub measurement_type: MeasurementType,

    /// Default rate offered when the material is added to an estimate
    pub unit_price: f64,

    /// 1 = active, 0 = inactive
    #[serde(default = "default_status")]
    pub status: i16,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_status() -> i16 {
    1
}

impl Identifiable for Material {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Material {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl SoftDeletable for Material {
    fn status(&self) -> i16 {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_type_round_trip() {
        assert_eq!(MeasurementType::parse("area"), Some(MeasurementType::Area));
        assert_eq!(MeasurementType::parse("piece"), Some(MeasurementType::Piece));
        assert_eq!(MeasurementType::parse("volume"), None);
        assert_eq!(MeasurementType::Piece.as_str(), "piece");
    }
}
