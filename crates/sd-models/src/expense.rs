//! Project expenses
//!
//! Expenses are recorded against a client and grouped by category for
//! the summary cards and the per-category tables.

use chrono::{DateTime, NaiveDate, Utc};
use sd_core::traits::{Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Labour,
    Material,
    #[default]
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 3] = [Self::Labour, Self::Material, Self::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Labour => "labour",
            Self::Material => "material",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "labour" => Some(Self::Labour),
            "material" => Some(Self::Material),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Option<Id>,
    pub client_id: Id,
    /// Whole rupees
    pub amount: i64,
    #[serde(default)]
    pub category: ExpenseCategory,
    pub note: Option<String>,
    pub spent_on: NaiveDate,
    pub recorded_by: Option<Id>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identifiable for Expense {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Expense {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

/// DTO for recording an expense
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseDto {
    pub client_id: Id,
    pub amount: i64,
    pub category: ExpenseCategory,
    pub note: Option<String>,
    pub spent_on: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in ExpenseCategory::ALL {
            assert_eq!(ExpenseCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(ExpenseCategory::parse("travel"), None);
    }
}
