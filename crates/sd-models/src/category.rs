//! Category and subcategory reference data
//!
//! Both are soft-deleted through a status flag (1 active, 0 inactive)
//! and never removed, so materials created before a deactivation keep
//! their references.

use chrono::{DateTime, Utc};
use sd_core::traits::{Id, Identifiable, SoftDeletable, Timestamped};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// 1 = active, 0 = inactive
    #[serde(default = "default_status")]
    pub status: i16,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: Option<Id>,

    pub category_id: Id,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// 1 = active, 0 = inactive
    #[serde(default = "default_status")]
    pub status: i16,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_status() -> i16 {
    1
}

impl Identifiable for Category {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Category {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl SoftDeletable for Category {
    fn status(&self) -> i16 {
        self.status
    }
}

impl Identifiable for Subcategory {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl SoftDeletable for Subcategory {
    fn status(&self) -> i16 {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_delete_flag() {
        let category = Category {
            id: Some(1),
            name: "Woodwork".into(),
            status: 1,
            created_at: None,
            updated_at: None,
        };
        assert!(category.is_active());

        let retired = Category { status: 0, ..category };
        assert!(!retired.is_active());
    }
}
