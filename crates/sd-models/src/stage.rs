//! Project stages
//!
//! Stage is an integer progress marker on a client record. The reference
//! table gives each marker its label; the constants below are the
//! milestones the workflow itself branches on.

use chrono::{DateTime, Utc};
use sd_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

pub const PRE_ESTIMATE: i16 = 0;
pub const ESTIMATE_PREPARED: i16 = 1;
pub const APPROVED: i16 = 2;
pub const WORK_STARTED: i16 = 3;
pub const COMPLETED: i16 = 4;

/// Stage reference row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: Option<Id>,
    /// The integer marker stored on clients
    pub position: i16,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identifiable for Stage {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

/// Label for a stage marker when the reference table is unavailable.
pub fn default_label(position: i16) -> &'static str {
    match position {
        PRE_ESTIMATE => "New enquiry",
        ESTIMATE_PREPARED => "Estimate prepared",
        APPROVED => "Estimate approved",
        WORK_STARTED => "Work in progress",
        COMPLETED => "Completed",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        assert_eq!(default_label(PRE_ESTIMATE), "New enquiry");
        assert_eq!(default_label(COMPLETED), "Completed");
        assert_eq!(default_label(99), "Unknown");
    }
}
