//! Client model
//!
//! A client record tracks one project from first contact through
//! completion. The `stage` marker drives which actions are offered next.

use chrono::{DateTime, Utc};
use sd_core::traits::{Entity, Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::stage;

/// Client entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1, max = 20))]
    pub phone: String,

    #[validate(email)]
    pub email: Option<String>,

    pub address: Option<String>,
    pub city: Option<String>,

    /// Progress marker, 0 = pre-estimate (see [`stage`])
    #[serde(default)]
    pub stage: i16,

    /// Set once the project's final milestone is reached
    #[serde(default)]
    pub completed: bool,

    /// Inactive clients are hidden from the default listing
    #[serde(default = "default_true")]
    pub active: bool,

    pub created_by: Option<Id>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl Default for Client {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            phone: String::new(),
            email: None,
            address: None,
            city: None,
            stage: stage::PRE_ESTIMATE,
            completed: false,
            active: true,
            created_by: None,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Identifiable for Client {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Client {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Entity for Client {
    const TABLE_NAME: &'static str = "clients";
    const TYPE_NAME: &'static str = "Client";
}

impl Client {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    /// An estimate can be prepared before any approval milestone
    pub fn can_prepare_estimate(&self) -> bool {
        self.stage < stage::APPROVED && !self.completed
    }

    pub fn can_start_work(&self) -> bool {
        self.stage == stage::APPROVED && !self.completed
    }

    pub fn is_in_progress(&self) -> bool {
        self.stage >= stage::WORK_STARTED && !self.completed
    }
}

/// DTO for creating a new client
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1, max = 20))]
    pub phone: String,

    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

impl From<CreateClientDto> for Client {
    fn from(dto: CreateClientDto) -> Self {
        Self {
            name: dto.name,
            phone: dto.phone,
            email: dto.email,
            address: dto.address,
            city: dto.city,
            ..Default::default()
        }
    }
}

/// DTO for updating a client
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientDto {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub active: Option<bool>,
}

impl UpdateClientDto {
    pub fn apply_to(&self, client: &mut Client) {
        if let Some(ref name) = self.name {
            client.name = name.clone();
        }
        if let Some(ref phone) = self.phone {
            client.phone = phone.clone();
        }
        if let Some(ref email) = self.email {
            client.email = Some(email.clone());
        }
        if let Some(ref address) = self.address {
            client.address = Some(address.clone());
        }
        if let Some(ref city) = self.city {
            client.city = Some(city.clone());
        }
        if let Some(active) = self.active {
            client.active = active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client_defaults() {
        let client = Client::new("Asha Varma", "9876543210");
        assert_eq!(client.stage, stage::PRE_ESTIMATE);
        assert!(client.active);
        assert!(!client.completed);
        assert!(client.can_prepare_estimate());
    }

    #[test]
    fn test_stage_gates_actions() {
        let mut client = Client::new("Asha Varma", "9876543210");
        client.stage = stage::APPROVED;
        assert!(!client.can_prepare_estimate());
        assert!(client.can_start_work());

        client.stage = stage::WORK_STARTED;
        assert!(client.is_in_progress());
    }

    #[test]
    fn test_update_dto_applies_only_set_fields() {
        let mut client = Client::new("Asha Varma", "9876543210");
        let dto = UpdateClientDto {
            city: Some("Pune".into()),
            ..Default::default()
        };
        dto.apply_to(&mut client);

        assert_eq!(client.city.as_deref(), Some("Pune"));
        assert_eq!(client.name, "Asha Varma");
    }
}
