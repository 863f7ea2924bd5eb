//! User model

use chrono::{DateTime, Utc};
use sd_core::traits::{Entity, Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Back-office user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<Id>,
    pub name: String,
    pub phone: String,
    /// Argon2 digest; never serialized out
    #[serde(skip_serializing, default)]
    pub password_digest: String,
    #[serde(default)]
    pub admin: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identifiable for User {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for User {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Entity for User {
    const TABLE_NAME: &'static str = "users";
    const TYPE_NAME: &'static str = "User";
}

/// DTO for registering a user
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 4, max = 20))]
    pub phone: String,

    #[validate(length(min = 8))]
    pub password: String,

    #[serde(default)]
    pub admin: bool,
}

/// Login request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginDto {
    pub phone: String,
    pub password: String,
}
