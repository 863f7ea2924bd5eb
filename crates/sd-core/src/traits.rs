//! Core traits shared by models, repositories, and services.

use chrono::{DateTime, Utc};

/// Primary key type
pub type Id = i64;

/// Trait for entities that have a primary key
pub trait Identifiable {
    fn id(&self) -> Option<Id>;

    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

/// Trait for entities with created_at/updated_at timestamps
pub trait Timestamped {
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn updated_at(&self) -> Option<DateTime<Utc>>;
}

/// Trait for entities retired through a status flag instead of deletion.
/// Status 1 is active, 0 is inactive; rows are never hard-deleted so that
/// older records keep their references.
pub trait SoftDeletable {
    fn status(&self) -> i16;

    fn is_active(&self) -> bool {
        self.status() == 1
    }
}

/// Base trait for all domain entities
pub trait Entity: Identifiable + Timestamped + Send + Sync {
    /// The database table name
    const TABLE_NAME: &'static str;

    /// Human-readable type name for error messages
    const TYPE_NAME: &'static str;
}

/// Authenticated caller identity, resolved once per request.
pub trait UserContext: Send + Sync {
    fn user_id(&self) -> Id;
    fn is_admin(&self) -> bool;
}
