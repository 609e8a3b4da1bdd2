use std::fmt;

use thiserror::Error;

use crate::storage::StorageError;

/// Record kinds served by this crate; tags the entity-specific error variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Allowance,
    PowerOfAttorney,
    ServiceProvider,
    EmergencyPlan,
    HouseImage,
    Role,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Allowance => "allowance",
            EntityKind::PowerOfAttorney => "power_of_attorney",
            EntityKind::ServiceProvider => "service_provider",
            EntityKind::EmergencyPlan => "emergency_plan",
            EntityKind::HouseImage => "house_image",
            EntityKind::Role => "role",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Client lookup failed on a list path. Deliberately not tied to an entity.
    #[error("client not found: {0}")]
    ClientNotFound(i32),
    #[error("{entity} not found: {key}")]
    NotFound { entity: EntityKind, key: String },
    /// Create-path rejection: client missing or unresolvable, or a required field blank.
    #[error("{entity} validation failed: {message}")]
    Validation { entity: EntityKind, message: String },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: EntityKind, key: impl fmt::Display) -> Self {
        Self::NotFound { entity, key: key.to_string() }
    }

    pub fn validation(entity: EntityKind, message: impl Into<String>) -> Self {
        Self::Validation { entity, message: message.into() }
    }

    /// Attribute a model-level error to an entity kind.
    pub fn from_model(entity: EntityKind, err: models::errors::ModelError) -> Self {
        match err {
            models::errors::ModelError::Validation(message) => Self::Validation { entity, message },
            models::errors::ModelError::Db(e) => Self::Db(e),
        }
    }

    /// Entity the error belongs to, for the entity-specific kinds only.
    pub fn entity(&self) -> Option<EntityKind> {
        match self {
            Self::NotFound { entity, .. } | Self::Validation { entity, .. } => Some(*entity),
            Self::ClientNotFound(_) | Self::Storage(_) | Self::Db(_) => None,
        }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            Self::ClientNotFound(_) => 1001,
            Self::NotFound { .. } => 1002,
            Self::Validation { .. } => 1003,
            Self::Storage(_) => 1101,
            Self::Db(_) => 1200,
        }
    }
}

pub(crate) fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_not_found_is_not_an_entity_error() {
        let e = ServiceError::ClientNotFound(7);
        assert_eq!(e.entity(), None);
        assert_eq!(e.to_string(), "client not found: 7");

        let e = ServiceError::not_found(EntityKind::Role, 7);
        assert_eq!(e.entity(), Some(EntityKind::Role));
        assert_eq!(e.to_string(), "role not found: 7");
    }

    #[test]
    fn validation_and_not_found_share_the_entity() {
        let v = ServiceError::validation(EntityKind::Allowance, "client id required");
        let n = ServiceError::not_found(EntityKind::Allowance, 1);
        assert_eq!(v.entity(), n.entity());
        assert_ne!(v.code(), n.code());
    }

    #[test]
    fn model_errors_map_onto_entity() {
        let e = ServiceError::from_model(
            EntityKind::ServiceProvider,
            models::errors::ModelError::Validation("name required".into()),
        );
        assert!(matches!(e, ServiceError::Validation { entity: EntityKind::ServiceProvider, ref message } if message == "name required"));
    }
}
