//! Shape shared by every client-owned record table.

use sea_orm::entity::prelude::*;

use crate::errors::ModelError;

/// Id carried by a record that has not been written yet; the store assigns
/// the real one on insert.
pub const UNSAVED_ID: i32 = 0;

/// A row owned by a client and soft-deleted through a flag.
pub trait OwnedRecord: Clone + Send + Sync + 'static {
    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
    fn client_id(&self) -> Option<i32>;
    fn is_deleted(&self) -> bool;
    fn set_deleted(&mut self, deleted: bool);

    /// Stamp the audit timestamp. No-op for tables without one.
    fn touch(&mut self, _at: DateTimeWithTimeZone) {}

    /// The owning client's code for tables keyed by it (one row per code).
    fn owner_code(&self) -> Option<&str> {
        None
    }

    fn is_new(&self) -> bool {
        self.id() == UNSAVED_ID
    }
}

/// Column lookup for the generic SeaORM repository.
pub trait RecordEntity: EntityTrait {
    fn id_column() -> Self::Column;
    fn client_column() -> Self::Column;
    fn deleted_column() -> Self::Column;
    fn owner_code_column() -> Option<Self::Column> {
        None
    }
}

/// Reject a blank required text field.
pub fn require_text(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_rejects_blank() {
        assert!(require_text("name", "Ada").is_ok());
        let err = require_text("name", "   ").unwrap_err();
        assert_eq!(err.to_string(), "validation error: name required");
    }
}
