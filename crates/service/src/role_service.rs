//! Roles people play in a client's care.

use serde::{Deserialize, Serialize};

use models::errors::ModelError;
use models::record::{require_text, UNSAVED_ID};
use models::role;

use crate::errors::EntityKind;
use crate::records::service::overwrite;
use crate::records::{NewRecord, RecordKind, RecordPatch, RecordService};

pub struct RoleKind;

impl RecordKind for RoleKind {
    const ENTITY: EntityKind = EntityKind::Role;
    type Record = role::Model;
    type Dto = RoleDto;
    type New = NewRole;
    type Patch = RolePatch;
}

pub type RoleService<R> = RecordService<RoleKind, R>;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewRole {
    pub client_id: Option<i32>,
    pub role_name: String,
    pub description: Option<String>,
    pub last_updated_by: Option<String>,
}

impl NewRecord<role::Model> for NewRole {
    fn client_id(&self) -> Option<i32> {
        self.client_id
    }

    fn validate(&self) -> Result<(), ModelError> {
        require_text("role_name", &self.role_name)
    }

    fn into_record(self, client_id: i32) -> role::Model {
        role::Model {
            id: UNSAVED_ID,
            client_id: Some(client_id),
            role_name: self.role_name,
            description: self.description,
            deleted: false,
            last_updated_by: self.last_updated_by,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RolePatch {
    pub role_name: Option<String>,
    pub description: Option<String>,
    pub deleted: Option<bool>,
    pub last_updated_by: Option<String>,
}

impl RecordPatch<role::Model> for RolePatch {
    fn validate(&self) -> Result<(), ModelError> {
        match &self.role_name {
            Some(n) => require_text("role_name", n),
            None => Ok(()),
        }
    }

    fn apply_to(self, r: &mut role::Model) {
        if let Some(n) = self.role_name {
            r.role_name = n;
        }
        overwrite(&mut r.description, self.description);
        overwrite(&mut r.last_updated_by, self.last_updated_by);
        if let Some(d) = self.deleted {
            r.deleted = d;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoleDto {
    pub id: i32,
    pub client_id: Option<i32>,
    pub role_name: String,
    pub description: Option<String>,
    pub last_updated_by: Option<String>,
}

impl From<role::Model> for RoleDto {
    fn from(m: role::Model) -> Self {
        Self {
            id: m.id,
            client_id: m.client_id,
            role_name: m.role_name,
            description: m.description,
            last_updated_by: m.last_updated_by,
        }
    }
}
