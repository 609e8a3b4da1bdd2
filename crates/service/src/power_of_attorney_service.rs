use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use models::errors::ModelError;
use models::power_of_attorney;
use models::record::{require_text, UNSAVED_ID};

use crate::errors::EntityKind;
use crate::records::service::overwrite;
use crate::records::{NewRecord, RecordKind, RecordPatch, RecordService};

pub struct PowerOfAttorneyKind;

impl RecordKind for PowerOfAttorneyKind {
    const ENTITY: EntityKind = EntityKind::PowerOfAttorney;
    type Record = power_of_attorney::Model;
    type Dto = PowerOfAttorneyDto;
    type New = NewPowerOfAttorney;
    type Patch = PowerOfAttorneyPatch;
}

pub type PowerOfAttorneyService<R> = RecordService<PowerOfAttorneyKind, R>;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewPowerOfAttorney {
    pub client_id: Option<i32>,
    pub attorney_name: String,
    pub attorney_type: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub last_updated_by: Option<String>,
}

impl NewRecord<power_of_attorney::Model> for NewPowerOfAttorney {
    fn client_id(&self) -> Option<i32> {
        self.client_id
    }

    fn validate(&self) -> Result<(), ModelError> {
        require_text("attorney_name", &self.attorney_name)
    }

    fn into_record(self, client_id: i32) -> power_of_attorney::Model {
        power_of_attorney::Model {
            id: UNSAVED_ID,
            client_id: Some(client_id),
            attorney_name: self.attorney_name,
            attorney_type: self.attorney_type,
            phone: self.phone,
            email: self.email,
            address: self.address,
            start_date: self.start_date,
            deleted: false,
            last_updated_by: self.last_updated_by,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PowerOfAttorneyPatch {
    pub attorney_name: Option<String>,
    pub attorney_type: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub deleted: Option<bool>,
    pub last_updated_by: Option<String>,
}

impl RecordPatch<power_of_attorney::Model> for PowerOfAttorneyPatch {
    fn validate(&self) -> Result<(), ModelError> {
        match &self.attorney_name {
            Some(n) => require_text("attorney_name", n),
            None => Ok(()),
        }
    }

    fn apply_to(self, r: &mut power_of_attorney::Model) {
        if let Some(n) = self.attorney_name {
            r.attorney_name = n;
        }
        overwrite(&mut r.attorney_type, self.attorney_type);
        overwrite(&mut r.phone, self.phone);
        overwrite(&mut r.email, self.email);
        overwrite(&mut r.address, self.address);
        overwrite(&mut r.start_date, self.start_date);
        overwrite(&mut r.last_updated_by, self.last_updated_by);
        if let Some(d) = self.deleted {
            r.deleted = d;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PowerOfAttorneyDto {
    pub id: i32,
    pub client_id: Option<i32>,
    pub attorney_name: String,
    pub attorney_type: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub last_updated_by: Option<String>,
}

impl From<power_of_attorney::Model> for PowerOfAttorneyDto {
    fn from(m: power_of_attorney::Model) -> Self {
        Self {
            id: m.id,
            client_id: m.client_id,
            attorney_name: m.attorney_name,
            attorney_type: m.attorney_type,
            phone: m.phone,
            email: m.email,
            address: m.address,
            start_date: m.start_date,
            last_updated_by: m.last_updated_by,
        }
    }
}
