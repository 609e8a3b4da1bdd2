//! Allowances a client receives.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use models::allowance;
use models::errors::ModelError;
use models::record::{require_text, UNSAVED_ID};

use crate::errors::EntityKind;
use crate::records::service::overwrite;
use crate::records::{NewRecord, RecordKind, RecordPatch, RecordService};

pub struct AllowanceKind;

impl RecordKind for AllowanceKind {
    const ENTITY: EntityKind = EntityKind::Allowance;
    type Record = allowance::Model;
    type Dto = AllowanceDto;
    type New = NewAllowance;
    type Patch = AllowancePatch;
}

pub type AllowanceService<R> = RecordService<AllowanceKind, R>;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewAllowance {
    pub client_id: Option<i32>,
    pub allowance_type: String,
    pub amount: Option<String>,
    pub frequency: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub last_updated_by: Option<String>,
}

impl NewRecord<allowance::Model> for NewAllowance {
    fn client_id(&self) -> Option<i32> {
        self.client_id
    }

    fn validate(&self) -> Result<(), ModelError> {
        require_text("allowance_type", &self.allowance_type)
    }

    fn into_record(self, client_id: i32) -> allowance::Model {
        allowance::Model {
            id: UNSAVED_ID,
            client_id: Some(client_id),
            allowance_type: self.allowance_type,
            amount: self.amount,
            frequency: self.frequency,
            start_date: self.start_date,
            end_date: self.end_date,
            notes: self.notes,
            deleted: false,
            last_updated_by: self.last_updated_by,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AllowancePatch {
    pub allowance_type: Option<String>,
    pub amount: Option<String>,
    pub frequency: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub deleted: Option<bool>,
    pub last_updated_by: Option<String>,
}

impl RecordPatch<allowance::Model> for AllowancePatch {
    fn validate(&self) -> Result<(), ModelError> {
        match &self.allowance_type {
            Some(t) => require_text("allowance_type", t),
            None => Ok(()),
        }
    }

    fn apply_to(self, r: &mut allowance::Model) {
        if let Some(t) = self.allowance_type {
            r.allowance_type = t;
        }
        overwrite(&mut r.amount, self.amount);
        overwrite(&mut r.frequency, self.frequency);
        overwrite(&mut r.start_date, self.start_date);
        overwrite(&mut r.end_date, self.end_date);
        overwrite(&mut r.notes, self.notes);
        overwrite(&mut r.last_updated_by, self.last_updated_by);
        if let Some(d) = self.deleted {
            r.deleted = d;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AllowanceDto {
    pub id: i32,
    pub client_id: Option<i32>,
    pub allowance_type: String,
    pub amount: Option<String>,
    pub frequency: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub last_updated_by: Option<String>,
}

impl From<allowance::Model> for AllowanceDto {
    fn from(m: allowance::Model) -> Self {
        Self {
            id: m.id,
            client_id: m.client_id,
            allowance_type: m.allowance_type,
            amount: m.amount,
            frequency: m.frequency,
            start_date: m.start_date,
            end_date: m.end_date,
            notes: m.notes,
            last_updated_by: m.last_updated_by,
        }
    }
}
