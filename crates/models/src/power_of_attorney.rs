use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::client;
use crate::record::{OwnedRecord, RecordEntity};

/// Person legally authorised to act for a client.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "power_of_attorney")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: Option<i32>,
    pub attorney_name: String,
    /// e.g. `health`, `financial`
    pub attorney_type: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub start_date: Option<Date>,
    pub deleted: bool,
    pub last_updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Client }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Client => Entity::belongs_to(client::Entity).from(Column::ClientId).to(client::Column::Id).into() }
    }
}

impl Related<client::Entity> for Entity {
    fn to() -> RelationDef { Relation::Client.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl RecordEntity for Entity {
    fn id_column() -> Column { Column::Id }
    fn client_column() -> Column { Column::ClientId }
    fn deleted_column() -> Column { Column::Deleted }
}

impl OwnedRecord for Model {
    fn id(&self) -> i32 { self.id }
    fn set_id(&mut self, id: i32) { self.id = id; }
    fn client_id(&self) -> Option<i32> { self.client_id }
    fn is_deleted(&self) -> bool { self.deleted }
    fn set_deleted(&mut self, deleted: bool) { self.deleted = deleted; }
}
