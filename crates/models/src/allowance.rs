use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::client;
use crate::record::{OwnedRecord, RecordEntity};

/// Money a client receives or is entitled to (pension, care grant, ...).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "allowance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: Option<i32>,
    pub allowance_type: String,
    pub amount: Option<String>,
    pub frequency: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub deleted: bool,
    pub last_updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Client }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Client => Entity::belongs_to(client::Entity)
                .from(Column::ClientId)
                .to(client::Column::Id)
                .into(),
        }
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
