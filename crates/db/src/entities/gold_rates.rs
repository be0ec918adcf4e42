//! `SeaORM` Entity for the gold_rates table.
//!
//! One row is one published snapshot: nine figures (selling, exchange,
//! making charges for each purity) keyed by a unique release timestamp.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "gold_rates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub gold_24k_new_rate: Decimal,
    pub gold_24k_exchange_rate: Decimal,
    pub gold_24k_making_charges: Decimal,
    pub gold_22k_new_rate: Decimal,
    pub gold_22k_exchange_rate: Decimal,
    pub gold_22k_making_charges: Decimal,
    pub gold_18k_new_rate: Decimal,
    pub gold_18k_exchange_rate: Decimal,
    pub gold_18k_making_charges: Decimal,
    #[sea_orm(unique)]
    pub release_datetime: DateTime,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
