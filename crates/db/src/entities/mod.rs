//! `SeaORM` entity definitions.

pub mod admin_users;
pub mod contact_enquiries;
pub mod content;
pub mod gold_rates;
pub mod sea_orm_active_enums;
pub mod stores;
