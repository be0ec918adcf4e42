//! `SeaORM` Entities for the nine CMS content tables.
//!
//! Every section shares one record shape, so the entity modules are
//! stamped from a single macro, one per table.

macro_rules! content_entity {
    ($module:ident, $table:literal) => {
        #[doc = concat!("`SeaORM` Entity for the ", $table, " table.")]
        pub mod $module {
            use sea_orm::entity::prelude::*;
            use serde::{Deserialize, Serialize};

            #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
            #[sea_orm(table_name = $table)]
            pub struct Model {
                #[sea_orm(primary_key, auto_increment = false)]
                pub id: Uuid,
                pub title: String,
                pub content: String,
                pub image: Option<String>,
                pub created_at: DateTimeWithTimeZone,
            }

            #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
            pub enum Relation {}

            impl ActiveModelBehavior for ActiveModel {}
        }
    };
}

content_entity!(guides, "guides");
content_entity!(about, "about");
content_entity!(team, "team");
content_entity!(missions, "missions");
content_entity!(terms, "terms");
content_entity!(visions, "visions");
content_entity!(awards, "awards");
content_entity!(achievements, "achievements");
content_entity!(notifications, "notifications");
