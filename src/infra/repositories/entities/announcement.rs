//! Announcement database entity.

use sea_orm::entity::prelude::*;

use crate::domain::{Announcement, Audience};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub audience: String,
    pub created_by: Uuid,
    pub important: bool,
    pub expires_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Announcement {
    fn from(model: Model) -> Self {
        Announcement {
            id: model.id,
            title: model.title,
            content: model.content,
            audience: Audience::parse(&model.audience).unwrap_or_default(),
            created_by: model.created_by,
            important: model.important,
            expires_at: model.expires_at,
            created_at: model.created_at,
        }
    }
}
