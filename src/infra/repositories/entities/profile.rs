//! Profile database entity.

use sea_orm::entity::prelude::*;

use crate::domain::{Profile, SocialLinks};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub skills: Json,
    pub social: Json,
    pub student_details: Option<Json>,
    pub company_details: Option<Json>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Profile {
    fn from(model: Model) -> Self {
        Profile {
            id: model.id,
            user_id: model.user_id,
            bio: model.bio,
            location: model.location,
            website: model.website,
            skills: serde_json::from_value(model.skills).unwrap_or_default(),
            social: serde_json::from_value(model.social)
                .unwrap_or_else(|_| SocialLinks::default()),
            student: model
                .student_details
                .and_then(|v| serde_json::from_value(v).ok()),
            company: model
                .company_details
                .and_then(|v| serde_json::from_value(v).ok()),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
