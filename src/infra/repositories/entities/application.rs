//! Application database entity.
//!
//! Carries a compound unique index on (job_id, student_id); the repository
//! maps its violation to a conflict error.

use sea_orm::entity::prelude::*;

use crate::domain::{Application, ApplicationStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub job_id: Uuid,
    pub company_id: Uuid,
    pub student_id: Uuid,
    pub status: String,
    pub resume: String,
    pub cover_letter: Option<String>,
    pub feedback: Option<String>,
    pub admin_notes: Option<String>,
    pub interviews: Json,
    pub offer: Option<Json>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::job::Entity",
        from = "Column::JobId",
        to = "super::job::Column::Id"
    )]
    Job,
}

impl Related<super::job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Application {
    fn from(model: Model) -> Self {
        Application {
            id: model.id,
            job_id: model.job_id,
            company_id: model.company_id,
            student_id: model.student_id,
            status: ApplicationStatus::parse(&model.status).unwrap_or(ApplicationStatus::Pending),
            resume: model.resume,
            cover_letter: model.cover_letter,
            feedback: model.feedback,
            admin_notes: model.admin_notes,
            interviews: serde_json::from_value(model.interviews).unwrap_or_default(),
            offer: model.offer.and_then(|v| serde_json::from_value(v).ok()),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
