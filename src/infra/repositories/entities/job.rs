//! Job database entity.

use sea_orm::entity::prelude::*;

use crate::domain::{Eligibility, Job, JobStatus, JobType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    pub job_type: String,
    pub salary: Option<Json>,
    pub positions: i32,
    pub skills: Json,
    pub application_deadline: DateTimeUtc,
    pub eligibility: Json,
    pub application_link: Option<String>,
    pub status: String,
    pub admin_feedback: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CompanyId",
        to = "super::user::Column::Id"
    )]
    Company,
    #[sea_orm(has_many = "super::application::Entity")]
    Applications,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn job_type_from_str(s: &str) -> JobType {
    match s {
        "part-time" => JobType::PartTime,
        "internship" => JobType::Internship,
        "contract" => JobType::Contract,
        _ => JobType::FullTime,
    }
}

pub fn job_type_to_str(job_type: JobType) -> &'static str {
    match job_type {
        JobType::FullTime => "full-time",
        JobType::PartTime => "part-time",
        JobType::Internship => "internship",
        JobType::Contract => "contract",
    }
}

/// Convert database model to domain entity
impl From<Model> for Job {
    fn from(model: Model) -> Self {
        Job {
            id: model.id,
            company_id: model.company_id,
            title: model.title,
            description: model.description,
            requirements: model.requirements,
            location: model.location,
            job_type: job_type_from_str(&model.job_type),
            salary: model
                .salary
                .and_then(|v| serde_json::from_value(v).ok()),
            positions: model.positions,
            skills: serde_json::from_value(model.skills).unwrap_or_default(),
            application_deadline: model.application_deadline,
            eligibility: serde_json::from_value(model.eligibility)
                .unwrap_or_else(|_| Eligibility::default()),
            application_link: model.application_link,
            status: JobStatus::parse(&model.status).unwrap_or(JobStatus::Pending),
            admin_feedback: model.admin_feedback,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
