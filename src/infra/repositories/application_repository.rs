//! Application repository.
//!
//! The insert path converts the (job_id, student_id) unique-index
//! violation into a `Conflict`, which is what turns a race between two
//! concurrent applies into one success and one clean rejection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::application::{self, ActiveModel, Entity as ApplicationEntity};
use crate::domain::{Application, ApplicationStatus};
use crate::errors::{AppError, AppResult};
use crate::types::{SortDirection, SortParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Admin application listing filter predicate
#[derive(Debug, Clone, Default)]
pub struct ApplicationListQuery {
    pub status: Option<ApplicationStatus>,
    pub job_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub sort: Option<SortParams>,
}

/// Application repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Insert a new application; a duplicate (job, student) pair surfaces
    /// as `Conflict`.
    async fn create(&self, application: Application) -> AppResult<Application>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Application>>;

    async fn find_by_job_and_student(
        &self,
        job_id: Uuid,
        student_id: Uuid,
    ) -> AppResult<Option<Application>>;

    /// Full-record update keyed by id.
    async fn update(&self, application: Application) -> AppResult<Application>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn list_by_student(&self, student_id: Uuid) -> AppResult<Vec<Application>>;

    async fn list_by_job(&self, job_id: Uuid) -> AppResult<Vec<Application>>;

    async fn list_admin(&self, query: ApplicationListQuery) -> AppResult<Vec<Application>>;

    /// Cascade step: mark every application of a student, noting why.
    async fn set_status_for_student(
        &self,
        student_id: Uuid,
        status: ApplicationStatus,
        note: &str,
    ) -> AppResult<u64>;

    /// Cascade step: mark every application addressed to a company.
    async fn set_status_for_company(
        &self,
        company_id: Uuid,
        status: ApplicationStatus,
        note: &str,
    ) -> AppResult<u64>;

    async fn count(&self) -> AppResult<u64>;

    async fn count_with_status_since(
        &self,
        status: ApplicationStatus,
        since: DateTime<Utc>,
    ) -> AppResult<u64>;

    /// Applications in a status updated inside a window, newest first
    /// (placement reporting).
    async fn list_with_status_between(
        &self,
        status: ApplicationStatus,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Application>>;
}

/// Concrete implementation of ApplicationRepository
pub struct ApplicationStore {
    db: DatabaseConnection,
}

impl ApplicationStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active(application: Application) -> AppResult<ActiveModel> {
    let interviews = serde_json::to_value(&application.interviews)
        .map_err(|e| AppError::internal(format!("Interview serialization failed: {}", e)))?;
    let offer = application
        .offer
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| AppError::internal(format!("Offer serialization failed: {}", e)))?;

    Ok(ActiveModel {
        id: Set(application.id),
        job_id: Set(application.job_id),
        company_id: Set(application.company_id),
        student_id: Set(application.student_id),
        status: Set(application.status.as_str().to_string()),
        resume: Set(application.resume),
        cover_letter: Set(application.cover_letter),
        feedback: Set(application.feedback),
        admin_notes: Set(application.admin_notes),
        interviews: Set(interviews),
        offer: Set(offer),
        created_at: Set(application.created_at),
        updated_at: Set(application.updated_at),
    })
}

fn map_insert_err(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Application"),
        _ => AppError::from(e),
    }
}

fn sort_column(field: &str) -> Option<application::Column> {
    match field {
        "status" => Some(application::Column::Status),
        "created_at" => Some(application::Column::CreatedAt),
        "updated_at" => Some(application::Column::UpdatedAt),
        _ => None,
    }
}

#[async_trait]
impl ApplicationRepository for ApplicationStore {
    async fn create(&self, application: Application) -> AppResult<Application> {
        let model = to_active(application)?
            .insert(&self.db)
            .await
            .map_err(map_insert_err)?;

        Ok(Application::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Application>> {
        let result = ApplicationEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Application::from))
    }

    async fn find_by_job_and_student(
        &self,
        job_id: Uuid,
        student_id: Uuid,
    ) -> AppResult<Option<Application>> {
        let result = ApplicationEntity::find()
            .filter(application::Column::JobId.eq(job_id))
            .filter(application::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Application::from))
    }

    async fn update(&self, application: Application) -> AppResult<Application> {
        let model = to_active(application)?
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => AppError::NotFound,
                e => AppError::from(e),
            })?;

        Ok(Application::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = ApplicationEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list_by_student(&self, student_id: Uuid) -> AppResult<Vec<Application>> {
        let models = ApplicationEntity::find()
            .filter(application::Column::StudentId.eq(student_id))
            .order_by_desc(application::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Application::from).collect())
    }

    async fn list_by_job(&self, job_id: Uuid) -> AppResult<Vec<Application>> {
        let models = ApplicationEntity::find()
            .filter(application::Column::JobId.eq(job_id))
            .order_by_desc(application::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Application::from).collect())
    }

    async fn list_admin(&self, query: ApplicationListQuery) -> AppResult<Vec<Application>> {
        let mut select = ApplicationEntity::find();

        if let Some(status) = query.status {
            select = select.filter(application::Column::Status.eq(status.as_str()));
        }
        if let Some(job_id) = query.job_id {
            select = select.filter(application::Column::JobId.eq(job_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(application::Column::StudentId.eq(student_id));
        }
        if let Some(company_id) = query.company_id {
            select = select.filter(application::Column::CompanyId.eq(company_id));
        }

        let sort = query.sort.unwrap_or_default();
        select = match sort_column(&sort.field) {
            Some(column) => {
                let order = match sort.direction {
                    SortDirection::Asc => Order::Asc,
                    SortDirection::Desc => Order::Desc,
                };
                select.order_by(column, order)
            }
            None => select.order_by_desc(application::Column::CreatedAt),
        };

        let models = select.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(Application::from).collect())
    }

    async fn set_status_for_student(
        &self,
        student_id: Uuid,
        status: ApplicationStatus,
        note: &str,
    ) -> AppResult<u64> {
        let result = ApplicationEntity::update_many()
            .col_expr(application::Column::Status, Expr::value(status.as_str()))
            .col_expr(application::Column::AdminNotes, Expr::value(note))
            .col_expr(application::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(application::Column::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn set_status_for_company(
        &self,
        company_id: Uuid,
        status: ApplicationStatus,
        note: &str,
    ) -> AppResult<u64> {
        let result = ApplicationEntity::update_many()
            .col_expr(application::Column::Status, Expr::value(status.as_str()))
            .col_expr(application::Column::AdminNotes, Expr::value(note))
            .col_expr(application::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(application::Column::CompanyId.eq(company_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn count(&self) -> AppResult<u64> {
        ApplicationEntity::find()
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn count_with_status_since(
        &self,
        status: ApplicationStatus,
        since: DateTime<Utc>,
    ) -> AppResult<u64> {
        ApplicationEntity::find()
            .filter(application::Column::Status.eq(status.as_str()))
            .filter(application::Column::UpdatedAt.gte(since))
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn list_with_status_between(
        &self,
        status: ApplicationStatus,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Application>> {
        let models = ApplicationEntity::find()
            .filter(application::Column::Status.eq(status.as_str()))
            .filter(application::Column::UpdatedAt.gte(start))
            .filter(application::Column::UpdatedAt.lte(end))
            .order_by_desc(application::Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Application::from).collect())
    }
}
