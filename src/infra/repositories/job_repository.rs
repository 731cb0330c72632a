//! Job repository.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::job::{self, job_type_to_str, ActiveModel, Entity as JobEntity};
use super::entities::user;
use crate::domain::job::JobListItem;
use crate::domain::{Job, JobStatus, JobType};
use crate::errors::{AppError, AppResult};
use crate::types::{PaginationParams, SortDirection, SortParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Public job-board filter predicate
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub search: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
}

/// Admin job listing filter predicate
#[derive(Debug, Clone, Default)]
pub struct JobListQuery {
    pub status: Option<JobStatus>,
    pub company_id: Option<Uuid>,
    pub search: Option<String>,
    pub sort: Option<SortParams>,
}

/// Job repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: Job) -> AppResult<Job>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Job>>;

    /// Full-record update keyed by id.
    async fn update(&self, job: Job) -> AppResult<Job>;

    /// Hard delete. Existing applications are left untouched.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Approved listings with search/location/type filters and pagination;
    /// returns the page plus the total match count.
    async fn list_public(
        &self,
        filter: JobFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<JobListItem>, u64)>;

    async fn list_by_company(&self, company_id: Uuid) -> AppResult<Vec<Job>>;

    /// Jobs awaiting admin approval (drafts excluded).
    async fn list_pending(&self) -> AppResult<Vec<Job>>;

    /// Admin listing with filters and sort.
    async fn list_admin(&self, query: JobListQuery) -> AppResult<Vec<Job>>;

    async fn count(&self) -> AppResult<u64>;

    async fn count_by_status(&self, status: JobStatus) -> AppResult<u64>;

    /// Bulk status update for all jobs owned by a company (account-deletion
    /// cascade). Returns the number of affected rows.
    async fn set_status_for_company(
        &self,
        company_id: Uuid,
        status: JobStatus,
        feedback: &str,
    ) -> AppResult<u64>;
}

/// Concrete implementation of JobRepository
pub struct JobStore {
    db: DatabaseConnection,
}

impl JobStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active(job: Job) -> AppResult<ActiveModel> {
    let salary = job
        .salary
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| AppError::internal(format!("Salary serialization failed: {}", e)))?;
    let skills = serde_json::to_value(&job.skills)
        .map_err(|e| AppError::internal(format!("Skills serialization failed: {}", e)))?;
    let eligibility = serde_json::to_value(&job.eligibility)
        .map_err(|e| AppError::internal(format!("Eligibility serialization failed: {}", e)))?;

    Ok(ActiveModel {
        id: Set(job.id),
        company_id: Set(job.company_id),
        title: Set(job.title),
        description: Set(job.description),
        requirements: Set(job.requirements),
        location: Set(job.location),
        job_type: Set(job_type_to_str(job.job_type).to_string()),
        salary: Set(salary),
        positions: Set(job.positions),
        skills: Set(skills),
        application_deadline: Set(job.application_deadline),
        eligibility: Set(eligibility),
        application_link: Set(job.application_link),
        status: Set(job.status.as_str().to_string()),
        admin_feedback: Set(job.admin_feedback),
        created_at: Set(job.created_at),
        updated_at: Set(job.updated_at),
    })
}

fn search_condition(search: &str, title: job::Column, description: job::Column) -> Condition {
    let pattern = format!("%{}%", search.to_lowercase());
    Condition::any()
        .add(Expr::expr(Func::lower(Expr::col((JobEntity, title)))).like(pattern.clone()))
        .add(Expr::expr(Func::lower(Expr::col((JobEntity, description)))).like(pattern))
}

fn sort_column(field: &str) -> Option<job::Column> {
    match field {
        "title" => Some(job::Column::Title),
        "status" => Some(job::Column::Status),
        "application_deadline" => Some(job::Column::ApplicationDeadline),
        "created_at" => Some(job::Column::CreatedAt),
        _ => None,
    }
}

#[async_trait]
impl JobRepository for JobStore {
    async fn create(&self, job: Job) -> AppResult<Job> {
        let model = to_active(job)?
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Job::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Job>> {
        let result = JobEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Job::from))
    }

    async fn update(&self, job: Job) -> AppResult<Job> {
        let model = to_active(job)?.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::NotFound,
            e => AppError::from(e),
        })?;

        Ok(Job::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = JobEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list_public(
        &self,
        filter: JobFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<JobListItem>, u64)> {
        let mut select =
            JobEntity::find().filter(job::Column::Status.eq(JobStatus::Approved.as_str()));

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            select = select.filter(search_condition(
                search,
                job::Column::Title,
                job::Column::Description,
            ));
        }
        if let Some(location) = filter.location.as_deref().filter(|s| !s.is_empty()) {
            select = select.filter(job::Column::Location.eq(location));
        }
        if let Some(job_type) = filter.job_type {
            select = select.filter(job::Column::JobType.eq(job_type_to_str(job_type)));
        }

        let paginator = select
            .order_by_desc(job::Column::CreatedAt)
            .find_also_related(user::Entity)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await.map_err(AppError::from)?;
        let rows = paginator
            .fetch_page(page.page.saturating_sub(1))
            .await
            .map_err(AppError::from)?;

        let items = rows
            .into_iter()
            .map(|(model, company)| {
                let job = Job::from(model);
                JobListItem {
                    id: job.id,
                    title: job.title,
                    company_id: job.company_id,
                    company_name: company.map(|c| c.name),
                    location: job.location,
                    job_type: job.job_type,
                    salary: job.salary,
                    application_deadline: job.application_deadline,
                    created_at: job.created_at,
                }
            })
            .collect();

        Ok((items, total))
    }

    async fn list_by_company(&self, company_id: Uuid) -> AppResult<Vec<Job>> {
        let models = JobEntity::find()
            .filter(job::Column::CompanyId.eq(company_id))
            .order_by_desc(job::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Job::from).collect())
    }

    async fn list_pending(&self) -> AppResult<Vec<Job>> {
        let models = JobEntity::find()
            .filter(job::Column::Status.eq(JobStatus::Pending.as_str()))
            .order_by_desc(job::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Job::from).collect())
    }

    async fn list_admin(&self, query: JobListQuery) -> AppResult<Vec<Job>> {
        let mut select = JobEntity::find();

        if let Some(status) = query.status {
            select = select.filter(job::Column::Status.eq(status.as_str()));
        }
        if let Some(company_id) = query.company_id {
            select = select.filter(job::Column::CompanyId.eq(company_id));
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            select = select.filter(search_condition(
                search,
                job::Column::Title,
                job::Column::Description,
            ));
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
            None => select.order_by_desc(job::Column::CreatedAt),
        };

        let models = select.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(Job::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        JobEntity::find().count(&self.db).await.map_err(Into::into)
    }

    async fn count_by_status(&self, status: JobStatus) -> AppResult<u64> {
        JobEntity::find()
            .filter(job::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn set_status_for_company(
        &self,
        company_id: Uuid,
        status: JobStatus,
        feedback: &str,
    ) -> AppResult<u64> {
        let result = JobEntity::update_many()
            .col_expr(job::Column::Status, Expr::value(status.as_str()))
            .col_expr(job::Column::AdminFeedback, Expr::value(feedback))
            .col_expr(job::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(job::Column::CompanyId.eq(company_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
