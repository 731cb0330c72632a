//! Job workflow - listing lifecycle from company draft to admin verdict.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::job::JobListItem;
use crate::domain::{Job, JobStatus, JobUpdate, NewJob, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{JobFilter, JobListQuery, JobRepository, UserRepository};
use crate::notify::Notifier;
use crate::types::PaginationParams;

/// Job service trait for dependency injection.
#[async_trait]
pub trait JobService: Send + Sync {
    /// Create a listing for an approved company.
    async fn create(&self, company_id: Uuid, data: NewJob) -> AppResult<Job>;

    /// Public job board: approved listings with filters and pagination.
    async fn list_public(
        &self,
        filter: JobFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<JobListItem>, u64)>;

    async fn get(&self, id: Uuid) -> AppResult<Job>;

    /// Update an owned listing.
    async fn update(&self, company_id: Uuid, job_id: Uuid, update: JobUpdate) -> AppResult<Job>;

    /// Hard delete an owned listing.
    async fn delete(&self, company_id: Uuid, job_id: Uuid) -> AppResult<()>;

    async fn list_for_company(&self, company_id: Uuid) -> AppResult<Vec<Job>>;

    /// Admin: approve unconditionally.
    async fn approve(&self, job_id: Uuid) -> AppResult<Job>;

    /// Admin: status verdict with optional feedback, emailed to the owner.
    async fn update_status(
        &self,
        job_id: Uuid,
        status: JobStatus,
        feedback: Option<String>,
    ) -> AppResult<Job>;

    /// Admin: jobs awaiting approval.
    async fn list_pending(&self) -> AppResult<Vec<Job>>;

    /// Admin: filtered listing across all companies.
    async fn list_admin(&self, query: JobListQuery) -> AppResult<Vec<Job>>;
}

/// Concrete implementation of JobService.
pub struct JobManager {
    jobs: Arc<dyn JobRepository>,
    users: Arc<dyn UserRepository>,
    notifier: Arc<dyn Notifier>,
}

impl JobManager {
    pub fn new(
        jobs: Arc<dyn JobRepository>,
        users: Arc<dyn UserRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            jobs,
            users,
            notifier,
        }
    }

    async fn owned_job(&self, company_id: Uuid, job_id: Uuid) -> AppResult<Job> {
        let job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if job.company_id != company_id {
            return Err(AppError::Forbidden);
        }

        Ok(job)
    }
}

#[async_trait]
impl JobService for JobManager {
    async fn create(&self, company_id: Uuid, data: NewJob) -> AppResult<Job> {
        let company = self
            .users
            .find_by_id(company_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if company.role != UserRole::Company {
            return Err(AppError::Forbidden);
        }
        if !company.is_approved() {
            return Err(AppError::Forbidden);
        }

        if data.positions <= 0 {
            return Err(AppError::validation("Positions must be at least 1"));
        }

        let now = Utc::now();
        let job = Job {
            id: Uuid::new_v4(),
            company_id,
            title: data.title,
            description: data.description,
            requirements: data.requirements,
            location: data.location,
            job_type: data.job_type,
            salary: data.salary,
            positions: data.positions,
            skills: data.skills,
            application_deadline: data.application_deadline,
            eligibility: data.eligibility,
            application_link: data.application_link,
            status: if data.draft {
                JobStatus::Draft
            } else {
                JobStatus::Pending
            },
            admin_feedback: None,
            created_at: now,
            updated_at: now,
        };

        self.jobs.create(job).await
    }

    async fn list_public(
        &self,
        filter: JobFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<JobListItem>, u64)> {
        self.jobs.list_public(filter, page).await
    }

    async fn get(&self, id: Uuid) -> AppResult<Job> {
        self.jobs.find_by_id(id).await?.ok_or_not_found()
    }

    async fn update(&self, company_id: Uuid, job_id: Uuid, update: JobUpdate) -> AppResult<Job> {
        let mut job = self.owned_job(company_id, job_id).await?;

        if let Some(status) = update.status {
            if !status.company_assignable() {
                return Err(AppError::validation(
                    "Companies may only set draft, pending, or closed",
                ));
            }
            job.status = status;
        }

        if let Some(title) = update.title {
            job.title = title;
        }
        if let Some(description) = update.description {
            job.description = description;
        }
        if let Some(requirements) = update.requirements {
            job.requirements = requirements;
        }
        if let Some(location) = update.location {
            job.location = location;
        }
        if let Some(job_type) = update.job_type {
            job.job_type = job_type;
        }
        if let Some(salary) = update.salary {
            job.salary = Some(salary);
        }
        if let Some(positions) = update.positions {
            if positions <= 0 {
                return Err(AppError::validation("Positions must be at least 1"));
            }
            job.positions = positions;
        }
        if let Some(skills) = update.skills {
            job.skills = skills;
        }
        if let Some(deadline) = update.application_deadline {
            job.application_deadline = deadline;
        }
        if let Some(eligibility) = update.eligibility {
            job.eligibility = eligibility;
        }
        if let Some(link) = update.application_link {
            job.application_link = Some(link);
        }
        job.updated_at = Utc::now();

        self.jobs.update(job).await
    }

    async fn delete(&self, company_id: Uuid, job_id: Uuid) -> AppResult<()> {
        // Hard delete; existing applications keep their records
        let job = self.owned_job(company_id, job_id).await?;
        self.jobs.delete(job.id).await
    }

    async fn list_for_company(&self, company_id: Uuid) -> AppResult<Vec<Job>> {
        self.jobs.list_by_company(company_id).await
    }

    async fn approve(&self, job_id: Uuid) -> AppResult<Job> {
        // No state-machine guard: re-approving an approved job is a no-op
        let mut job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or(AppError::NotFound)?;

        job.status = JobStatus::Approved;
        job.updated_at = Utc::now();
        self.jobs.update(job).await
    }

    async fn update_status(
        &self,
        job_id: Uuid,
        status: JobStatus,
        feedback: Option<String>,
    ) -> AppResult<Job> {
        if !status.admin_assignable() {
            return Err(AppError::validation("Invalid status"));
        }

        let mut job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or(AppError::NotFound)?;

        job.status = status;
        if feedback.is_some() {
            job.admin_feedback = feedback.clone();
        }
        job.updated_at = Utc::now();

        let job = self.jobs.update(job).await?;

        // Best-effort notification to the owning company
        match self.users.find_by_id(job.company_id).await {
            Ok(Some(company)) => {
                if let Err(err) = self
                    .notifier
                    .job_status_changed(&company.email, &job.title, status, feedback.clone())
                    .await
                {
                    tracing::warn!(error = %err, "Failed to send job status email");
                }
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "Could not load company for job status email");
            }
        }

        Ok(job)
    }

    async fn list_pending(&self) -> AppResult<Vec<Job>> {
        self.jobs.list_pending().await
    }

    async fn list_admin(&self, query: JobListQuery) -> AppResult<Vec<Job>> {
        self.jobs.list_admin(query).await
    }
}
