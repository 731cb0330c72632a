//! Application workflow - apply, review, interview, withdraw.
//!
//! The status transitions here are the consistency-sensitive part of the
//! system: duplicate applications are blocked twice (a lookup here and the
//! storage-level unique index), and every mutation is gated on the caller
//! being the student or company named on the record.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    Application, ApplicationStatus, InterviewRound, InterviewStatus, NewInterview, UserRole,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{
    ApplicationListQuery, ApplicationRepository, JobRepository, UploadKind, UploadStore,
    UserRepository,
};
use crate::notify::Notifier;

/// Resume file received with an apply request.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Application service trait for dependency injection.
#[async_trait]
pub trait ApplicationService: Send + Sync {
    /// Student applies to a job. The resume is required; the job must be
    /// approved and inside its deadline; one application per (job,
    /// student).
    async fn apply(
        &self,
        student_id: Uuid,
        job_id: Uuid,
        cover_letter: Option<String>,
        resume: ResumeUpload,
    ) -> AppResult<Application>;

    /// Student's own applications, newest first.
    async fn list_for_student(&self, student_id: Uuid) -> AppResult<Vec<Application>>;

    /// Applications on a job the company owns.
    async fn list_for_job(&self, company_id: Uuid, job_id: Uuid) -> AppResult<Vec<Application>>;

    /// Company moves an application along its pipeline.
    async fn update_status_company(
        &self,
        company_id: Uuid,
        application_id: Uuid,
        status: ApplicationStatus,
        feedback: Option<String>,
    ) -> AppResult<Application>;

    /// Admin override: any status, with admin notes.
    async fn update_status_admin(
        &self,
        application_id: Uuid,
        status: ApplicationStatus,
        admin_notes: Option<String>,
    ) -> AppResult<Application>;

    /// Company schedules an interview round; the application moves to
    /// `Interviewed` and the student is invited by email.
    async fn schedule_interview(
        &self,
        company_id: Uuid,
        application_id: Uuid,
        interview: NewInterview,
    ) -> AppResult<Application>;

    /// Student withdraws an application; the stored resume is deleted
    /// first (a missing file is skipped).
    async fn withdraw(&self, student_id: Uuid, application_id: Uuid) -> AppResult<()>;

    /// Admin: filtered listing across the portal.
    async fn list_admin(&self, query: ApplicationListQuery) -> AppResult<Vec<Application>>;
}

/// Concrete implementation of ApplicationService.
pub struct ApplicationManager {
    applications: Arc<dyn ApplicationRepository>,
    jobs: Arc<dyn JobRepository>,
    users: Arc<dyn UserRepository>,
    uploads: Arc<UploadStore>,
    notifier: Arc<dyn Notifier>,
}

impl ApplicationManager {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        jobs: Arc<dyn JobRepository>,
        users: Arc<dyn UserRepository>,
        uploads: Arc<UploadStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            applications,
            jobs,
            users,
            uploads,
            notifier,
        }
    }

    async fn owned_application(
        &self,
        company_id: Uuid,
        application_id: Uuid,
    ) -> AppResult<Application> {
        let application = self
            .applications
            .find_by_id(application_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if application.company_id != company_id {
            return Err(AppError::Forbidden);
        }

        Ok(application)
    }

    async fn notify_student_status(&self, application: &Application, feedback: Option<String>) {
        let student = match self.users.find_by_id(application.student_id).await {
            Ok(Some(student)) => student,
            Ok(None) => return,
            Err(err) => {
                tracing::warn!(error = %err, "Could not load student for status email");
                return;
            }
        };
        let job_title = match self.jobs.find_by_id(application.job_id).await {
            Ok(Some(job)) => job.title,
            _ => "your application".to_string(),
        };

        if let Err(err) = self
            .notifier
            .application_status_changed(&student.email, &job_title, application.status, feedback)
            .await
        {
            tracing::warn!(error = %err, "Failed to send application status email");
        }
    }
}

#[async_trait]
impl ApplicationService for ApplicationManager {
    async fn apply(
        &self,
        student_id: Uuid,
        job_id: Uuid,
        cover_letter: Option<String>,
        resume: ResumeUpload,
    ) -> AppResult<Application> {
        let job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let now = Utc::now();
        if job.status != crate::domain::JobStatus::Approved {
            return Err(AppError::bad_request(
                "This job is not accepting applications",
            ));
        }
        // Status is approved, so the only way to not be accepting is the
        // deadline; the boundary itself is inclusive
        if !job.is_accepting_applications(now) {
            return Err(AppError::bad_request("Application deadline has passed"));
        }

        // First duplicate check; the unique index is the backstop
        if self
            .applications
            .find_by_job_and_student(job_id, student_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Application"));
        }

        let resume_path = self.uploads.store(
            UploadKind::Resume,
            student_id,
            &resume.filename,
            &resume.bytes,
        )?;

        let application = Application {
            id: Uuid::new_v4(),
            job_id,
            company_id: job.company_id,
            student_id,
            status: ApplicationStatus::Pending,
            resume: resume_path.clone(),
            cover_letter,
            feedback: None,
            admin_notes: None,
            interviews: Vec::new(),
            offer: None,
            created_at: now,
            updated_at: now,
        };

        let application = match self.applications.create(application).await {
            Ok(application) => application,
            Err(err) => {
                // A racing apply may have won at the index; don't orphan
                // the file we just wrote
                if let Err(cleanup) = self.uploads.remove(&resume_path) {
                    tracing::warn!(error = %cleanup, "Failed to clean up resume after conflict");
                }
                return Err(err);
            }
        };

        // Best-effort notification to the owning company
        match self.users.find_by_id(job.company_id).await {
            Ok(Some(company)) => {
                let student_name = self
                    .users
                    .find_by_id(student_id)
                    .await
                    .ok()
                    .flatten()
                    .map(|s| s.name)
                    .unwrap_or_else(|| "A student".to_string());
                if let Err(err) = self
                    .notifier
                    .new_application(&company.email, &job.title, &student_name)
                    .await
                {
                    tracing::warn!(error = %err, "Failed to send new-application email");
                }
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "Could not load company for new-application email");
            }
        }

        Ok(application)
    }

    async fn list_for_student(&self, student_id: Uuid) -> AppResult<Vec<Application>> {
        self.applications.list_by_student(student_id).await
    }

    async fn list_for_job(&self, company_id: Uuid, job_id: Uuid) -> AppResult<Vec<Application>> {
        let job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if job.company_id != company_id {
            return Err(AppError::Forbidden);
        }

        self.applications.list_by_job(job_id).await
    }

    async fn update_status_company(
        &self,
        company_id: Uuid,
        application_id: Uuid,
        status: ApplicationStatus,
        feedback: Option<String>,
    ) -> AppResult<Application> {
        if !status.company_assignable() {
            return Err(AppError::validation("Invalid status"));
        }

        let mut application = self.owned_application(company_id, application_id).await?;

        if !application
            .status
            .can_transition(status, UserRole::Company)
        {
            return Err(AppError::validation(format!(
                "Cannot move an application out of {}",
                application.status
            )));
        }

        application.status = status;
        if feedback.is_some() {
            application.feedback = feedback.clone();
        }
        application.updated_at = Utc::now();

        let application = self.applications.update(application).await?;
        self.notify_student_status(&application, feedback)
            .await;

        Ok(application)
    }

    async fn update_status_admin(
        &self,
        application_id: Uuid,
        status: ApplicationStatus,
        admin_notes: Option<String>,
    ) -> AppResult<Application> {
        let mut application = self
            .applications
            .find_by_id(application_id)
            .await?
            .ok_or(AppError::NotFound)?;

        application.status = status;
        if admin_notes.is_some() {
            application.admin_notes = admin_notes.clone();
        }
        application.updated_at = Utc::now();

        let application = self.applications.update(application).await?;
        self.notify_student_status(&application, admin_notes)
            .await;

        Ok(application)
    }

    async fn schedule_interview(
        &self,
        company_id: Uuid,
        application_id: Uuid,
        interview: NewInterview,
    ) -> AppResult<Application> {
        let mut application = self.owned_application(company_id, application_id).await?;

        if !application
            .status
            .can_transition(ApplicationStatus::Interviewed, UserRole::Company)
        {
            return Err(AppError::validation(format!(
                "Cannot schedule an interview for a {} application",
                application.status
            )));
        }

        let round = InterviewRound {
            round: application.interviews.len() as u32 + 1,
            date: interview.date,
            mode: interview.mode,
            location: interview.location,
            meeting_link: interview.meeting_link,
            status: InterviewStatus::Scheduled,
            feedback: None,
        };
        application.interviews.push(round.clone());
        application.status = ApplicationStatus::Interviewed;
        application.updated_at = Utc::now();

        let application = self.applications.update(application).await?;

        // Best-effort invitation email
        let student = self.users.find_by_id(application.student_id).await;
        let company = self.users.find_by_id(company_id).await;
        if let (Ok(Some(student)), Ok(Some(company))) = (student, company) {
            let job_title = match self.jobs.find_by_id(application.job_id).await {
                Ok(Some(job)) => job.title,
                _ => "the position".to_string(),
            };
            if let Err(err) = self
                .notifier
                .interview_invitation(&student.email, &job_title, &company.name, &round)
                .await
            {
                tracing::warn!(error = %err, "Failed to send interview invitation");
            }
        }

        Ok(application)
    }

    async fn withdraw(&self, student_id: Uuid, application_id: Uuid) -> AppResult<()> {
        let application = self
            .applications
            .find_by_id(application_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if application.student_id != student_id {
            return Err(AppError::Forbidden);
        }

        // Resume file first; a missing file is skipped, not an error
        self.uploads.remove(&application.resume)?;
        self.applications.delete(application.id).await
    }

    async fn list_admin(&self, query: ApplicationListQuery) -> AppResult<Vec<Application>> {
        self.applications.list_admin(query).await
    }
}
