//! End-to-end workflow scenario over in-memory repositories.
//!
//! Drives the real services (no mocks) through the full placement story:
//! registration, account approval, job posting and approval, application
//! with a resume, company review, and the account-deletion cascades.

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use placement_portal::config::Config;
use placement_portal::domain::{
    AccountStatus, Application, ApplicationStatus, Announcement, Audience, Eligibility,
    InterviewRound, Job, JobStatus, JobType, NewAnnouncement, NewJob, Profile, User, UserRole,
};
use placement_portal::domain::job::JobListItem;
use placement_portal::errors::{AppError, AppResult};
use placement_portal::infra::{
    AnnouncementRepository, ApplicationListQuery, ApplicationRepository, JobFilter, JobListQuery,
    JobRepository, ProfileRepository, UploadStore, UserListQuery, UserRepository,
};
use placement_portal::notify::Notifier;
use placement_portal::services::{
    AnnouncementManager, AnnouncementService, ApplicationManager, ApplicationService, AuthService,
    Authenticator, JobManager, JobService, ResumeUpload, UserManager, UserService,
};
use placement_portal::types::PaginationParams;

// =============================================================================
// In-memory repositories
// =============================================================================

#[derive(Default)]
struct MemUsers {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for MemUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: User) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(AppError::conflict("User"));
        }
        rows.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(AppError::NotFound)?;
        *slot = user.clone();
        Ok(user)
    }

    async fn set_status(&self, id: Uuid, status: AccountStatus) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        user.status = status;
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list(&self, _query: UserListQuery) -> AppResult<Vec<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role != UserRole::Admin)
            .cloned()
            .collect())
    }

    async fn list_companies(&self) -> AppResult<Vec<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role == UserRole::Company)
            .cloned()
            .collect())
    }

    async fn count_by_role(&self, role: UserRole) -> AppResult<u64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role == role)
            .count() as u64)
    }

    async fn count_by_role_and_status(
        &self,
        role: UserRole,
        status: AccountStatus,
    ) -> AppResult<u64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role == role && u.status == status)
            .count() as u64)
    }
}

#[derive(Default)]
struct MemProfiles {
    rows: Mutex<Vec<Profile>>,
}

#[async_trait]
impl ProfileRepository for MemProfiles {
    async fn create(&self, profile: Profile) -> AppResult<Profile> {
        self.rows.lock().unwrap().push(profile.clone());
        Ok(profile)
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn update(&self, profile: Profile) -> AppResult<Profile> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|p| p.id == profile.id)
            .ok_or(AppError::NotFound)?;
        *slot = profile.clone();
        Ok(profile)
    }

    async fn delete_by_user(&self, user_id: Uuid) -> AppResult<()> {
        self.rows.lock().unwrap().retain(|p| p.user_id != user_id);
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Profile>> {
        Ok(self.rows.lock().unwrap().clone())
    }
}

#[derive(Default)]
struct MemJobs {
    rows: Mutex<Vec<Job>>,
}

#[async_trait]
impl JobRepository for MemJobs {
    async fn create(&self, job: Job) -> AppResult<Job> {
        self.rows.lock().unwrap().push(job.clone());
        Ok(job)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Job>> {
        Ok(self.rows.lock().unwrap().iter().find(|j| j.id == id).cloned())
    }

    async fn update(&self, job: Job) -> AppResult<Job> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|j| j.id == job.id)
            .ok_or(AppError::NotFound)?;
        *slot = job.clone();
        Ok(job)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|j| j.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list_public(
        &self,
        _filter: JobFilter,
        _page: PaginationParams,
    ) -> AppResult<(Vec<JobListItem>, u64)> {
        let rows = self.rows.lock().unwrap();
        let items: Vec<JobListItem> = rows
            .iter()
            .filter(|j| j.status == JobStatus::Approved)
            .map(|j| JobListItem {
                id: j.id,
                title: j.title.clone(),
                company_id: j.company_id,
                company_name: None,
                location: j.location.clone(),
                job_type: j.job_type,
                salary: j.salary.clone(),
                application_deadline: j.application_deadline,
                created_at: j.created_at,
            })
            .collect();
        let total = items.len() as u64;
        Ok((items, total))
    }

    async fn list_by_company(&self, company_id: Uuid) -> AppResult<Vec<Job>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn list_pending(&self) -> AppResult<Vec<Job>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.status == JobStatus::Pending)
            .cloned()
            .collect())
    }

    async fn list_admin(&self, _query: JobListQuery) -> AppResult<Vec<Job>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }

    async fn count_by_status(&self, status: JobStatus) -> AppResult<u64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.status == status)
            .count() as u64)
    }

    async fn set_status_for_company(
        &self,
        company_id: Uuid,
        status: JobStatus,
        feedback: &str,
    ) -> AppResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let mut affected = 0;
        for job in rows.iter_mut().filter(|j| j.company_id == company_id) {
            job.status = status;
            job.admin_feedback = Some(feedback.to_string());
            affected += 1;
        }
        Ok(affected)
    }
}

#[derive(Default)]
struct MemApplications {
    rows: Mutex<Vec<Application>>,
}

#[async_trait]
impl ApplicationRepository for MemApplications {
    async fn create(&self, application: Application) -> AppResult<Application> {
        let mut rows = self.rows.lock().unwrap();
        // The storage-level unique constraint on (job, student)
        if rows
            .iter()
            .any(|a| a.job_id == application.job_id && a.student_id == application.student_id)
        {
            return Err(AppError::conflict("Application"));
        }
        rows.push(application.clone());
        Ok(application)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Application>> {
        Ok(self.rows.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_job_and_student(
        &self,
        job_id: Uuid,
        student_id: Uuid,
    ) -> AppResult<Option<Application>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.job_id == job_id && a.student_id == student_id)
            .cloned())
    }

    async fn update(&self, application: Application) -> AppResult<Application> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|a| a.id == application.id)
            .ok_or(AppError::NotFound)?;
        *slot = application.clone();
        Ok(application)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| a.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list_by_student(&self, student_id: Uuid) -> AppResult<Vec<Application>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn list_by_job(&self, job_id: Uuid) -> AppResult<Vec<Application>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn list_admin(&self, query: ApplicationListQuery) -> AppResult<Vec<Application>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| query.company_id.map_or(true, |c| a.company_id == c))
            .filter(|a| query.status.map_or(true, |s| a.status == s))
            .cloned()
            .collect())
    }

    async fn set_status_for_student(
        &self,
        student_id: Uuid,
        status: ApplicationStatus,
        note: &str,
    ) -> AppResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let mut affected = 0;
        for application in rows.iter_mut().filter(|a| a.student_id == student_id) {
            application.status = status;
            application.admin_notes = Some(note.to_string());
            affected += 1;
        }
        Ok(affected)
    }

    async fn set_status_for_company(
        &self,
        company_id: Uuid,
        status: ApplicationStatus,
        note: &str,
    ) -> AppResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let mut affected = 0;
        for application in rows.iter_mut().filter(|a| a.company_id == company_id) {
            application.status = status;
            application.admin_notes = Some(note.to_string());
            affected += 1;
        }
        Ok(affected)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }

    async fn count_with_status_since(
        &self,
        status: ApplicationStatus,
        since: DateTime<Utc>,
    ) -> AppResult<u64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.status == status && a.updated_at >= since)
            .count() as u64)
    }

    async fn list_with_status_between(
        &self,
        status: ApplicationStatus,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Application>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.status == status && a.updated_at >= start && a.updated_at <= end)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct MemAnnouncements {
    rows: Mutex<Vec<Announcement>>,
}

#[async_trait]
impl AnnouncementRepository for MemAnnouncements {
    async fn create(&self, announcement: Announcement) -> AppResult<Announcement> {
        self.rows.lock().unwrap().push(announcement.clone());
        Ok(announcement)
    }

    async fn list(&self) -> AppResult<Vec<Announcement>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| a.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Records which notification events fired, in order.
#[derive(Default)]
struct RecordingNotifier {
    events: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: &str) {
        self.events.lock().unwrap().push(event.to_string());
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn welcome(&self, _to: &str, _name: &str, _role: UserRole) -> AppResult<()> {
        self.push("welcome");
        Ok(())
    }

    async fn account_status_changed(
        &self,
        _to: &str,
        _status: AccountStatus,
        _role: UserRole,
    ) -> AppResult<()> {
        self.push("account_status_changed");
        Ok(())
    }

    async fn job_status_changed(
        &self,
        _to: &str,
        _job_title: &str,
        _status: JobStatus,
        _feedback: Option<String>,
    ) -> AppResult<()> {
        self.push("job_status_changed");
        Ok(())
    }

    async fn new_application(
        &self,
        _to: &str,
        _job_title: &str,
        _student_name: &str,
    ) -> AppResult<()> {
        self.push("new_application");
        Ok(())
    }

    async fn application_status_changed(
        &self,
        _to: &str,
        _job_title: &str,
        _status: ApplicationStatus,
        _feedback: Option<String>,
    ) -> AppResult<()> {
        self.push("application_status_changed");
        Ok(())
    }

    async fn interview_invitation(
        &self,
        _to: &str,
        _job_title: &str,
        _company_name: &str,
        _round: &InterviewRound,
    ) -> AppResult<()> {
        self.push("interview_invitation");
        Ok(())
    }

    async fn announcement_published(
        &self,
        _audience: placement_portal::domain::Audience,
        _title: &str,
    ) -> AppResult<()> {
        self.push("announcement_published");
        Ok(())
    }
}

// =============================================================================
// Harness
// =============================================================================

static ENV: Once = Once::new();

fn test_config() -> Config {
    ENV.call_once(|| {
        std::env::set_var("JWT_SECRET", "workflow-test-secret-at-least-32-chars!!");
    });
    Config::from_env()
}

struct Portal {
    auth: Authenticator,
    users: UserManager,
    jobs: JobManager,
    applications: ApplicationManager,
    notifier: Arc<RecordingNotifier>,
    profiles: Arc<MemProfiles>,
    application_rows: Arc<MemApplications>,
    job_rows: Arc<MemJobs>,
    _uploads_dir: tempfile::TempDir,
}

fn portal() -> Portal {
    let users = Arc::new(MemUsers::default());
    let profiles = Arc::new(MemProfiles::default());
    let jobs = Arc::new(MemJobs::default());
    let applications = Arc::new(MemApplications::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let uploads_dir = tempfile::tempdir().unwrap();
    let uploads = Arc::new(UploadStore::new(uploads_dir.path()).unwrap());

    Portal {
        auth: Authenticator::new(
            users.clone(),
            profiles.clone(),
            notifier.clone(),
            test_config(),
        ),
        users: UserManager::new(
            users.clone(),
            profiles.clone(),
            jobs.clone(),
            applications.clone(),
            notifier.clone(),
        ),
        jobs: JobManager::new(jobs.clone(), users.clone(), notifier.clone()),
        applications: ApplicationManager::new(
            applications.clone(),
            jobs.clone(),
            users.clone(),
            uploads,
            notifier.clone(),
        ),
        notifier,
        profiles,
        application_rows: applications,
        job_rows: jobs,
        _uploads_dir: uploads_dir,
    }
}

fn listing(deadline_days: i64) -> NewJob {
    NewJob {
        title: "Platform Engineer".to_string(),
        description: "Own the deployment pipeline".to_string(),
        requirements: "Rust, Postgres".to_string(),
        location: "Pune".to_string(),
        job_type: JobType::FullTime,
        salary: None,
        positions: 1,
        skills: vec!["rust".to_string()],
        application_deadline: Utc::now() + Duration::days(deadline_days),
        eligibility: Eligibility::default(),
        application_link: None,
        draft: false,
    }
}

fn resume() -> ResumeUpload {
    ResumeUpload {
        filename: "resume.pdf".to_string(),
        bytes: b"%PDF-1.4 workflow".to_vec(),
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn full_placement_workflow() {
    let portal = portal();

    // Company registers and starts out pending
    let company = portal
        .auth
        .register(
            "Acme Corp".to_string(),
            "hr@acme.example".to_string(),
            "CompanyPass1!".to_string(),
            UserRole::Company,
        )
        .await
        .unwrap();
    assert_eq!(company.user.status, AccountStatus::Pending);

    // A pending company cannot post yet
    let err = portal
        .jobs
        .create(company.user.id, listing(30))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // Admin approves the account, then the posting goes through as pending
    portal
        .users
        .update_status(company.user.id, AccountStatus::Approved)
        .await
        .unwrap();
    let job = portal
        .jobs
        .create(company.user.id, listing(30))
        .await
        .unwrap();
    assert_eq!(job.status, JobStatus::Pending);

    // Admin approves the listing
    let job = portal.jobs.approve(job.id).await.unwrap();
    assert_eq!(job.status, JobStatus::Approved);

    // Student registers; a profile is created alongside
    let student = portal
        .auth
        .register(
            "Priya Raman".to_string(),
            "priya@example.edu".to_string(),
            "StudentPass1!".to_string(),
            UserRole::Student,
        )
        .await
        .unwrap();
    assert_eq!(student.user.status, AccountStatus::Approved);
    assert!(portal
        .profiles
        .find_by_user(student.user.id)
        .await
        .unwrap()
        .is_some());

    // The issued token round-trips
    let claims = portal.auth.verify_token(&student.token.access_token).unwrap();
    assert_eq!(claims.sub, student.user.id);
    assert_eq!(claims.role, UserRole::Student);

    // Student logs in and applies with a resume
    portal
        .auth
        .login("priya@example.edu".to_string(), "StudentPass1!".to_string())
        .await
        .unwrap();
    let application = portal
        .applications
        .apply(student.user.id, job.id, Some("Hello!".to_string()), resume())
        .await
        .unwrap();
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert!(portal.notifier.events().contains(&"new_application".to_string()));

    // Applying again conflicts, never a second record
    let err = portal
        .applications
        .apply(student.user.id, job.id, None, resume())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Company sees exactly one pending application
    let seen = portal
        .applications
        .list_for_job(company.user.id, job.id)
        .await
        .unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].status, ApplicationStatus::Pending);

    // Company shortlists; the student's own list reflects it
    portal
        .applications
        .update_status_company(
            company.user.id,
            application.id,
            ApplicationStatus::Shortlisted,
            None,
        )
        .await
        .unwrap();
    let mine = portal
        .applications
        .list_for_student(student.user.id)
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].status, ApplicationStatus::Shortlisted);
    assert!(portal
        .notifier
        .events()
        .contains(&"application_status_changed".to_string()));
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let portal = portal();

    portal
        .auth
        .register(
            "First".to_string(),
            "dup@example.edu".to_string(),
            "Password1!".to_string(),
            UserRole::Student,
        )
        .await
        .unwrap();

    let err = portal
        .auth
        .register(
            "Second".to_string(),
            "dup@example.edu".to_string(),
            "Password2!".to_string(),
            UserRole::Student,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn blocked_accounts_cannot_login() {
    let portal = portal();

    let student = portal
        .auth
        .register(
            "Blocked Student".to_string(),
            "blocked@example.edu".to_string(),
            "Password1!".to_string(),
            UserRole::Student,
        )
        .await
        .unwrap();

    portal
        .users
        .update_status(student.user.id, AccountStatus::Blocked)
        .await
        .unwrap();

    let err = portal
        .auth
        .login("blocked@example.edu".to_string(), "Password1!".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn deleting_a_student_cascades_in_storage() {
    let portal = portal();

    // Approved company with an approved job
    let company = portal
        .auth
        .register(
            "Cascade Co".to_string(),
            "hr@cascade.example".to_string(),
            "CompanyPass1!".to_string(),
            UserRole::Company,
        )
        .await
        .unwrap();
    portal
        .users
        .update_status(company.user.id, AccountStatus::Approved)
        .await
        .unwrap();
    let job = portal
        .jobs
        .create(company.user.id, listing(30))
        .await
        .unwrap();
    let job = portal.jobs.approve(job.id).await.unwrap();

    // Student applies, then their account is deleted
    let student = portal
        .auth
        .register(
            "Departing Student".to_string(),
            "leaver@example.edu".to_string(),
            "Password1!".to_string(),
            UserRole::Student,
        )
        .await
        .unwrap();
    portal
        .applications
        .apply(student.user.id, job.id, None, resume())
        .await
        .unwrap();

    portal.users.delete(student.user.id).await.unwrap();

    // Zero profiles remain; every application is cancelled
    assert!(portal
        .profiles
        .find_by_user(student.user.id)
        .await
        .unwrap()
        .is_none());
    let rows = portal
        .application_rows
        .list_by_student(student.user.id)
        .await
        .unwrap();
    assert!(!rows.is_empty());
    assert!(rows
        .iter()
        .all(|a| a.status == ApplicationStatus::Cancelled));
}

#[tokio::test]
async fn deleting_a_company_cascades_in_storage() {
    let portal = portal();

    let company = portal
        .auth
        .register(
            "Folding Co".to_string(),
            "hr@folding.example".to_string(),
            "CompanyPass1!".to_string(),
            UserRole::Company,
        )
        .await
        .unwrap();
    portal
        .users
        .update_status(company.user.id, AccountStatus::Approved)
        .await
        .unwrap();
    let job = portal
        .jobs
        .create(company.user.id, listing(30))
        .await
        .unwrap();
    let job = portal.jobs.approve(job.id).await.unwrap();

    let student = portal
        .auth
        .register(
            "Bystander".to_string(),
            "bystander@example.edu".to_string(),
            "Password1!".to_string(),
            UserRole::Student,
        )
        .await
        .unwrap();
    portal
        .applications
        .apply(student.user.id, job.id, None, resume())
        .await
        .unwrap();

    portal.users.delete(company.user.id).await.unwrap();

    // All the company's jobs and applications end up rejected
    let jobs = portal
        .job_rows
        .list_by_company(company.user.id)
        .await
        .unwrap();
    assert!(!jobs.is_empty());
    assert!(jobs.iter().all(|j| j.status == JobStatus::Rejected));

    let applications = portal
        .application_rows
        .list_by_student(student.user.id)
        .await
        .unwrap();
    assert!(applications
        .iter()
        .all(|a| a.status == ApplicationStatus::Rejected));
}

#[tokio::test]
async fn announcements_lifecycle() {
    let rows = Arc::new(MemAnnouncements::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = AnnouncementManager::new(rows, notifier.clone());

    let created = service
        .create(
            Uuid::new_v4(),
            NewAnnouncement {
                title: "Placement drive".to_string(),
                content: "Sign up by Friday".to_string(),
                audience: Audience::Students,
                important: true,
                expires_at: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(created.audience, Audience::Students);
    assert!(notifier
        .events()
        .contains(&"announcement_published".to_string()));

    assert_eq!(service.list().await.unwrap().len(), 1);

    service.delete(created.id).await.unwrap();
    assert!(service.list().await.unwrap().is_empty());
    assert!(matches!(
        service.delete(created.id).await.unwrap_err(),
        AppError::NotFound
    ));
}

#[tokio::test]
async fn interview_scheduling_invites_the_student() {
    let portal = portal();

    let company = portal
        .auth
        .register(
            "Interview Co".to_string(),
            "hr@interview.example".to_string(),
            "CompanyPass1!".to_string(),
            UserRole::Company,
        )
        .await
        .unwrap();
    portal
        .users
        .update_status(company.user.id, AccountStatus::Approved)
        .await
        .unwrap();
    let job = portal
        .jobs
        .create(company.user.id, listing(30))
        .await
        .unwrap();
    let job = portal.jobs.approve(job.id).await.unwrap();

    let student = portal
        .auth
        .register(
            "Candidate".to_string(),
            "candidate@example.edu".to_string(),
            "Password1!".to_string(),
            UserRole::Student,
        )
        .await
        .unwrap();
    let application = portal
        .applications
        .apply(student.user.id, job.id, None, resume())
        .await
        .unwrap();

    let updated = portal
        .applications
        .schedule_interview(
            company.user.id,
            application.id,
            placement_portal::domain::NewInterview {
                date: Utc::now() + Duration::days(3),
                mode: placement_portal::domain::InterviewMode::Online,
                location: None,
                meeting_link: Some("https://meet.example/round1".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, ApplicationStatus::Interviewed);
    assert_eq!(updated.interviews.len(), 1);
    assert_eq!(updated.interviews[0].round, 1);
    assert!(portal
        .notifier
        .events()
        .contains(&"interview_invitation".to_string()));
}
