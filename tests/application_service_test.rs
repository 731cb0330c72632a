//! Application workflow unit tests.
//!
//! Exercises the apply/review/withdraw rules over mocked repositories and
//! a real upload store in a temp directory.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockall::predicate::eq;
use uuid::Uuid;

use placement_portal::domain::{
    AccountStatus, Application, ApplicationStatus, Eligibility, Job, JobStatus, JobType, User,
    UserRole,
};
use placement_portal::errors::AppError;
use placement_portal::infra::{
    MockApplicationRepository, MockJobRepository, MockUserRepository, UploadStore,
};
use placement_portal::notify::MockNotifier;
use placement_portal::services::{ApplicationManager, ApplicationService, ResumeUpload};

fn test_user(id: Uuid, role: UserRole) -> User {
    User {
        id,
        name: "Test User".to_string(),
        email: "user@example.edu".to_string(),
        password_hash: "hashed".to_string(),
        role,
        status: AccountStatus::Approved,
        avatar: None,
        contact_number: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_job(company_id: Uuid, status: JobStatus, deadline_offset_secs: i64) -> Job {
    Job {
        id: Uuid::new_v4(),
        company_id,
        title: "Backend Engineer".to_string(),
        description: "Build services".to_string(),
        requirements: "Rust".to_string(),
        location: "Chennai".to_string(),
        job_type: JobType::FullTime,
        salary: None,
        positions: 2,
        skills: vec!["rust".to_string()],
        application_deadline: Utc::now() + Duration::seconds(deadline_offset_secs),
        eligibility: Eligibility::default(),
        application_link: None,
        status,
        admin_feedback: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_application(job: &Job, student_id: Uuid, status: ApplicationStatus) -> Application {
    Application {
        id: Uuid::new_v4(),
        job_id: job.id,
        company_id: job.company_id,
        student_id,
        status,
        resume: "resumes/stored.pdf".to_string(),
        cover_letter: None,
        feedback: None,
        admin_notes: None,
        interviews: Vec::new(),
        offer: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn resume() -> ResumeUpload {
    ResumeUpload {
        filename: "resume.pdf".to_string(),
        bytes: b"%PDF-1.4 test".to_vec(),
    }
}

struct Fixture {
    applications: MockApplicationRepository,
    jobs: MockJobRepository,
    users: MockUserRepository,
    notifier: MockNotifier,
    uploads_dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            applications: MockApplicationRepository::new(),
            jobs: MockJobRepository::new(),
            users: MockUserRepository::new(),
            notifier: MockNotifier::new(),
            uploads_dir: tempfile::tempdir().unwrap(),
        }
    }

    fn service(self) -> (ApplicationManager, Arc<UploadStore>, tempfile::TempDir) {
        let uploads = Arc::new(UploadStore::new(self.uploads_dir.path()).unwrap());
        let service = ApplicationManager::new(
            Arc::new(self.applications),
            Arc::new(self.jobs),
            Arc::new(self.users),
            uploads.clone(),
            Arc::new(self.notifier),
        );
        (service, uploads, self.uploads_dir)
    }
}

#[tokio::test]
async fn apply_creates_pending_application_and_notifies_company() {
    let company_id = Uuid::new_v4();
    let student_id = Uuid::new_v4();
    let job = test_job(company_id, JobStatus::Approved, 3600);
    let job_id = job.id;

    let mut fx = Fixture::new();
    let job_clone = job.clone();
    fx.jobs
        .expect_find_by_id()
        .with(eq(job_id))
        .returning(move |_| Ok(Some(job_clone.clone())));
    fx.applications
        .expect_find_by_job_and_student()
        .with(eq(job_id), eq(student_id))
        .returning(|_, _| Ok(None));
    fx.applications
        .expect_create()
        .withf(move |a| {
            a.status == ApplicationStatus::Pending
                && a.job_id == job_id
                && a.company_id == company_id
                && a.student_id == student_id
                && a.resume.starts_with("resumes/")
        })
        .returning(|a| Ok(a));
    fx.users.expect_find_by_id().returning(move |id| {
        Ok(Some(test_user(
            id,
            if id == company_id {
                UserRole::Company
            } else {
                UserRole::Student
            },
        )))
    });
    fx.notifier
        .expect_new_application()
        .returning(|_, _, _| Ok(()));

    let (service, uploads, _dir) = fx.service();
    let application = service
        .apply(student_id, job_id, Some("Hi".to_string()), resume())
        .await
        .unwrap();

    assert_eq!(application.status, ApplicationStatus::Pending);
    // The resume actually landed on disk
    assert!(uploads.root().join(&application.resume).exists());
}

#[tokio::test]
async fn apply_rejects_duplicate_application() {
    let company_id = Uuid::new_v4();
    let student_id = Uuid::new_v4();
    let job = test_job(company_id, JobStatus::Approved, 3600);
    let job_id = job.id;

    let mut fx = Fixture::new();
    let existing = test_application(&job, student_id, ApplicationStatus::Pending);
    fx.jobs
        .expect_find_by_id()
        .returning(move |_| Ok(Some(job.clone())));
    fx.applications
        .expect_find_by_job_and_student()
        .returning(move |_, _| Ok(Some(existing.clone())));
    // No create call expected

    let (service, _uploads, _dir) = fx.service();
    let err = service
        .apply(student_id, job_id, None, resume())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn apply_rejects_job_that_is_not_approved() {
    let student_id = Uuid::new_v4();
    let job = test_job(Uuid::new_v4(), JobStatus::Pending, 3600);
    let job_id = job.id;

    let mut fx = Fixture::new();
    fx.jobs
        .expect_find_by_id()
        .returning(move |_| Ok(Some(job.clone())));

    let (service, _uploads, _dir) = fx.service();
    let err = service
        .apply(student_id, job_id, None, resume())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn apply_rejects_past_deadline() {
    let student_id = Uuid::new_v4();
    let job = test_job(Uuid::new_v4(), JobStatus::Approved, -1);
    let job_id = job.id;

    let mut fx = Fixture::new();
    fx.jobs
        .expect_find_by_id()
        .returning(move |_| Ok(Some(job.clone())));

    let (service, _uploads, _dir) = fx.service();
    let err = service
        .apply(student_id, job_id, None, resume())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn apply_requires_valid_resume_file() {
    let student_id = Uuid::new_v4();
    let job = test_job(Uuid::new_v4(), JobStatus::Approved, 3600);
    let job_id = job.id;

    let mut fx = Fixture::new();
    fx.jobs
        .expect_find_by_id()
        .returning(move |_| Ok(Some(job.clone())));
    fx.applications
        .expect_find_by_job_and_student()
        .returning(|_, _| Ok(None));

    let (service, _uploads, _dir) = fx.service();
    let err = service
        .apply(
            student_id,
            job_id,
            None,
            ResumeUpload {
                filename: "resume.exe".to_string(),
                bytes: b"MZ".to_vec(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UploadRejected(_)));
}

#[tokio::test]
async fn company_cannot_touch_foreign_application() {
    let owner = Uuid::new_v4();
    let other_company = Uuid::new_v4();
    let student_id = Uuid::new_v4();
    let job = test_job(owner, JobStatus::Approved, 3600);
    let application = test_application(&job, student_id, ApplicationStatus::Pending);
    let application_id = application.id;

    let mut fx = Fixture::new();
    fx.applications
        .expect_find_by_id()
        .with(eq(application_id))
        .returning(move |_| Ok(Some(application.clone())));
    // update must never be called: the record stays unmodified

    let (service, _uploads, _dir) = fx.service();
    let err = service
        .update_status_company(
            other_company,
            application_id,
            ApplicationStatus::Shortlisted,
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn company_moves_application_to_shortlisted_and_student_is_notified() {
    let company_id = Uuid::new_v4();
    let student_id = Uuid::new_v4();
    let job = test_job(company_id, JobStatus::Approved, 3600);
    let application = test_application(&job, student_id, ApplicationStatus::Pending);
    let application_id = application.id;

    let mut fx = Fixture::new();
    fx.applications
        .expect_find_by_id()
        .returning(move |_| Ok(Some(application.clone())));
    fx.applications
        .expect_update()
        .withf(|a| a.status == ApplicationStatus::Shortlisted)
        .returning(|a| Ok(a));
    fx.users
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_user(id, UserRole::Student))));
    let job_clone = job.clone();
    fx.jobs
        .expect_find_by_id()
        .returning(move |_| Ok(Some(job_clone.clone())));
    fx.notifier
        .expect_application_status_changed()
        .returning(|_, _, _, _| Ok(()));

    let (service, _uploads, _dir) = fx.service();
    let updated = service
        .update_status_company(
            company_id,
            application_id,
            ApplicationStatus::Shortlisted,
            Some("Strong profile".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(updated.status, ApplicationStatus::Shortlisted);
    assert_eq!(updated.feedback.as_deref(), Some("Strong profile"));
}

#[tokio::test]
async fn company_cannot_assign_pending_or_cancelled() {
    let (service, _uploads, _dir) = Fixture::new().service();

    for status in [ApplicationStatus::Pending, ApplicationStatus::Cancelled] {
        let err = service
            .update_status_company(Uuid::new_v4(), Uuid::new_v4(), status, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

#[tokio::test]
async fn company_cannot_leave_terminal_state() {
    let company_id = Uuid::new_v4();
    let job = test_job(company_id, JobStatus::Approved, 3600);
    let application = test_application(&job, Uuid::new_v4(), ApplicationStatus::Hired);
    let application_id = application.id;

    let mut fx = Fixture::new();
    fx.applications
        .expect_find_by_id()
        .returning(move |_| Ok(Some(application.clone())));

    let (service, _uploads, _dir) = fx.service();
    let err = service
        .update_status_company(
            company_id,
            application_id,
            ApplicationStatus::Rejected,
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn admin_override_reaches_any_status() {
    let job = test_job(Uuid::new_v4(), JobStatus::Approved, 3600);
    let application = test_application(&job, Uuid::new_v4(), ApplicationStatus::Hired);
    let application_id = application.id;

    let mut fx = Fixture::new();
    fx.applications
        .expect_find_by_id()
        .returning(move |_| Ok(Some(application.clone())));
    fx.applications
        .expect_update()
        .withf(|a| {
            a.status == ApplicationStatus::Declined
                && a.admin_notes.as_deref() == Some("Offer declined on call")
        })
        .returning(|a| Ok(a));
    fx.users
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_user(id, UserRole::Student))));
    let job_clone = job.clone();
    fx.jobs
        .expect_find_by_id()
        .returning(move |_| Ok(Some(job_clone.clone())));
    fx.notifier
        .expect_application_status_changed()
        .returning(|_, _, _, _| Ok(()));

    let (service, _uploads, _dir) = fx.service();
    let updated = service
        .update_status_admin(
            application_id,
            ApplicationStatus::Declined,
            Some("Offer declined on call".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(updated.status, ApplicationStatus::Declined);
}

#[tokio::test]
async fn notification_failure_does_not_fail_the_update() {
    let company_id = Uuid::new_v4();
    let job = test_job(company_id, JobStatus::Approved, 3600);
    let application = test_application(&job, Uuid::new_v4(), ApplicationStatus::Pending);
    let application_id = application.id;

    let mut fx = Fixture::new();
    fx.applications
        .expect_find_by_id()
        .returning(move |_| Ok(Some(application.clone())));
    fx.applications.expect_update().returning(|a| Ok(a));
    fx.users
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_user(id, UserRole::Student))));
    let job_clone = job.clone();
    fx.jobs
        .expect_find_by_id()
        .returning(move |_| Ok(Some(job_clone.clone())));
    fx.notifier
        .expect_application_status_changed()
        .returning(|_, _, _, _| Err(AppError::internal("smtp down")));

    let (service, _uploads, _dir) = fx.service();
    let updated = service
        .update_status_company(
            company_id,
            application_id,
            ApplicationStatus::Reviewing,
            None,
        )
        .await
        .unwrap();

    assert_eq!(updated.status, ApplicationStatus::Reviewing);
}

#[tokio::test]
async fn withdraw_deletes_resume_file_then_record() {
    let student_id = Uuid::new_v4();
    let job = test_job(Uuid::new_v4(), JobStatus::Approved, 3600);

    let mut fx = Fixture::new();
    // Put a real file where the application points
    let uploads = UploadStore::new(fx.uploads_dir.path()).unwrap();
    let stored = uploads
        .store(
            placement_portal::infra::UploadKind::Resume,
            student_id,
            "resume.pdf",
            b"%PDF",
        )
        .unwrap();

    let mut application = test_application(&job, student_id, ApplicationStatus::Pending);
    application.resume = stored.clone();
    let application_id = application.id;

    fx.applications
        .expect_find_by_id()
        .returning(move |_| Ok(Some(application.clone())));
    fx.applications
        .expect_delete()
        .with(eq(application_id))
        .returning(|_| Ok(()));

    let (service, uploads, _dir) = fx.service();
    assert!(uploads.root().join(&stored).exists());

    service.withdraw(student_id, application_id).await.unwrap();
    assert!(!uploads.root().join(&stored).exists());
}

#[tokio::test]
async fn withdraw_with_missing_file_still_deletes_record() {
    let student_id = Uuid::new_v4();
    let job = test_job(Uuid::new_v4(), JobStatus::Approved, 3600);
    let application = test_application(&job, student_id, ApplicationStatus::Pending);
    let application_id = application.id;

    let mut fx = Fixture::new();
    fx.applications
        .expect_find_by_id()
        .returning(move |_| Ok(Some(application.clone())));
    fx.applications.expect_delete().returning(|_| Ok(()));

    let (service, _uploads, _dir) = fx.service();
    assert!(service.withdraw(student_id, application_id).await.is_ok());
}

#[tokio::test]
async fn withdraw_rejects_foreign_application() {
    let job = test_job(Uuid::new_v4(), JobStatus::Approved, 3600);
    let application = test_application(&job, Uuid::new_v4(), ApplicationStatus::Pending);
    let application_id = application.id;

    let mut fx = Fixture::new();
    fx.applications
        .expect_find_by_id()
        .returning(move |_| Ok(Some(application.clone())));

    let (service, _uploads, _dir) = fx.service();
    let err = service
        .withdraw(Uuid::new_v4(), application_id)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn listing_a_job_requires_ownership() {
    let owner = Uuid::new_v4();
    let job = test_job(owner, JobStatus::Approved, 3600);
    let job_id = job.id;

    let mut fx = Fixture::new();
    fx.jobs
        .expect_find_by_id()
        .returning(move |_| Ok(Some(job.clone())));

    let (service, _uploads, _dir) = fx.service();
    let err = service
        .list_for_job(Uuid::new_v4(), job_id)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Forbidden));
}
