//! Job workflow unit tests.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockall::predicate::eq;
use uuid::Uuid;

use placement_portal::domain::{
    AccountStatus, Eligibility, Job, JobStatus, JobType, JobUpdate, NewJob, User, UserRole,
};
use placement_portal::errors::AppError;
use placement_portal::infra::{MockJobRepository, MockUserRepository};
use placement_portal::notify::MockNotifier;
use placement_portal::services::{JobManager, JobService};

fn company(id: Uuid, status: AccountStatus) -> User {
    User {
        id,
        name: "Acme Corp".to_string(),
        email: "hr@acme.example".to_string(),
        password_hash: "hashed".to_string(),
        role: UserRole::Company,
        status,
        avatar: None,
        contact_number: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn new_job() -> NewJob {
    NewJob {
        title: "Backend Engineer".to_string(),
        description: "Build services".to_string(),
        requirements: "Rust".to_string(),
        location: "Chennai".to_string(),
        job_type: JobType::FullTime,
        salary: None,
        positions: 2,
        skills: vec!["rust".to_string()],
        application_deadline: Utc::now() + Duration::days(30),
        eligibility: Eligibility::default(),
        application_link: None,
        draft: false,
    }
}

fn stored_job(company_id: Uuid, status: JobStatus) -> Job {
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
        application_deadline: Utc::now() + Duration::days(30),
        eligibility: Eligibility::default(),
        application_link: None,
        status,
        admin_feedback: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn service(jobs: MockJobRepository, users: MockUserRepository) -> JobManager {
    service_with_notifier(jobs, users, MockNotifier::new())
}

fn service_with_notifier(
    jobs: MockJobRepository,
    users: MockUserRepository,
    notifier: MockNotifier,
) -> JobManager {
    JobManager::new(Arc::new(jobs), Arc::new(users), Arc::new(notifier))
}

#[tokio::test]
async fn approved_company_creates_pending_job() {
    let company_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(company_id))
        .returning(move |id| Ok(Some(company(id, AccountStatus::Approved))));

    let mut jobs = MockJobRepository::new();
    jobs.expect_create()
        .withf(move |job| job.status == JobStatus::Pending && job.company_id == company_id)
        .returning(|job| Ok(job));

    let job = service(jobs, users)
        .create(company_id, new_job())
        .await
        .unwrap();
    assert_eq!(job.status, JobStatus::Pending);
}

#[tokio::test]
async fn draft_flag_creates_draft_job() {
    let company_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |id| Ok(Some(company(id, AccountStatus::Approved))));

    let mut jobs = MockJobRepository::new();
    jobs.expect_create()
        .withf(|job| job.status == JobStatus::Draft)
        .returning(|job| Ok(job));

    let mut data = new_job();
    data.draft = true;

    let job = service(jobs, users)
        .create(company_id, data)
        .await
        .unwrap();
    assert_eq!(job.status, JobStatus::Draft);
}

#[tokio::test]
async fn pending_company_cannot_post_jobs() {
    let company_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |id| Ok(Some(company(id, AccountStatus::Pending))));

    let err = service(MockJobRepository::new(), users)
        .create(company_id, new_job())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn student_cannot_post_jobs() {
    let caller = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(move |id| {
        let mut user = company(id, AccountStatus::Approved);
        user.role = UserRole::Student;
        Ok(Some(user))
    });

    let err = service(MockJobRepository::new(), users)
        .create(caller, new_job())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn update_rejects_foreign_company() {
    let owner = Uuid::new_v4();
    let job = stored_job(owner, JobStatus::Pending);
    let job_id = job.id;

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(move |_| Ok(Some(job.clone())));

    let err = service(jobs, MockUserRepository::new())
        .update(Uuid::new_v4(), job_id, JobUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn company_cannot_self_approve_through_update() {
    let owner = Uuid::new_v4();
    let job = stored_job(owner, JobStatus::Pending);
    let job_id = job.id;

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(move |_| Ok(Some(job.clone())));

    let err = service(jobs, MockUserRepository::new())
        .update(
            owner,
            job_id,
            JobUpdate {
                status: Some(JobStatus::Approved),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn company_can_close_own_job() {
    let owner = Uuid::new_v4();
    let job = stored_job(owner, JobStatus::Approved);
    let job_id = job.id;

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(move |_| Ok(Some(job.clone())));
    jobs.expect_update()
        .withf(|job| job.status == JobStatus::Closed)
        .returning(|job| Ok(job));

    let updated = service(jobs, MockUserRepository::new())
        .update(
            owner,
            job_id,
            JobUpdate {
                status: Some(JobStatus::Closed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, JobStatus::Closed);
}

#[tokio::test]
async fn approve_is_unconditional() {
    // Re-approving an already-approved job just writes Approved again
    let job = stored_job(Uuid::new_v4(), JobStatus::Approved);
    let job_id = job.id;

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(move |_| Ok(Some(job.clone())));
    jobs.expect_update()
        .withf(|job| job.status == JobStatus::Approved)
        .returning(|job| Ok(job));

    let approved = service(jobs, MockUserRepository::new())
        .approve(job_id)
        .await
        .unwrap();
    assert_eq!(approved.status, JobStatus::Approved);
}

#[tokio::test]
async fn admin_status_update_notifies_company_with_feedback() {
    let company_id = Uuid::new_v4();
    let job = stored_job(company_id, JobStatus::Pending);
    let job_id = job.id;

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(move |_| Ok(Some(job.clone())));
    jobs.expect_update()
        .withf(|job| {
            job.status == JobStatus::Rejected
                && job.admin_feedback.as_deref() == Some("Listing is too vague")
        })
        .returning(|job| Ok(job));

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |id| Ok(Some(company(id, AccountStatus::Approved))));

    let mut notifier = MockNotifier::new();
    notifier
        .expect_job_status_changed()
        .withf(|_, _, status, feedback| {
            *status == JobStatus::Rejected && feedback.as_deref() == Some("Listing is too vague")
        })
        .returning(|_, _, _, _| Ok(()));

    let updated = service_with_notifier(jobs, users, notifier)
        .update_status(
            job_id,
            JobStatus::Rejected,
            Some("Listing is too vague".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(updated.status, JobStatus::Rejected);
}

#[tokio::test]
async fn admin_status_update_rejects_non_verdict_statuses() {
    let err = service(MockJobRepository::new(), MockUserRepository::new())
        .update_status(Uuid::new_v4(), JobStatus::Closed, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
