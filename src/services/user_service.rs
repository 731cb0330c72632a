//! User/account workflow - admin directory, status gating, and the
//! account-deletion cascades.
//!
//! Cascade steps are independent sequential writes with no surrounding
//! transaction; a mid-cascade failure is returned to the caller with the
//! earlier steps already applied.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    AccountStatus, Application, ApplicationStatus, Job, JobStatus, Profile, User, UserResponse,
    UserRole,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{
    ApplicationRepository, JobRepository, ProfileRepository, UserListQuery, UserRepository,
};
use crate::notify::Notifier;

/// Admin view of a user with role-specific extras.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDetails {
    pub user: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub profile: Option<Profile>,
    /// Student accounts: their applications
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[schema(value_type = Vec<Object>)]
    pub applications: Vec<Application>,
    /// Company accounts: their listings
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[schema(value_type = Vec<Object>)]
    pub jobs: Vec<Job>,
}

/// Public directory entry: a company with its profile.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyDirectoryEntry {
    pub company: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub profile: Option<Profile>,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Admin directory (admins excluded).
    async fn list(&self, query: UserListQuery) -> AppResult<Vec<User>>;

    /// Admin view of one user with role-specific extras.
    async fn get_details(&self, id: Uuid) -> AppResult<UserDetails>;

    /// Admin status toggle; forbidden on admin accounts.
    async fn update_status(&self, id: Uuid, status: AccountStatus) -> AppResult<User>;

    /// Admin delete with domain cascade; forbidden on admin accounts.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Public company directory.
    async fn list_companies(&self) -> AppResult<Vec<CompanyDirectoryEntry>>;

    /// Public single-company lookup; 404 when the id is not a company.
    async fn get_company(&self, id: Uuid) -> AppResult<CompanyDirectoryEntry>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn ProfileRepository>,
    jobs: Arc<dyn JobRepository>,
    applications: Arc<dyn ApplicationRepository>,
    notifier: Arc<dyn Notifier>,
}

impl UserManager {
    pub fn new(
        users: Arc<dyn UserRepository>,
        profiles: Arc<dyn ProfileRepository>,
        jobs: Arc<dyn JobRepository>,
        applications: Arc<dyn ApplicationRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            users,
            profiles,
            jobs,
            applications,
            notifier,
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list(&self, query: UserListQuery) -> AppResult<Vec<User>> {
        self.users.list(query).await
    }

    async fn get_details(&self, id: Uuid) -> AppResult<UserDetails> {
        let user = self.users.find_by_id(id).await?.ok_or(AppError::NotFound)?;
        let profile = self.profiles.find_by_user(id).await?;

        let (applications, jobs) = match user.role {
            UserRole::Student => (self.applications.list_by_student(id).await?, Vec::new()),
            UserRole::Company => {
                let jobs = self.jobs.list_by_company(id).await?;
                let applications = self
                    .applications
                    .list_admin(crate::infra::ApplicationListQuery {
                        company_id: Some(id),
                        ..Default::default()
                    })
                    .await?;
                (applications, jobs)
            }
            UserRole::Admin => (Vec::new(), Vec::new()),
        };

        Ok(UserDetails {
            user: UserResponse::from(user),
            profile,
            applications,
            jobs,
        })
    }

    async fn update_status(&self, id: Uuid, status: AccountStatus) -> AppResult<User> {
        let user = self.users.find_by_id(id).await?.ok_or(AppError::NotFound)?;

        if user.is_admin() {
            return Err(AppError::bad_request("Cannot modify admin status"));
        }

        let user = self.users.set_status(id, status).await?;

        if let Err(err) = self
            .notifier
            .account_status_changed(&user.email, status, user.role)
            .await
        {
            tracing::warn!(error = %err, "Failed to send account status email");
        }

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let user = self.users.find_by_id(id).await?.ok_or(AppError::NotFound)?;

        if user.is_admin() {
            return Err(AppError::bad_request("Cannot delete admin accounts"));
        }

        match user.role {
            UserRole::Student => {
                self.profiles.delete_by_user(id).await?;
                let cancelled = self
                    .applications
                    .set_status_for_student(
                        id,
                        ApplicationStatus::Cancelled,
                        "Student account was deleted",
                    )
                    .await?;
                tracing::info!(user_id = %id, cancelled, "Student cascade applied");
            }
            UserRole::Company => {
                self.profiles.delete_by_user(id).await?;
                let rejected_jobs = self
                    .jobs
                    .set_status_for_company(id, JobStatus::Rejected, "Company account was deleted")
                    .await?;
                let rejected_applications = self
                    .applications
                    .set_status_for_company(
                        id,
                        ApplicationStatus::Rejected,
                        "Company account was deleted",
                    )
                    .await?;
                tracing::info!(
                    user_id = %id,
                    rejected_jobs,
                    rejected_applications,
                    "Company cascade applied"
                );
            }
            // Rejected above
            UserRole::Admin => {}
        }

        self.users.delete(id).await
    }

    async fn list_companies(&self) -> AppResult<Vec<CompanyDirectoryEntry>> {
        let companies = self.users.list_companies().await?;

        let mut entries = Vec::with_capacity(companies.len());
        for company in companies {
            let profile = self.profiles.find_by_user(company.id).await?;
            entries.push(CompanyDirectoryEntry {
                company: UserResponse::from(company),
                profile,
            });
        }

        Ok(entries)
    }

    async fn get_company(&self, id: Uuid) -> AppResult<CompanyDirectoryEntry> {
        let user = self.users.find_by_id(id).await?.ok_or(AppError::NotFound)?;

        if user.role != UserRole::Company {
            return Err(AppError::NotFound);
        }

        let profile = self.profiles.find_by_user(id).await?;
        Ok(CompanyDirectoryEntry {
            company: UserResponse::from(user),
            profile,
        })
    }
}
