//! Profile workflow - owner-gated reads and typed upserts.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    CompanyDetails, NewProject, Profile, ProfileUpdate, Project, StudentDetails, User, UserRole,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{ProfileRepository, UploadStore, UserRepository};

/// Profile service trait for dependency injection.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Profile by owning user id (public read).
    async fn get_for_user(&self, user_id: Uuid) -> AppResult<Profile>;

    /// All profiles (admin).
    async fn list(&self) -> AppResult<Vec<Profile>>;

    /// Owner update. Role-divergent sections are rejected for the wrong
    /// role rather than silently dropped.
    async fn update(&self, user_id: Uuid, role: UserRole, update: ProfileUpdate)
        -> AppResult<Profile>;

    /// Replace the owner's avatar with an already-stored upload path,
    /// deleting the previous file.
    async fn set_avatar(&self, user_id: Uuid, stored_path: String) -> AppResult<User>;

    /// Replace a company's logo with an already-stored upload path,
    /// deleting the previous file.
    async fn set_logo(&self, user_id: Uuid, stored_path: String) -> AppResult<Profile>;

    /// Add a project to a student profile.
    async fn add_project(&self, user_id: Uuid, project: NewProject) -> AppResult<Profile>;

    /// Remove a project from a student profile.
    async fn remove_project(&self, user_id: Uuid, project_id: Uuid) -> AppResult<Profile>;
}

/// Concrete implementation of ProfileService.
pub struct ProfileManager {
    profiles: Arc<dyn ProfileRepository>,
    users: Arc<dyn UserRepository>,
    uploads: Arc<UploadStore>,
}

impl ProfileManager {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        users: Arc<dyn UserRepository>,
        uploads: Arc<UploadStore>,
    ) -> Self {
        Self {
            profiles,
            users,
            uploads,
        }
    }

    async fn profile_of(&self, user_id: Uuid) -> AppResult<Profile> {
        self.profiles
            .find_by_user(user_id)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl ProfileService for ProfileManager {
    async fn get_for_user(&self, user_id: Uuid) -> AppResult<Profile> {
        self.profile_of(user_id).await
    }

    async fn list(&self) -> AppResult<Vec<Profile>> {
        self.profiles.list().await
    }

    async fn update(
        &self,
        user_id: Uuid,
        role: UserRole,
        update: ProfileUpdate,
    ) -> AppResult<Profile> {
        if update.student.is_some() && role != UserRole::Student {
            return Err(AppError::validation(
                "Student details only apply to student accounts",
            ));
        }
        if update.company.is_some() && role != UserRole::Company {
            return Err(AppError::validation(
                "Company details only apply to company accounts",
            ));
        }

        let mut profile = self.profile_of(user_id).await?;

        if let Some(bio) = update.bio {
            profile.bio = Some(bio);
        }
        if let Some(location) = update.location {
            profile.location = Some(location);
        }
        if let Some(website) = update.website {
            profile.website = Some(website);
        }
        if let Some(skills) = update.skills {
            profile.skills = skills;
        }
        if let Some(social) = update.social {
            profile.social = social;
        }
        if let Some(student) = update.student {
            // Keep the project list; it is managed by its own endpoints
            let projects = profile
                .student
                .as_ref()
                .map(|s| s.projects.clone())
                .unwrap_or_default();
            profile.student = Some(StudentDetails { projects, ..student });
        }
        if let Some(company) = update.company {
            // Keep the stored logo; it is managed by the upload endpoint
            let logo = profile.company.as_ref().and_then(|c| c.logo.clone());
            profile.company = Some(CompanyDetails { logo, ..company });
        }
        profile.updated_at = Utc::now();

        self.profiles.update(profile).await
    }

    async fn set_avatar(&self, user_id: Uuid, stored_path: String) -> AppResult<User> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if let Some(old) = user.avatar.replace(stored_path) {
            if let Err(err) = self.uploads.remove(&old) {
                tracing::warn!(error = %err, "Failed to delete previous avatar");
            }
        }
        user.updated_at = Utc::now();

        self.users.update(user).await
    }

    async fn set_logo(&self, user_id: Uuid, stored_path: String) -> AppResult<Profile> {
        let mut profile = self.profile_of(user_id).await?;

        let mut company = profile.company.take().unwrap_or_default();
        if let Some(old) = company.logo.replace(stored_path) {
            if let Err(err) = self.uploads.remove(&old) {
                tracing::warn!(error = %err, "Failed to delete previous logo");
            }
        }
        profile.company = Some(company);
        profile.updated_at = Utc::now();

        self.profiles.update(profile).await
    }

    async fn add_project(&self, user_id: Uuid, project: NewProject) -> AppResult<Profile> {
        let mut profile = self.profile_of(user_id).await?;

        let mut student = profile.student.take().unwrap_or_default();
        student.projects.push(Project {
            id: Uuid::new_v4(),
            title: project.title,
            description: project.description,
            technologies: project.technologies,
            project_url: project.project_url,
            github_url: project.github_url,
            start_date: project.start_date,
            end_date: project.end_date,
        });
        profile.student = Some(student);
        profile.updated_at = Utc::now();

        self.profiles.update(profile).await
    }

    async fn remove_project(&self, user_id: Uuid, project_id: Uuid) -> AppResult<Profile> {
        let mut profile = self.profile_of(user_id).await?;

        let Some(student) = profile.student.as_mut() else {
            return Err(AppError::NotFound);
        };

        let before = student.projects.len();
        student.projects.retain(|p| p.id != project_id);
        if student.projects.len() == before {
            return Err(AppError::NotFound);
        }
        profile.updated_at = Utc::now();

        self.profiles.update(profile).await
    }
}
