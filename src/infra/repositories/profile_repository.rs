//! Profile repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::profile::{self, ActiveModel, Entity as ProfileEntity};
use crate::domain::Profile;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Profile repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn create(&self, profile: Profile) -> AppResult<Profile>;

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Profile>>;

    /// Full-record update keyed by id.
    async fn update(&self, profile: Profile) -> AppResult<Profile>;

    /// Remove a user's profile (account-deletion cascade). Missing profile
    /// is not an error.
    async fn delete_by_user(&self, user_id: Uuid) -> AppResult<()>;

    async fn list(&self) -> AppResult<Vec<Profile>>;
}

/// Concrete implementation of ProfileRepository
pub struct ProfileStore {
    db: DatabaseConnection,
}

impl ProfileStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active(profile: Profile) -> AppResult<ActiveModel> {
    let skills = serde_json::to_value(&profile.skills)
        .map_err(|e| AppError::internal(format!("Skills serialization failed: {}", e)))?;
    let social = serde_json::to_value(&profile.social)
        .map_err(|e| AppError::internal(format!("Social links serialization failed: {}", e)))?;
    let student = profile
        .student
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| AppError::internal(format!("Student details serialization failed: {}", e)))?;
    let company = profile
        .company
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| AppError::internal(format!("Company details serialization failed: {}", e)))?;

    Ok(ActiveModel {
        id: Set(profile.id),
        user_id: Set(profile.user_id),
        bio: Set(profile.bio),
        location: Set(profile.location),
        website: Set(profile.website),
        skills: Set(skills),
        social: Set(social),
        student_details: Set(student),
        company_details: Set(company),
        created_at: Set(profile.created_at),
        updated_at: Set(profile.updated_at),
    })
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    async fn create(&self, profile: Profile) -> AppResult<Profile> {
        let model = to_active(profile)?
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Profile::from(model))
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        let result = ProfileEntity::find()
            .filter(profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Profile::from))
    }

    async fn update(&self, profile: Profile) -> AppResult<Profile> {
        let model = to_active(profile)?
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => AppError::NotFound,
                e => AppError::from(e),
            })?;

        Ok(Profile::from(model))
    }

    async fn delete_by_user(&self, user_id: Uuid) -> AppResult<()> {
        ProfileEntity::delete_many()
            .filter(profile::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Profile>> {
        let models = ProfileEntity::find()
            .order_by_desc(profile::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Profile::from).collect())
    }
}
