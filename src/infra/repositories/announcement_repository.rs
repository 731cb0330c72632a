//! Announcement repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::entities::announcement::{self, ActiveModel, Entity as AnnouncementEntity};
use crate::domain::Announcement;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Announcement repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn create(&self, announcement: Announcement) -> AppResult<Announcement>;

    async fn list(&self) -> AppResult<Vec<Announcement>>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of AnnouncementRepository
pub struct AnnouncementStore {
    db: DatabaseConnection,
}

impl AnnouncementStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnnouncementRepository for AnnouncementStore {
    async fn create(&self, announcement: Announcement) -> AppResult<Announcement> {
        let active = ActiveModel {
            id: Set(announcement.id),
            title: Set(announcement.title),
            content: Set(announcement.content),
            audience: Set(announcement.audience.as_str().to_string()),
            created_by: Set(announcement.created_by),
            important: Set(announcement.important),
            expires_at: Set(announcement.expires_at),
            created_at: Set(announcement.created_at),
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Announcement::from(model))
    }

    async fn list(&self) -> AppResult<Vec<Announcement>> {
        let models = AnnouncementEntity::find()
            .order_by_desc(announcement::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Announcement::from).collect())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = AnnouncementEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
