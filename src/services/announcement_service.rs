//! Announcement workflow - admin broadcast messages.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Announcement, NewAnnouncement};
use crate::errors::AppResult;
use crate::infra::AnnouncementRepository;
use crate::notify::Notifier;

/// Announcement service trait for dependency injection.
#[async_trait]
pub trait AnnouncementService: Send + Sync {
    async fn create(&self, created_by: Uuid, data: NewAnnouncement) -> AppResult<Announcement>;

    async fn list(&self) -> AppResult<Vec<Announcement>>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of AnnouncementService.
pub struct AnnouncementManager {
    announcements: Arc<dyn AnnouncementRepository>,
    notifier: Arc<dyn Notifier>,
}

impl AnnouncementManager {
    pub fn new(announcements: Arc<dyn AnnouncementRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            announcements,
            notifier,
        }
    }
}

#[async_trait]
impl AnnouncementService for AnnouncementManager {
    async fn create(&self, created_by: Uuid, data: NewAnnouncement) -> AppResult<Announcement> {
        let announcement = self
            .announcements
            .create(Announcement {
                id: Uuid::new_v4(),
                title: data.title,
                content: data.content,
                audience: data.audience,
                created_by,
                important: data.important,
                expires_at: data.expires_at,
                created_at: Utc::now(),
            })
            .await?;

        if let Err(err) = self
            .notifier
            .announcement_published(announcement.audience, &announcement.title)
            .await
        {
            tracing::warn!(error = %err, "Failed to send announcement notification");
        }

        Ok(announcement)
    }

    async fn list(&self) -> AppResult<Vec<Announcement>> {
        self.announcements.list().await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.announcements.delete(id).await
    }
}
