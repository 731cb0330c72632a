//! Application state - dependency injection container for handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, UploadStore};
use crate::notify::Notifier;
use crate::services::{
    AnnouncementService, ApplicationService, AuthService, JobService, ProfileService, Services,
    StatsService, UserService,
};

/// Application state containing all services.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub job_service: Arc<dyn JobService>,
    pub application_service: Arc<dyn ApplicationService>,
    pub profile_service: Arc<dyn ProfileService>,
    pub announcement_service: Arc<dyn AnnouncementService>,
    pub stats_service: Arc<dyn StatsService>,
    pub uploads: Arc<UploadStore>,
    pub database: Arc<Database>,
}

impl AppState {
    /// Build state from live infrastructure. The notifier is constructed
    /// by the caller at startup and injected from here down.
    pub fn from_config(
        database: Arc<Database>,
        uploads: Arc<UploadStore>,
        notifier: Arc<dyn Notifier>,
        config: Config,
    ) -> Self {
        let services = Services::from_connection(
            database.get_connection(),
            config,
            notifier,
            uploads.clone(),
        );

        Self {
            auth_service: services.auth,
            user_service: services.users,
            job_service: services.jobs,
            application_service: services.applications,
            profile_service: services.profiles,
            announcement_service: services.announcements,
            stats_service: services.stats,
            uploads,
            database,
        }
    }
}
