//! Service container - startup wiring of repositories into services.

use std::sync::Arc;

use super::{
    AnnouncementManager, AnnouncementService, ApplicationManager, ApplicationService,
    AuthService, Authenticator, JobManager, JobService, ProfileManager, ProfileService,
    StatsManager, StatsService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{
    AnnouncementStore, ApplicationStore, JobStore, ProfileStore, UploadStore, UserStore,
};
use crate::notify::Notifier;

/// All application services, constructed once at startup.
pub struct Services {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UserService>,
    pub jobs: Arc<dyn JobService>,
    pub applications: Arc<dyn ApplicationService>,
    pub profiles: Arc<dyn ProfileService>,
    pub announcements: Arc<dyn AnnouncementService>,
    pub stats: Arc<dyn StatsService>,
}

impl Services {
    /// Wire concrete repositories and the injected notifier into the
    /// service graph.
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: Config,
        notifier: Arc<dyn Notifier>,
        uploads: Arc<UploadStore>,
    ) -> Self {
        let users = Arc::new(UserStore::new(db.clone()));
        let profiles = Arc::new(ProfileStore::new(db.clone()));
        let jobs = Arc::new(JobStore::new(db.clone()));
        let applications = Arc::new(ApplicationStore::new(db.clone()));
        let announcements = Arc::new(AnnouncementStore::new(db));

        let auth = Arc::new(Authenticator::new(
            users.clone(),
            profiles.clone(),
            notifier.clone(),
            config,
        ));
        let user_service = Arc::new(UserManager::new(
            users.clone(),
            profiles.clone(),
            jobs.clone(),
            applications.clone(),
            notifier.clone(),
        ));
        let job_service = Arc::new(JobManager::new(
            jobs.clone(),
            users.clone(),
            notifier.clone(),
        ));
        let application_service = Arc::new(ApplicationManager::new(
            applications.clone(),
            jobs.clone(),
            users.clone(),
            uploads.clone(),
            notifier.clone(),
        ));
        let profile_service = Arc::new(ProfileManager::new(
            profiles.clone(),
            users.clone(),
            uploads,
        ));
        let announcement_service =
            Arc::new(AnnouncementManager::new(announcements, notifier));
        let stats_service = Arc::new(StatsManager::new(users, jobs, applications));

        Self {
            auth,
            users: user_service,
            jobs: job_service,
            applications: application_service,
            profiles: profile_service,
            announcements: announcement_service,
            stats: stats_service,
        }
    }
}
