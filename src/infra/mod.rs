//! Infrastructure layer - External systems integration
//!
//! Database connection and repositories, plus the filesystem-backed
//! upload store.

pub mod db;
pub mod repositories;
pub mod uploads;

pub use db::{Database, Migrator};
pub use repositories::{
    AnnouncementRepository, AnnouncementStore, ApplicationListQuery, ApplicationRepository,
    ApplicationStore, JobFilter, JobListQuery, JobRepository, JobStore, ProfileRepository,
    ProfileStore, UserListQuery, UserRepository, UserStore,
};
pub use uploads::{UploadKind, UploadStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockAnnouncementRepository, MockApplicationRepository, MockJobRepository,
    MockProfileRepository, MockUserRepository,
};
