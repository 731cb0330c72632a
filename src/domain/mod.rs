//! Domain layer - Core business entities and logic
//!
//! Contains the entities and status vocabularies that the workflow layer
//! operates on, independent of HTTP and persistence concerns.

pub mod announcement;
pub mod application;
pub mod job;
pub mod password;
pub mod profile;
pub mod user;

pub use announcement::{Announcement, Audience, NewAnnouncement};
pub use application::{
    Application, ApplicationStatus, InterviewMode, InterviewRound, InterviewStatus, NewInterview,
    OfferDetails,
};
pub use job::{Eligibility, Job, JobListItem, JobStatus, JobType, JobUpdate, NewJob, SalaryRange};
pub use password::Password;
pub use profile::{
    CompanyDetails, NewProject, Profile, ProfileUpdate, Project, SocialLinks, StudentDetails,
};
pub use user::{AccountStatus, User, UserResponse, UserRole};
