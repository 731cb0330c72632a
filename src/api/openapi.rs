//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, application_handler, auth_handler, company_handler, job_handler,
    profile_handler,
};
use crate::domain::{
    AccountStatus, ApplicationStatus, Audience, Eligibility, InterviewMode, InterviewRound,
    InterviewStatus, JobStatus, JobType, NewAnnouncement, NewInterview, NewJob, NewProject,
    JobUpdate, OfferDetails, ProfileUpdate, SalaryRange, SocialLinks, UserResponse, UserRole,
};
use crate::domain::job::JobListItem;
use crate::services::{
    CompanyPlacements, DashboardStats, PlacementStats, SalarySummary, TokenResponse, UserDetails,
};
use crate::types::{MessageResponse, PaginationMeta};

/// OpenAPI documentation for the placement portal
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Placement Portal API",
        version = "0.1.0",
        description = "Students browse and apply to jobs, companies post and manage listings, admins approve and observe.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        // Authentication
        auth_handler::register,
        auth_handler::login,
        auth_handler::me,
        // Jobs
        job_handler::list_jobs,
        job_handler::get_job,
        job_handler::create_job,
        job_handler::update_job,
        job_handler::delete_job,
        job_handler::company_jobs,
        job_handler::approve_job,
        job_handler::pending_jobs,
        // Applications
        application_handler::apply,
        application_handler::student_applications,
        application_handler::job_applications,
        application_handler::update_status,
        application_handler::schedule_interview,
        application_handler::withdraw,
        // Companies
        company_handler::list_companies,
        company_handler::get_company,
        company_handler::jobs_by_company,
        // Profiles
        profile_handler::my_profile,
        profile_handler::get_profile,
        profile_handler::update_profile,
        profile_handler::upload_avatar,
        profile_handler::upload_logo,
        profile_handler::add_project,
        profile_handler::remove_project,
        // Admin
        admin_handler::dashboard,
        admin_handler::list_users,
        admin_handler::user_details,
        admin_handler::update_user_status,
        admin_handler::delete_user,
        admin_handler::list_jobs,
        admin_handler::update_job_status,
        admin_handler::list_applications,
        admin_handler::update_application_status,
        admin_handler::list_profiles,
        admin_handler::placement_stats,
        admin_handler::create_announcement,
        admin_handler::list_announcements,
        admin_handler::delete_announcement,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            AccountStatus,
            UserResponse,
            JobStatus,
            JobType,
            SalaryRange,
            Eligibility,
            NewJob,
            JobUpdate,
            ApplicationStatus,
            InterviewMode,
            InterviewStatus,
            InterviewRound,
            NewInterview,
            OfferDetails,
            SocialLinks,
            ProfileUpdate,
            NewProject,
            Audience,
            NewAnnouncement,
            // Requests & responses
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::SessionResponse,
            job_handler::JobListResponse,
            JobListItem,
            PaginationMeta,
            application_handler::StatusUpdateRequest,
            admin_handler::AccountStatusRequest,
            admin_handler::JobStatusRequest,
            admin_handler::ApplicationStatusRequest,
            TokenResponse,
            MessageResponse,
            DashboardStats,
            PlacementStats,
            CompanyPlacements,
            SalarySummary,
            UserDetails,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Jobs", description = "Job board and listing lifecycle"),
        (name = "Applications", description = "Application lifecycle"),
        (name = "Companies", description = "Public company directory"),
        (name = "Profiles", description = "Student and company profiles"),
        (name = "Admin", description = "Approvals, statistics, announcements")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
