//! Outbound notifications.
//!
//! The notifier is constructed once at startup from SMTP settings and
//! injected into services as `Arc<dyn Notifier>`, so tests substitute a
//! mock. Every send is advisory: callers log failures and carry on; a
//! failed notification never changes the outcome of the operation that
//! triggered it.

use async_trait::async_trait;

use crate::config::SmtpSettings;
use crate::domain::{
    AccountStatus, ApplicationStatus, Audience, InterviewMode, InterviewRound, JobStatus, UserRole,
};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Templated notification events dispatched by the workflow layer.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Welcome mail after registration.
    async fn welcome(&self, to: &str, name: &str, role: UserRole) -> AppResult<()>;

    /// Account approved/blocked/pending notice.
    async fn account_status_changed(
        &self,
        to: &str,
        status: AccountStatus,
        role: UserRole,
    ) -> AppResult<()>;

    /// Admin verdict on a job listing, with optional feedback.
    async fn job_status_changed(
        &self,
        to: &str,
        job_title: &str,
        status: JobStatus,
        feedback: Option<String>,
    ) -> AppResult<()>;

    /// New application landed on a company's listing.
    async fn new_application(&self, to: &str, job_title: &str, student_name: &str)
        -> AppResult<()>;

    /// Application moved to a new status, with optional feedback.
    async fn application_status_changed(
        &self,
        to: &str,
        job_title: &str,
        status: ApplicationStatus,
        feedback: Option<String>,
    ) -> AppResult<()>;

    /// Interview round scheduled for a student.
    async fn interview_invitation(
        &self,
        to: &str,
        job_title: &str,
        company_name: &str,
        round: &InterviewRound,
    ) -> AppResult<()>;

    /// Announcement published to an audience (sent to the broadcast alias
    /// when one is configured).
    async fn announcement_published(&self, audience: Audience, title: &str) -> AppResult<()>;
}

/// SMTP-backed mailer. Without SMTP settings it logs the rendered message
/// instead of sending, which is the development default.
pub struct Mailer {
    smtp: SmtpSettings,
}

impl Mailer {
    pub fn new(smtp: SmtpSettings) -> Self {
        Self { smtp }
    }

    async fn dispatch(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        if !self.smtp.is_configured() {
            tracing::info!(
                "=== EMAIL (not sent) ===\nFrom: {}\nTo: {}\nSubject: {}\nBody:\n{}\n========================",
                self.smtp.from,
                to,
                subject,
                body
            );
            return Ok(());
        }

        // TODO: wire a real SMTP transport (lettre) once the relay account
        // is provisioned; until then configured hosts also log.
        tracing::warn!(
            to = %to,
            subject = %subject,
            host = %self.smtp.host.as_deref().unwrap_or_default(),
            "SMTP relay not wired, logging message instead of sending"
        );
        tracing::info!(to = %to, subject = %subject, "Email processed");
        Ok(())
    }
}

#[async_trait]
impl Notifier for Mailer {
    async fn welcome(&self, to: &str, name: &str, role: UserRole) -> AppResult<()> {
        let body = format!(
            "Welcome to the Campus Placement Portal, {}!\n\n\
             Thank you for registering on our platform as a {}.\n\
             {}",
            name,
            role,
            if role == UserRole::Company {
                "Your account is currently under review. You'll receive a notification once it's approved."
            } else {
                "You can now complete your profile and start browsing job listings."
            }
        );
        self.dispatch(to, "Welcome to Campus Placement Portal", &body)
            .await
    }

    async fn account_status_changed(
        &self,
        to: &str,
        status: AccountStatus,
        role: UserRole,
    ) -> AppResult<()> {
        let (subject, body) = match status {
            AccountStatus::Approved => (
                "Your Account Has Been Approved",
                format!(
                    "Your account has been approved!\n{}",
                    if role == UserRole::Company {
                        "You can now post job listings and start recruiting talent from our campus."
                    } else {
                        "You can now view and apply for job listings posted by companies."
                    }
                ),
            ),
            AccountStatus::Blocked => (
                "Account Access Restricted",
                "Your account has been temporarily blocked by the administrator.\n\
                 Please contact the placement office for more information."
                    .to_string(),
            ),
            AccountStatus::Pending => (
                "Account Status Update",
                "Your account status has been changed to: pending".to_string(),
            ),
        };
        self.dispatch(to, subject, &body).await
    }

    async fn job_status_changed(
        &self,
        to: &str,
        job_title: &str,
        status: JobStatus,
        feedback: Option<String>,
    ) -> AppResult<()> {
        let verdict = if status == JobStatus::Approved {
            "approved"
        } else {
            "not approved"
        };
        let mut body = format!(
            "Your job listing \"{}\" has been {} by the administrator.",
            job_title, verdict
        );
        if let Some(feedback) = feedback {
            body.push_str(&format!("\nFeedback: {}", feedback));
        }
        self.dispatch(to, &format!("Job Listing Update: {}", job_title), &body)
            .await
    }

    async fn new_application(
        &self,
        to: &str,
        job_title: &str,
        student_name: &str,
    ) -> AppResult<()> {
        let body = format!(
            "A new application has been submitted for your job listing \"{}\".\n\
             Applicant: {}\n\
             Please log in to your account to review the application.",
            job_title, student_name
        );
        self.dispatch(to, &format!("New Application Received: {}", job_title), &body)
            .await
    }

    async fn application_status_changed(
        &self,
        to: &str,
        job_title: &str,
        status: ApplicationStatus,
        feedback: Option<String>,
    ) -> AppResult<()> {
        let status_message = match status {
            ApplicationStatus::Reviewing => "Your application is now being reviewed.",
            ApplicationStatus::Shortlisted => {
                "Congratulations! You have been shortlisted for the next round."
            }
            ApplicationStatus::Rejected => {
                "We regret to inform you that your application was not selected to move forward."
            }
            ApplicationStatus::Hired => "Congratulations! You have been selected for the position.",
            _ => "Your application status has been updated.",
        };
        let mut body = format!(
            "Your application for \"{}\" has been updated.\n\
             Status: {}\n\
             {}",
            job_title, status, status_message
        );
        if let Some(feedback) = feedback {
            body.push_str(&format!("\nFeedback: {}", feedback));
        }
        self.dispatch(to, &format!("Application Update: {}", job_title), &body)
            .await
    }

    async fn interview_invitation(
        &self,
        to: &str,
        job_title: &str,
        company_name: &str,
        round: &InterviewRound,
    ) -> AppResult<()> {
        let mut body = format!(
            "You have been invited for an interview for the position of \"{}\" at {}.\n\
             Date: {}\n\
             Round: {}\n\
             Mode: {}",
            job_title,
            company_name,
            round.date.format("%Y-%m-%d %H:%M UTC"),
            round.round,
            match round.mode {
                InterviewMode::Online => "online",
                InterviewMode::Offline => "offline",
            }
        );
        if let Some(location) = &round.location {
            body.push_str(&format!("\nLocation: {}", location));
        }
        if let Some(link) = &round.meeting_link {
            body.push_str(&format!("\nMeeting link: {}", link));
        }
        self.dispatch(to, &format!("Interview Invitation: {}", company_name), &body)
            .await
    }

    async fn announcement_published(&self, audience: Audience, title: &str) -> AppResult<()> {
        let Some(broadcast) = self.smtp.broadcast.clone() else {
            tracing::info!(audience = audience.as_str(), title = %title, "Announcement published");
            return Ok(());
        };
        let body = format!(
            "A new announcement for {} has been published: {}",
            audience.as_str(),
            title
        );
        self.dispatch(&broadcast, "New Portal Announcement", &body)
            .await
    }
}
