//! Application entity, status machine, and embedded interview/offer records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserRole;

/// Application lifecycle.
///
/// The usual progression is pending → reviewing/shortlisted →
/// interviewed/offered → hired, with rejected, declined, and cancelled as
/// exits. `Cancelled` is only ever produced by account-deletion cascades
/// or a student withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Shortlisted,
    Interviewed,
    Offered,
    Hired,
    Rejected,
    Declined,
    Cancelled,
}

impl ApplicationStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ApplicationStatus::Pending),
            "reviewing" => Some(ApplicationStatus::Reviewing),
            "shortlisted" => Some(ApplicationStatus::Shortlisted),
            "interviewed" => Some(ApplicationStatus::Interviewed),
            "offered" => Some(ApplicationStatus::Offered),
            "hired" => Some(ApplicationStatus::Hired),
            "rejected" => Some(ApplicationStatus::Rejected),
            "declined" => Some(ApplicationStatus::Declined),
            "cancelled" => Some(ApplicationStatus::Cancelled),
            _ => None,
        }
    }

    /// Absorbing states: once here, only an admin override can move the
    /// application again.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Hired | ApplicationStatus::Declined | ApplicationStatus::Cancelled
        )
    }

    /// Statuses a company may assign to applications on its own jobs.
    pub fn company_assignable(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Reviewing
                | ApplicationStatus::Shortlisted
                | ApplicationStatus::Interviewed
                | ApplicationStatus::Offered
                | ApplicationStatus::Rejected
                | ApplicationStatus::Hired
        )
    }

    /// Whether `actor` may move an application from `self` to `next`.
    /// Admins may assign anything; companies are held to their allow-list
    /// and cannot move an application out of a terminal state.
    pub fn can_transition(self, next: ApplicationStatus, actor: UserRole) -> bool {
        match actor {
            UserRole::Admin => true,
            UserRole::Company => !self.is_terminal() && next.company_assignable(),
            UserRole::Student => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Interviewed => "interviewed",
            ApplicationStatus::Offered => "offered",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Declined => "declined",
            ApplicationStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interview delivery mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InterviewMode {
    Online,
    Offline,
}

/// Per-round interview state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Pending,
    Cancelled,
}

/// A single interview round embedded in an application
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InterviewRound {
    pub round: u32,
    pub date: DateTime<Utc>,
    pub mode: InterviewMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    pub status: InterviewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Payload for scheduling a new interview round
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewInterview {
    pub date: DateTime<Utc>,
    pub mode: InterviewMode,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub meeting_link: Option<String>,
}

/// Offer details recorded once a company extends an offer
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct OfferDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_letter_url: Option<String>,
    #[serde(default)]
    pub accepted: bool,
}

/// Application domain entity.
///
/// Unique per (job, student); the storage layer enforces this with a
/// compound unique index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub company_id: Uuid,
    pub student_id: Uuid,
    pub status: ApplicationStatus,
    /// Stored path of the uploaded resume
    pub resume: String,
    pub cover_letter: Option<String>,
    pub feedback: Option<String>,
    pub admin_notes: Option<String>,
    pub interviews: Vec<InterviewRound>,
    pub offer: Option<OfferDetails>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
