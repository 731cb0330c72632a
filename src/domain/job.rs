//! Job entity, status vocabulary, and typed create/update payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Canonical job lifecycle.
///
/// A job becomes publicly visible and accepts applications only in
/// `Approved`. Companies move their own jobs between `Draft`, `Pending`,
/// and `Closed`; `Approved` and `Rejected` are admin verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
    Closed,
}

impl JobStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(JobStatus::Draft),
            "pending" => Some(JobStatus::Pending),
            "approved" => Some(JobStatus::Approved),
            "rejected" => Some(JobStatus::Rejected),
            "closed" => Some(JobStatus::Closed),
            _ => None,
        }
    }

    /// Statuses a company may set on its own job.
    pub fn company_assignable(self) -> bool {
        matches!(self, JobStatus::Draft | JobStatus::Pending | JobStatus::Closed)
    }

    /// Statuses an admin may set through the job-status endpoint.
    pub fn admin_assignable(self) -> bool {
        matches!(
            self,
            JobStatus::Pending | JobStatus::Approved | JobStatus::Rejected
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::Pending => "pending",
            JobStatus::Approved => "approved",
            JobStatus::Rejected => "rejected",
            JobStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Internship,
    Contract,
}

/// Salary band attached to a listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalaryRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

/// Eligibility filter applied by companies to their listings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Eligibility {
    #[serde(default)]
    pub degrees: Vec<String>,
    #[serde(default)]
    pub min_cgpa: f32,
    #[serde(default)]
    pub years_of_passing: Vec<i32>,
}

/// Job domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    pub job_type: JobType,
    pub salary: Option<SalaryRange>,
    pub positions: i32,
    pub skills: Vec<String>,
    pub application_deadline: DateTime<Utc>,
    pub eligibility: Eligibility,
    pub application_link: Option<String>,
    pub status: JobStatus,
    /// Feedback attached by an admin status decision
    pub admin_feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// A job takes applications while approved and before its deadline.
    pub fn is_accepting_applications(&self, now: DateTime<Utc>) -> bool {
        self.status == JobStatus::Approved && now <= self.application_deadline
    }
}

/// Typed job creation payload. Every recognized field is listed here;
/// anything a client sends beyond these is ignored by deserialization.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    pub job_type: JobType,
    #[serde(default)]
    pub salary: Option<SalaryRange>,
    pub positions: i32,
    #[serde(default)]
    pub skills: Vec<String>,
    pub application_deadline: DateTime<Utc>,
    #[serde(default)]
    pub eligibility: Eligibility,
    #[serde(default)]
    pub application_link: Option<String>,
    /// Create as a draft instead of submitting for approval
    #[serde(default)]
    pub draft: bool,
}

/// Typed job update payload; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub salary: Option<SalaryRange>,
    pub positions: Option<i32>,
    pub skills: Option<Vec<String>>,
    pub application_deadline: Option<DateTime<Utc>>,
    pub eligibility: Option<Eligibility>,
    pub application_link: Option<String>,
    /// Companies may set draft/pending/closed; approval is admin-only
    pub status: Option<JobStatus>,
}

/// Condensed listing entry for the public job board
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobListItem {
    pub id: Uuid,
    pub title: String,
    pub company_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub location: String,
    pub job_type: JobType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<SalaryRange>,
    pub application_deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn job_with(status: JobStatus, deadline: DateTime<Utc>) -> Job {
        Job {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            description: "Build services".to_string(),
            requirements: "Rust".to_string(),
            location: "Chennai".to_string(),
            job_type: JobType::FullTime,
            salary: None,
            positions: 2,
            skills: vec!["rust".to_string()],
            application_deadline: deadline,
            eligibility: Eligibility::default(),
            application_link: None,
            status,
            admin_feedback: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn accepts_only_when_approved_and_open() {
        let now = Utc::now();
        let open = job_with(JobStatus::Approved, now + Duration::days(7));
        assert!(open.is_accepting_applications(now));

        let pending = job_with(JobStatus::Pending, now + Duration::days(7));
        assert!(!pending.is_accepting_applications(now));

        let expired = job_with(JobStatus::Approved, now - Duration::days(1));
        assert!(!expired.is_accepting_applications(now));
    }

    #[test]
    fn deadline_boundary_is_inclusive() {
        let deadline = Utc::now();
        let job = job_with(JobStatus::Approved, deadline);

        // One second before the deadline still accepts
        assert!(job.is_accepting_applications(deadline - Duration::seconds(1)));
        // One second after does not
        assert!(!job.is_accepting_applications(deadline + Duration::seconds(1)));
    }

    #[test]
    fn company_cannot_assign_admin_verdicts() {
        assert!(JobStatus::Closed.company_assignable());
        assert!(JobStatus::Draft.company_assignable());
        assert!(!JobStatus::Approved.company_assignable());
        assert!(!JobStatus::Rejected.company_assignable());
    }
}
