//! Aggregate statistics for the admin dashboard and placement reporting.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::RECENT_PLACEMENT_DAYS;
use crate::domain::{AccountStatus, ApplicationStatus, JobStatus, UserRole};
use crate::errors::AppResult;
use crate::infra::{ApplicationRepository, JobRepository, UserRepository};

/// Headline counts for the admin dashboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_students: u64,
    pub total_companies: u64,
    pub total_jobs: u64,
    pub active_jobs: u64,
    pub total_applications: u64,
    pub pending_job_approvals: u64,
    pub pending_company_approvals: u64,
    /// Hires recorded in the last 30 days
    pub recent_placements: u64,
}

/// Per-company hire count for the placement report.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyPlacements {
    pub company_id: Uuid,
    pub company_name: String,
    pub hires: u64,
}

/// Salary summary across recorded offers.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct SalarySummary {
    pub min: i64,
    pub avg: i64,
    pub max: i64,
}

/// Academic-year placement report.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlacementStats {
    /// e.g. "2025-2026" (July 1 to June 30)
    pub academic_year: String,
    pub total_placements: u64,
    pub company_stats: Vec<CompanyPlacements>,
    pub salary: SalarySummary,
}

/// Statistics service trait for dependency injection.
#[async_trait]
pub trait StatsService: Send + Sync {
    async fn dashboard(&self) -> AppResult<DashboardStats>;

    async fn placements(&self) -> AppResult<PlacementStats>;
}

/// Concrete implementation of StatsService.
pub struct StatsManager {
    users: Arc<dyn UserRepository>,
    jobs: Arc<dyn JobRepository>,
    applications: Arc<dyn ApplicationRepository>,
}

impl StatsManager {
    pub fn new(
        users: Arc<dyn UserRepository>,
        jobs: Arc<dyn JobRepository>,
        applications: Arc<dyn ApplicationRepository>,
    ) -> Self {
        Self {
            users,
            jobs,
            applications,
        }
    }
}

/// Academic year window containing `now`: July 1 to June 30.
fn academic_year(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>, String) {
    let start_year = if now.month() >= 7 {
        now.year()
    } else {
        now.year() - 1
    };
    let start = Utc
        .with_ymd_and_hms(start_year, 7, 1, 0, 0, 0)
        .single()
        .unwrap_or(now);
    let end = Utc
        .with_ymd_and_hms(start_year + 1, 6, 30, 23, 59, 59)
        .single()
        .unwrap_or(now);
    (start, end, format!("{}-{}", start_year, start_year + 1))
}

#[async_trait]
impl StatsService for StatsManager {
    async fn dashboard(&self) -> AppResult<DashboardStats> {
        let since = Utc::now() - Duration::days(RECENT_PLACEMENT_DAYS);

        Ok(DashboardStats {
            total_students: self.users.count_by_role(UserRole::Student).await?,
            total_companies: self.users.count_by_role(UserRole::Company).await?,
            total_jobs: self.jobs.count().await?,
            active_jobs: self.jobs.count_by_status(JobStatus::Approved).await?,
            total_applications: self.applications.count().await?,
            pending_job_approvals: self.jobs.count_by_status(JobStatus::Pending).await?,
            pending_company_approvals: self
                .users
                .count_by_role_and_status(UserRole::Company, AccountStatus::Pending)
                .await?,
            recent_placements: self
                .applications
                .count_with_status_since(ApplicationStatus::Hired, since)
                .await?,
        })
    }

    async fn placements(&self) -> AppResult<PlacementStats> {
        let (start, end, academic_year) = academic_year(Utc::now());

        let hires = self
            .applications
            .list_with_status_between(ApplicationStatus::Hired, start, end)
            .await?;

        // Group hires by company
        let mut by_company: HashMap<Uuid, u64> = HashMap::new();
        for hire in &hires {
            *by_company.entry(hire.company_id).or_default() += 1;
        }

        let mut company_stats = Vec::with_capacity(by_company.len());
        for (company_id, count) in by_company {
            let company_name = self
                .users
                .find_by_id(company_id)
                .await?
                .map(|c| c.name)
                .unwrap_or_else(|| "Unknown company".to_string());
            company_stats.push(CompanyPlacements {
                company_id,
                company_name,
                hires: count,
            });
        }
        company_stats.sort_by(|a, b| b.hires.cmp(&a.hires));

        // Salary figures over offers that recorded one
        let salaries: Vec<i64> = hires
            .iter()
            .filter_map(|h| h.offer.as_ref().and_then(|o| o.salary))
            .collect();
        let salary = if salaries.is_empty() {
            SalarySummary::default()
        } else {
            let sum: i64 = salaries.iter().sum();
            SalarySummary {
                min: salaries.iter().copied().min().unwrap_or_default(),
                avg: sum / salaries.len() as i64,
                max: salaries.iter().copied().max().unwrap_or_default(),
            }
        };

        Ok(PlacementStats {
            academic_year,
            total_placements: hires.len() as u64,
            company_stats,
            salary,
        })
    }
}
