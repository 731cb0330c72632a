//! Admin-authored broadcast announcements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Who an announcement is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    All,
    Students,
    Companies,
}

impl Default for Audience {
    fn default() -> Self {
        Audience::All
    }
}

impl Audience {
    pub fn as_str(self) -> &'static str {
        match self {
            Audience::All => "all",
            Audience::Students => "students",
            Audience::Companies => "companies",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Audience::All),
            "students" => Some(Audience::Students),
            "companies" => Some(Audience::Companies),
            _ => None,
        }
    }
}

/// Announcement domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub audience: Audience,
    pub created_by: Uuid,
    pub important: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Typed creation payload
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub audience: Audience,
    #[serde(default)]
    pub important: bool,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}
