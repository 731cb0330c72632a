//! User entity and account status vocabulary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Account roles. A role is fixed at registration and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Company,
    Admin,
}

impl UserRole {
    /// Parse a role string; `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(UserRole::Student),
            "company" => Some(UserRole::Company),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Company => "company",
            UserRole::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account gating status. Company accounts start `Pending` and need admin
/// approval before they can post jobs; everyone else starts `Approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Pending,
    Approved,
    Blocked,
}

impl AccountStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(AccountStatus::Pending),
            "approved" => Some(AccountStatus::Approved),
            "blocked" => Some(AccountStatus::Blocked),
            _ => None,
        }
    }

    /// Initial status for a freshly registered account.
    pub fn default_for(role: UserRole) -> Self {
        match role {
            UserRole::Company => AccountStatus::Pending,
            UserRole::Student | UserRole::Admin => AccountStatus::Approved,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccountStatus::Pending => "pending",
            AccountStatus::Approved => "approved",
            AccountStatus::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: AccountStatus,
    pub avatar: Option<String>,
    pub contact_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether the account has cleared admin approval.
    pub fn is_approved(&self) -> bool {
        self.status == AccountStatus::Approved
    }

    pub fn is_blocked(&self) -> bool {
        self.status == AccountStatus::Blocked
    }
}

/// User response (safe to return to clients; no credential hash)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Display name
    #[schema(example = "Priya Raman")]
    pub name: String,
    /// Email address
    #[schema(example = "priya@example.edu")]
    pub email: String,
    /// Account role
    pub role: UserRole,
    /// Approval status
    pub status: AccountStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            status: user.status,
            avatar: user.avatar,
            contact_number: user.contact_number,
            created_at: user.created_at,
        }
    }
}
