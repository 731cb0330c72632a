//! `field:asc|desc` sort parameter parsing for admin list endpoints.

use serde::Deserialize;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A parsed `sort=field:direction` query value.
///
/// Unknown fields are rejected by the repository layer against its own
/// column whitelist; the default everywhere is newest-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortParams {
    pub field: String,
    pub direction: SortDirection,
}

impl SortParams {
    /// Newest-first default used by every listing.
    pub fn newest_first() -> Self {
        Self {
            field: "created_at".to_string(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse `field`, `field:asc`, or `field:desc`; `None` on empty input.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let (field, direction) = match raw.split_once(':') {
            Some((field, "desc")) => (field, SortDirection::Desc),
            Some((field, _)) => (field, SortDirection::Asc),
            None => (raw, SortDirection::Asc),
        };

        if field.is_empty() {
            return None;
        }

        Some(Self {
            field: field.to_string(),
            direction,
        })
    }
}

impl Default for SortParams {
    fn default() -> Self {
        Self::newest_first()
    }
}
