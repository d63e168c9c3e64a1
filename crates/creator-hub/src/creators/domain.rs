use std::fmt;

use serde::{Deserialize, Serialize};

/// Primary key of a creator row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreatorId(pub String);

/// Public handle a creator signs in with; the identity threaded through every request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreatorHandle(pub String);

impl fmt::Display for CreatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an agency manager.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ManagerId(pub String);

impl fmt::Display for ManagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Creator row as stored by the backend. Numeric columns are nullable and may hold
/// junk, so consumers go through [`super::stats`] rather than reading them directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorRecord {
    pub id: CreatorId,
    pub creator_handle: CreatorHandle,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub diamonds_monthly: Option<i64>,
    #[serde(default)]
    pub total_diamonds: Option<i64>,
    #[serde(default)]
    pub diamonds_30d: Option<i64>,
    #[serde(default)]
    pub live_days_30d: Option<i64>,
    #[serde(default)]
    pub live_duration_seconds_30d: Option<i64>,
    #[serde(default)]
    pub graduation_status: Option<String>,
    #[serde(default)]
    pub silver_target: Option<i64>,
    #[serde(default)]
    pub gold_target: Option<i64>,
    #[serde(default)]
    pub assigned_manager_id: Option<ManagerId>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl CreatorRecord {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.creator_handle.0.clone()
        } else {
            full.to_string()
        }
    }
}

/// Coarse graduation bucket derived from the free-text status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraduationStage {
    Rookie,
    Graduated,
    Other,
}

impl GraduationStage {
    /// Per-entry label. Rookie markers take precedence when a status mentions both.
    pub fn classify(status: Option<&str>) -> Self {
        if is_rookie_status(status) {
            Self::Rookie
        } else if is_graduated_status(status) {
            Self::Graduated
        } else {
            Self::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rookie => "Rookie",
            Self::Graduated => "Graduated",
            Self::Other => "Other",
        }
    }
}

/// Missing or blank statuses, and anything mentioning "rookie" or "new".
pub fn is_rookie_status(status: Option<&str>) -> bool {
    match normalized_status(status) {
        None => true,
        Some(lower) => lower.contains("rookie") || lower.contains("new"),
    }
}

/// Statuses mentioning "silver" or "gold". Independent of [`is_rookie_status`].
pub fn is_graduated_status(status: Option<&str>) -> bool {
    normalized_status(status)
        .map(|lower| lower.contains("silver") || lower.contains("gold"))
        .unwrap_or(false)
}

fn normalized_status(status: Option<&str>) -> Option<String> {
    status
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_ascii_lowercase)
}
