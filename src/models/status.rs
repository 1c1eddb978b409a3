//! Status ledger models for zone status updates and their audit history.

use serde::{Deserialize, Serialize};

/// Reported status of a zone. Distinct from [`super::TaskStatus`]; the two
/// ledgers use separate vocabularies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    Pending,
    Uploaded,
}

impl ZoneStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneStatus::Pending => "pending",
            ZoneStatus::Uploaded => "uploaded",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ZoneStatus::Pending),
            "uploaded" => Some(ZoneStatus::Uploaded),
            _ => None,
        }
    }
}

/// A single status-update event for a zone.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub id: i64,
    pub city_id: i64,
    pub status: ZoneStatus,
    pub comment: String,
    pub updated_by: i64,
    pub updated_at: String,
}

/// A status-history row enriched with the updater's username for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
    pub id: i64,
    pub status: ZoneStatus,
    pub comment: String,
    pub updated_at: String,
    pub updated_by: String,
}

/// Request body for POST /api/status-update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub city_id: i64,
    pub status: ZoneStatus,
    #[serde(default)]
    pub comment: String,
}
