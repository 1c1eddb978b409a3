//! Aggregation report models.

use serde::Serialize;

/// Time window for the task-status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    /// Today only.
    Daily,
    /// Last 7 days.
    Weekly,
    /// Last 15 days.
    FifteenDays,
    /// Current calendar month.
    Monthly,
}

impl Timeframe {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(Timeframe::Daily),
            "weekly" => Some(Timeframe::Weekly),
            "15days" => Some(Timeframe::FifteenDays),
            "monthly" => Some(Timeframe::Monthly),
            _ => None,
        }
    }
}

/// Per-day task counts by status within the requested window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusReportRow {
    pub date: String,
    pub pending_count: i64,
    pub updated_count: i64,
}

/// Per-zone completion counts, ordered by completed tasks descending.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonePerformanceRow {
    pub zone_name: String,
    pub zone_ref: String,
    pub total_tasks: i64,
    pub completed_tasks: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_parsing() {
        assert_eq!(Timeframe::from_str("daily"), Some(Timeframe::Daily));
        assert_eq!(Timeframe::from_str("weekly"), Some(Timeframe::Weekly));
        assert_eq!(Timeframe::from_str("15days"), Some(Timeframe::FifteenDays));
        assert_eq!(Timeframe::from_str("monthly"), Some(Timeframe::Monthly));
        assert_eq!(Timeframe::from_str("yearly"), None);
    }
}
