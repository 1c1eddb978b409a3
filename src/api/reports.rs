//! Reporting endpoints for task and zone aggregates.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Days, NaiveDate, Utc};
use serde::Deserialize;

use super::ApiResult;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{TaskStatusReportRow, Timeframe, ZonePerformanceRow};
use crate::AppState;

/// Query string for GET /api/reports/task-status.
#[derive(Debug, Deserialize)]
pub struct TaskStatusReportQuery {
    pub timeframe: String,
}

/// GET /api/reports/task-status?timeframe= - Per-day task counts by status.
pub async fn task_status_report(
    State(state): State<AppState>,
    _actor: AuthUser,
    Query(query): Query<TaskStatusReportQuery>,
) -> ApiResult<Vec<TaskStatusReportRow>> {
    let timeframe = Timeframe::from_str(&query.timeframe).ok_or_else(|| {
        AppError::Validation(format!("Unknown timeframe: {}", query.timeframe))
    })?;

    let since = window_start(timeframe, Utc::now().date_naive());
    let rows = state
        .repo
        .task_status_report(&since.format("%Y-%m-%d").to_string())
        .await?;
    Ok(Json(rows))
}

/// GET /api/reports/zone-performance - Per-zone completion counts.
pub async fn zone_performance_report(
    State(state): State<AppState>,
    _actor: AuthUser,
) -> ApiResult<Vec<ZonePerformanceRow>> {
    let rows = state.repo.zone_performance_report().await?;
    Ok(Json(rows))
}

/// First day (inclusive) of the reporting window ending today.
fn window_start(timeframe: Timeframe, today: NaiveDate) -> NaiveDate {
    match timeframe {
        Timeframe::Daily => today,
        Timeframe::Weekly => today.checked_sub_days(Days::new(6)).unwrap_or(today),
        Timeframe::FifteenDays => today.checked_sub_days(Days::new(14)).unwrap_or(today),
        Timeframe::Monthly => today.with_day(1).unwrap_or(today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_start_boundaries() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();

        assert_eq!(window_start(Timeframe::Daily, today), today);
        assert_eq!(
            window_start(Timeframe::Weekly, today),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
        assert_eq!(
            window_start(Timeframe::FifteenDays, today),
            NaiveDate::from_ymd_opt(2025, 3, 6).unwrap()
        );
        assert_eq!(
            window_start(Timeframe::Monthly, today),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_monthly_window_on_first_of_month() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(window_start(Timeframe::Monthly, today), today);
    }
}
