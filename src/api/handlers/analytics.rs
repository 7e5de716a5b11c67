/// Audit analytics handler
use axum::extract::Query;
use axum::extract::State;
use axum::Json;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use tracing::error;
use tracing::info;

use super::AppState;
use crate::api::error::ApiError;
use crate::api::types::AnalyticsQuery;
use crate::api::types::AnalyticsResponse;
use crate::audit::AnalyticsFilter;
use crate::errors::OlgaGptError;

/// RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC)
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

/// Optional date bound, rejecting values that are present but unparseable
pub fn parse_bound(name: &str, value: Option<&str>) -> crate::Result<Option<DateTime<Utc>>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => parse_date(raw)
            .map(Some)
            .ok_or_else(|| OlgaGptError::InvalidRequest(format!("Invalid {name}: {raw}"))),
    }
}

/// GET /api/analytics
pub async fn analytics(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    if let Some(session_id) = params.session_id.as_deref().filter(|id| !id.is_empty()) {
        info!("GET /api/analytics for session {}", session_id);
        return match state.audit.session_stats(session_id).await {
            Ok(Some(stats)) => Ok(Json(AnalyticsResponse::Session(stats))),
            Ok(None) => Err(ApiError::not_found("Session not found")),
            Err(e) => {
                error!("Error retrieving session stats: {}", e);
                Err(ApiError::internal("Failed to retrieve analytics"))
            }
        };
    }

    let filter = AnalyticsFilter {
        start_date: parse_bound("startDate", params.start_date.as_deref())?,
        end_date: parse_bound("endDate", params.end_date.as_deref())?,
    };
    info!("GET /api/analytics: {:?}", filter);

    match state.audit.analytics(&filter).await {
        Ok(analytics) => Ok(Json(AnalyticsResponse::Overall(analytics))),
        Err(e) => {
            error!("Error retrieving analytics: {}", e);
            Err(ApiError::internal("Failed to retrieve analytics"))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_date("2024-05-01"), Some(midnight));
        assert_eq!(parse_date("2024-05-01T00:00:00Z"), Some(midnight));
        assert_eq!(
            parse_date("2024-05-01T02:00:00+02:00"),
            Some(midnight)
        );
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_parse_bound() {
        assert!(parse_bound("startDate", None).unwrap().is_none());
        assert!(parse_bound("startDate", Some("")).unwrap().is_none());
        let err = parse_bound("endDate", Some("05/01/2024")).unwrap_err();
        assert!(
            matches!(err, OlgaGptError::InvalidRequest(ref msg) if msg == "Invalid endDate: 05/01/2024")
        );
    }
}
