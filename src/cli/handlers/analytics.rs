//! Audit analytics and retention handlers

use crate::api::handlers::parse_bound;
use crate::api::open_stores;
use crate::audit::AnalyticsFilter;
use crate::audit::AuditLogger;
use crate::cli::output::*;
use crate::config::StorageBackend;
use crate::errors::OlgaGptError;
use crate::AppConfig;
use crate::Result;

async fn audit_logger(config: &AppConfig) -> Result<AuditLogger> {
    if config.storage.backend == StorageBackend::Memory {
        print_warning("storage.backend is 'memory'; audit data does not outlive the server process.");
    }
    let (_, audit) = open_stores(config).await?;
    Ok(AuditLogger::new(audit, true))
}

pub async fn handle_analytics_command(
    config: &AppConfig,
    session_id: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    json: bool,
) -> Result<()> {
    let logger = audit_logger(config).await?;

    if let Some(session_id) = session_id {
        let Some(stats) = logger.session_stats(&session_id).await? else {
            return Err(OlgaGptError::NotFound(format!("Session {session_id}")));
        };
        if json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            print_session_stats(&stats);
        }
        return Ok(());
    }

    let filter = AnalyticsFilter {
        start_date: parse_bound("startDate", start_date.as_deref())?,
        end_date: parse_bound("endDate", end_date.as_deref())?,
    };
    let analytics = logger.analytics(&filter).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&analytics)?);
    } else {
        print_analytics(&analytics);
    }

    Ok(())
}

pub async fn handle_cleanup_command(config: &AppConfig, days: Option<i64>) -> Result<()> {
    let days = days.unwrap_or(config.audit.retention_days);
    if days < 0 {
        return Err(OlgaGptError::InvalidRequest(format!(
            "Retention must be non-negative, got {days} days"
        )));
    }

    let logger = audit_logger(config).await?;
    let removed = logger.cleanup_old_logs(days).await?;
    print_success(&format!(
        "Removed {removed} audit sessions older than {days} days"
    ));
    Ok(())
}
