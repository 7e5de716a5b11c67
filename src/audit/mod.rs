//! Audit trail of chat sessions and the analytics built on it

pub mod analytics;
pub mod logger;

pub use analytics::Analytics;
pub use analytics::AnalyticsFilter;
pub use analytics::QuestionCount;
pub use analytics::SessionStats;
pub use analytics::SourceCount;
pub use logger::AuditLogger;
pub use logger::QuestionRecord;
