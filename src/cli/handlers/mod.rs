//! CLI command handlers module
//!
//! This module is organized by functional domains:
//! - init: Database schema initialization
//! - index: Knowledge base rebuild from markdown documents
//! - ask: One-shot RAG questions
//! - analytics: Audit analytics and retention cleanup
//! - serve: API server
//! - info: Configuration display

pub mod analytics;
pub mod ask;
pub mod index;
pub mod info;
pub mod init;
pub mod serve;

// Re-export all public handlers
pub use analytics::*;
pub use ask::*;
pub use index::*;
pub use info::*;
pub use init::*;
pub use serve::*;
