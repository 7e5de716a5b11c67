//! OlgaGPT: retrieval-augmented chat over a personal knowledge base
//!
//! Markdown documents are chunked and embedded by the [`indexer`], stored in a
//! [`store::KnowledgeStore`], and retrieved by the [`rag`] pipeline to ground
//! chat completions. Every answered question is recorded by the [`audit`]
//! logger and summarized through the analytics endpoints.

pub mod api;
pub mod audit;
pub mod cli;
pub mod config;
pub mod database;
pub mod embeddings;
pub mod errors;
pub mod indexer;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;
pub mod store;
pub mod suggestions;

#[cfg(test)]
mod config_tests;

pub use config::AppConfig;
pub use errors::*;
