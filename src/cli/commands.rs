//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "olgagpt")]
#[command(about = "OlgaGPT chat backend: knowledge indexing, RAG API server and audit analytics")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML config file (default: config.toml, then config.example.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Disable CORS headers
        #[arg(long)]
        no_cors: bool,
    },
    /// Rebuild the knowledge base from markdown documents
    Index {
        /// Directory of *.md files (overrides indexer.docs_dir)
        #[arg(long)]
        docs_dir: Option<PathBuf>,
    },
    /// Ask a single question through the RAG pipeline
    Ask {
        /// The question to ask
        question: String,
    },
    /// Show audit analytics
    Analytics {
        /// Show statistics for one session
        #[arg(long)]
        session_id: Option<String>,
        /// Only sessions created at or after this date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        start_date: Option<String>,
        /// Only sessions created at or before this date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        end_date: Option<String>,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete audit sessions older than the retention period
    Cleanup {
        /// Age in days (overrides audit.retention_days)
        #[arg(long)]
        days: Option<i64>,
    },
    /// Initialize the PostgreSQL schema
    Init,
    /// Show current configuration
    Config,
}
