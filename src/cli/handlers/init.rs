//! Database initialization handler

use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::cli::output::print_warning;
use crate::config::StorageBackend;
use crate::database::Database;
use crate::AppConfig;
use crate::Result;

/// Handle database initialization command
pub async fn handle_init_command(config: &AppConfig) -> Result<()> {
    if config.storage.backend == StorageBackend::Memory {
        print_warning("storage.backend is 'memory'; nothing to initialize.");
        return Ok(());
    }

    print_info("🗄️  Initializing OlgaGPT database...");
    println!();

    let database = Database::from_config(config).await?;
    if database.is_schema_initialized().await? {
        print_info("Schema already present, re-applying CREATE IF NOT EXISTS statements");
    }

    if let Err(e) = database.init_schema().await {
        if e.to_string().contains("vector") || e.to_string().contains("extension") {
            print_warning(&format!("Could not enable pgvector extension: {e}"));
            print_warning("Please run on the database server:");
            println!("  psql -d olgagpt -c 'CREATE EXTENSION IF NOT EXISTS vector;'");
            println!();
            println!("Then run: olgagpt init");
        }
        return Err(e);
    }

    print_success("Knowledge and audit tables created");
    println!();
    print_success("🎉 Database initialization complete!");
    println!();
    print_info("To load the knowledge base, run:");
    println!("   olgagpt index");

    Ok(())
}
