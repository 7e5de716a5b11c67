//! API server handlers

use crate::cli::output::*;
use crate::AppConfig;
use crate::Result;

pub async fn handle_serve_api(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
    no_cors: bool,
) -> Result<()> {
    use crate::api::serve_api;

    // CLI arguments take priority over config
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let cors = config.server.enable_cors && !no_cors;

    println!("🚀 Starting OlgaGPT API Server");
    println!("===============================\n");
    println!("📍 Host: {host}");
    println!("🔌 Port: {port}");
    println!("🌐 CORS: {}", if cors { "Enabled" } else { "Disabled" });
    println!("🗄️  Storage: {:?}", config.storage.backend);
    if !config.audit.enabled {
        print_warning("Audit logging disabled");
    }
    println!();

    serve_api(config, host, port, cors).await?;

    Ok(())
}
