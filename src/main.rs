use clap::Parser;
use olgagpt::cli::handlers;
use olgagpt::cli::print_error;
use olgagpt::cli::Cli;
use olgagpt::cli::Commands;
use olgagpt::logging::init_logging;
use olgagpt::AppConfig;
use olgagpt::Result;
use tracing::debug;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first
    let config = AppConfig::load_from(cli.config.as_deref())?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _guard = init_logging(&config, cli.verbose.then_some("debug"))?;
    debug!("Configuration loaded");

    match cli.command {
        Commands::Serve {
            host,
            port,
            no_cors,
        } => handlers::handle_serve_api(&config, host, port, no_cors).await,
        Commands::Index { docs_dir } => handlers::handle_index_command(&config, docs_dir).await,
        Commands::Ask { question } => handlers::handle_ask_command(&config, question).await,
        Commands::Analytics {
            session_id,
            start_date,
            end_date,
            json,
        } => {
            handlers::handle_analytics_command(&config, session_id, start_date, end_date, json)
                .await
        }
        Commands::Cleanup { days } => handlers::handle_cleanup_command(&config, days).await,
        Commands::Init => handlers::handle_init_command(&config).await,
        Commands::Config => handlers::handle_config_command(&config),
    }
}
