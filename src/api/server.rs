//! HTTP server implementation

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing::warn;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::audit::AuditLogger;
use crate::config::AppConfig;
use crate::config::StorageBackend;
use crate::database::Database;
use crate::embeddings::Embedder;
use crate::embeddings::EmbeddingService;
use crate::indexer::Indexer;
use crate::llm::ChatModel;
use crate::llm::LlmService;
use crate::rag::RagService;
use crate::store::AuditStore;
use crate::store::KnowledgeStore;
use crate::store::MemoryStore;
use crate::Result;

/// Knowledge and audit stores for the configured backend
pub async fn open_stores(
    config: &AppConfig,
) -> Result<(Arc<dyn KnowledgeStore>, Arc<dyn AuditStore>)> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            let database = Arc::new(Database::from_config(config).await?);
            database.verify_schema_or_error().await?;
            let knowledge: Arc<dyn KnowledgeStore> = database.clone();
            let audit: Arc<dyn AuditStore> = database;
            Ok((knowledge, audit))
        }
        StorageBackend::Memory => {
            let store = Arc::new(MemoryStore::new());
            let knowledge: Arc<dyn KnowledgeStore> = store.clone();
            let audit: Arc<dyn AuditStore> = store;
            Ok((knowledge, audit))
        }
    }
}

/// Index the configured docs directory into a freshly opened memory store
pub async fn load_memory_knowledge(
    config: &AppConfig,
    knowledge: Arc<dyn KnowledgeStore>,
    embedder: Arc<dyn Embedder>,
) -> Result<()> {
    let docs_dir = Path::new(&config.indexer.docs_dir);
    if !docs_dir.is_dir() {
        warn!(
            "Docs directory {} not found; serving with an empty knowledge base",
            docs_dir.display()
        );
        return Ok(());
    }

    let report = Indexer::new(knowledge, embedder, config).run(docs_dir).await?;
    info!(
        "📚 Indexed {} chunks from {} files into memory",
        report.chunks, report.files
    );
    Ok(())
}

/// Wire services into the shared handler state
pub fn build_state(
    config: AppConfig,
    knowledge: Arc<dyn KnowledgeStore>,
    audit: Arc<dyn AuditStore>,
    embedder: Arc<dyn Embedder>,
    llm: Arc<dyn ChatModel>,
) -> AppState {
    let rag = RagService::from_config(&config, knowledge, embedder, llm.clone());
    AppState {
        rag: Arc::new(rag),
        llm,
        audit: AuditLogger::from_config(audit, &config.audit),
        config: Arc::new(config),
    }
}

/// Start the API server
pub async fn serve_api(config: &AppConfig, host: String, port: u16, enable_cors: bool) -> Result<()> {
    info!("🚀 Starting OlgaGPT API server...");

    // Initialize services
    let (knowledge, audit) = open_stores(config).await?;
    let embedder: Arc<dyn Embedder> = Arc::new(EmbeddingService::new(config)?);
    let llm: Arc<dyn ChatModel> = Arc::new(LlmService::new(config)?);

    if config.storage.backend == StorageBackend::Memory {
        load_memory_knowledge(config, knowledge.clone(), embedder.clone()).await?;
    }

    let state = build_state(config.clone(), knowledge, audit, embedder, llm);

    // Add middleware layers
    let mut app = routes::create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new()),
    );

    // Add CORS if enabled
    if enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    // Start server
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("");
    info!("Available endpoints:");
    info!("  GET  /api/health       - Health check");
    info!("  POST /api/query        - RAG chat turn");
    info!("  POST /api/chat         - Plain chat completion");
    info!("  POST /api/suggestions  - Suggested follow-up questions");
    info!("  GET  /api/analytics    - Audit analytics");
    info!("");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
