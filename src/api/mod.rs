//! API server module for the chat front end

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use handlers::AppState;
pub use routes::create_router;
pub use server::build_state;
pub use server::load_memory_knowledge;
pub use server::open_stores;
pub use server::serve_api;
