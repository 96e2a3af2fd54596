//! Server construction helpers.

mod config;

pub use config::ServerConfig;

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
use tracing::info;

use backend::domain::Database;
use backend::inbound::http::{HttpState, build_app};

/// Construct an Actix HTTP server serving `database` to handlers.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig, database: Database) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        project_name,
    } = config;
    let state = web::Data::new(HttpState::new(project_name).with_database(database));

    let server = HttpServer::new(move || build_app(state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "http server listening");
    Ok(server)
}
