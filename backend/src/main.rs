//! Backend entry-point: loads settings, brings the database online, and
//! serves the HTTP API until shutdown.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::info;

use backend::domain::Database;
use backend::outbound::persistence::DieselPool;
use backend::settings::AppSettings;
use backend::telemetry;

mod server;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    telemetry::init();

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let config = ServerConfig::from_settings(&settings)?;
    let pool = DieselPool::connect_lazy(&settings.pool_config()?)?;

    // A failed check closes the pool before returning.
    let database = Database::new(Arc::new(pool));
    database
        .start()
        .await
        .wrap_err("database startup check failed")?;

    let served = serve(config, database.clone()).await;
    database.close();
    info!("shutdown complete");
    served
}

async fn serve(config: ServerConfig, database: Database) -> Result<()> {
    create_server(config, database)
        .wrap_err("failed to bind http server")?
        .await
        .wrap_err("http server terminated with an error")
}
