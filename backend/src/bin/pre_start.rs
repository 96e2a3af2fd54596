//! Pre-start gate: blocks until the configured database answers the
//! connectivity probe, then exits zero.
//!
//! Retries once per second for up to 300 attempts. Configuration errors stop
//! immediately. Any failure exits non-zero.

use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::info;

use backend::domain::ports::TokioSleeper;
use backend::domain::{RetryPolicy, wait_for_database};
use backend::outbound::persistence::DsnConnectivityCheck;
use backend::settings::AppSettings;
use backend::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    telemetry::init();

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let check = DsnConnectivityCheck::new(settings.pool_config()?);

    info!("initialising service");
    let attempts = wait_for_database(&check, &TokioSleeper, &RetryPolicy::default())
        .await
        .wrap_err("database did not become available")?;
    info!(attempts, "service finished initialising");
    Ok(())
}
