//! Service entry-point: loads settings, connects the user store and serves
//! the REST endpoints.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use userinfo::inbound::http::health::HealthState;
use userinfo::inbound::http::state::HttpState;
use userinfo::outbound::persistence::{MongoUserRepository, connect};
use userinfo::settings::ServerSettings;

fn startup_error(stage: &'static str, err: impl std::fmt::Display) -> io::Error {
    error!(stage, error = %err, "startup failed");
    io::Error::other(format!("{stage}: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|err| startup_error("settings", err))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| startup_error("settings", err))?;
    let store_config = settings
        .store_config()
        .map_err(|err| startup_error("settings", err))?;

    let collection = connect(&store_config)
        .await
        .map_err(|err| startup_error("user store", err))?;
    let http_state = HttpState::from_repository(Arc::new(MongoUserRepository::new(collection)));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(bind_addr, http_state))?;
    info!(%bind_addr, "userinfo started");
    server.await
}
