//! Server entry point: wires the configured user store into the HTTP routes.

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{web, App, HttpServer};
use clap::Parser;
use resource_actor::tracing::setup_tracing;
use std::io;
use tracing::{error, info};
use user_api::api;
use user_api::config::Settings;
use user_api::lifecycle::UserSystem;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let settings = Settings::parse();
    setup_tracing(settings.log_format());

    info!(store = ?settings.store, "Starting user API");
    let system = UserSystem::from_settings(&settings)
        .await
        .map_err(|e| io::Error::other(format!("open user store: {e}")))?;

    let store = web::Data::from(system.store());
    let server = HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .configure(api::configure)
    })
    .bind((settings.host.as_str(), settings.port))?;

    info!(host = %settings.host, port = settings.port, "Listening");
    let result = server.run().await;

    if let Err(e) = system.shutdown().await {
        error!(error = %e, "Shutdown failed");
    }
    result
}
