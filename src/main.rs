use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use pgscribe::api::configure_routes;
use pgscribe::config::ServerConfig;
use pgscribe::logging::init_logging;
use pgscribe::{PgConnector, SchemaService};

#[actix_web::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    let service = web::Data::new(SchemaService::new(
        Arc::new(PgConnector::default()),
        config.service_options(),
    ));

    let bind_addr = config.bind_address();
    info!("Starting pgscribe on {}", bind_addr);

    let data = service.clone();
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .configure(configure_routes)
    })
    .bind(&bind_addr)
    .with_context(|| format!("failed to bind {}", bind_addr))?;

    if config.workers > 0 {
        server = server.workers(config.workers);
    }
    server.run().await?;

    service.disconnect().await;
    info!("Server shutdown complete");
    Ok(())
}
