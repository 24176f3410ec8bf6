use actix_web::{web, App, HttpServer};
use std::io;
use std::sync::Arc;
use tokio::signal;

mod api_error;
mod auth;
mod config;
mod db;
mod http;
mod middleware;
mod models;
mod repository;
mod service;
mod telemetry;

use crate::auth::{JwtConfig, JwtService};
use crate::config::Config;
use crate::db::create_pool;
use crate::http::hotel_handler::AppState;
use crate::middleware::cors_middleware;
use crate::repository::{PgEntitlementRepository, PgHotelRepository, PgSessionRepository};
use crate::service::HotelService;
use crate::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = Config::from_env().map_err(|e| io::Error::other(format!("configuration: {}", e)))?;

    init_telemetry(&config.server.rust_log);

    let db_pool = create_pool(&config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to create database pool");
        io::Error::other(e)
    })?;

    let hotel_service = Arc::new(HotelService::new(
        Arc::new(PgEntitlementRepository::new(db_pool.clone())),
        Arc::new(PgHotelRepository::new(db_pool.clone())),
    ));
    let jwt_service = JwtService::new(
        JwtConfig::new(config.auth.jwt_secret.clone()),
        Arc::new(PgSessionRepository::new(db_pool.clone())),
    );
    let app_state = web::Data::new(AppState { hotel_service });

    tracing::info!(
        "Starting hotels backend on {}:{}",
        config.server.host,
        config.server.port
    );

    let server = HttpServer::new(move || {
        let jwt_service = jwt_service.clone();
        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(app_state.clone())
            .wrap(cors_middleware())
            .wrap(actix_web::middleware::Logger::default())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(crate::http::health::health_check)),
            )
            .configure(|cfg| crate::http::hotel_handler::configure_routes(cfg, jwt_service))
    })
    .bind((config.server.host.clone(), config.server.port))?
    .run();

    // Graceful shutdown
    let server_handle = server.handle();
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        tracing::info!("Shutdown signal received, stopping server...");
        server_handle.stop(true).await;
    });

    server.await
}
