use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use bistro_backend::config::AppConfig;
use bistro_backend::infra::state::build_state;
use bistro_backend::middleware::cors::cors_middleware;
use bistro_backend::middleware::request_trace::RequestTrace;
use bistro_backend::middleware::structured_logger::StructuredLogger;
use bistro_backend::middleware::trace_span::TraceSpan;
use bistro_backend::payments::StripeGateway;
use bistro_backend::routes;
use tracing::{error, info, warn};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let mut builder = build_state()
        .with_store_profile(config.store.clone())
        .with_security(config.security.clone())
        .verify_store();

    match &config.payment_secret_key {
        Some(key) => match StripeGateway::new(key.clone()) {
            Ok(gateway) => builder = builder.with_payments(Arc::new(gateway)),
            Err(e) => {
                eprintln!("❌ Failed to create payment gateway: {e}");
                std::process::exit(1);
            }
        },
        None => warn!("PAYMENT_SECRET_KEY not set; payment intents are disabled"),
    }

    let app_state = match builder.build().await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        store = %config.store.describe(),
        "🚀 Starting bistro backend"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
