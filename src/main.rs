use axum::{
    Extension, Router,
    extract::Request,
    middleware::{Next, from_fn as middleware_from_fn},
    response::Response,
    routing::{get, post},
};
use dotenv::dotenv;
use std::{env::var, net::SocketAddr, sync::Arc};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod apex;
mod billing;
mod config;
mod sms;

use apex::endpoints::*;
use billing::endpoints::*;
use config::AppConfig;
use sms::delegates::SmsGateway;
use sms::endpoints::*;

async fn log_request(request: Request, next: Next) -> Response {
    tracing::info!("{} {}", request.method(), request.uri().path());
    next.run(request).await
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let config = Arc::new(AppConfig::from_env());
    if !config.api_configured() {
        tracing::warn!("FAST2SMS_API_KEY not set in environment; sends will fail");
    }
    let gateway = Arc::new(SmsGateway::new(&config));

    let domain = var("DOMAIN").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .expect("Failed to parse PORT");

    let addr = SocketAddr::from((
        domain
            .parse::<std::net::IpAddr>()
            .expect("Failed to parse DOMAIN"),
        port,
    ));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    let app = Router::new()
        .route("/", get(root_endpoint))
        .route("/api/health", get(health_endpoint))
        .route("/api/status", get(status_endpoint))
        .route("/api/send-sms", post(send_sms_endpoint))
        .route("/api/send-sms-batch", post(send_sms_batch_endpoint))
        .route("/api/send-batch-sms", post(send_batch_sms_endpoint))
        .route(
            "/api/billing-notification",
            post(billing_notification_endpoint),
        )
        .route("/api/test-sms", get(test_sms_endpoint))
        .fallback(not_found_endpoint)
        .layer(middleware_from_fn(log_request))
        .layer(Extension(config.clone()))
        .layer(Extension(gateway));

    tracing::info!(
        port = port,
        environment = %config.environment,
        configured = config.api_configured(),
        "Billing System SMS Gateway listening"
    );

    axum::serve(listener, app).await.unwrap();
}
