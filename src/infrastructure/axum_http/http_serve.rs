use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::{
    config::config_model::{Cors, DotEnvyConfig},
    infrastructure::{
        axum_http::{default_routers, routers},
        postgrest::postgrest_client::PostgrestClient,
        rate_mirrors::http_mirror::HttpRateMirrorClient,
    },
};

pub async fn start(config: Arc<DotEnvyConfig>) -> Result<()> {
    let app = app(&config)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub fn app(config: &DotEnvyConfig) -> Result<Router> {
    let postgrest_client = Arc::new(PostgrestClient::new(
        &config.supabase.url,
        &config.supabase.service_key,
    )?);
    let mirror_client = Arc::new(HttpRateMirrorClient::new()?);

    // Single-call routes share the request deadline.
    let bounded = Router::new()
        .merge(routers::health::routes(Arc::clone(&postgrest_client), config))
        .nest("/admin", routers::admin::routes(Arc::clone(&postgrest_client)))
        .nest(
            "/api/cloudinary",
            routers::cloudinary::routes(config.cloudinary.clone()),
        )
        .nest("/payments", routers::payments::routes(Arc::clone(&postgrest_client)))
        .layer(TimeoutLayer::new(Duration::from_secs(config.server.timeout)));

    // Fallback chains are bounded by their per-call deadlines and answer
    // exhaustion with their own response contract instead of a bare 408.
    let chained = Router::new()
        .nest("/api/rate", routers::rate::routes(mirror_client))
        .nest(
            "/reservations",
            routers::reservations::routes(Arc::clone(&postgrest_client)),
        )
        .nest("/verify", routers::verify::routes(Arc::clone(&postgrest_client)))
        .nest("/webhooks", routers::webhooks::routes(postgrest_client));

    let app = Router::new()
        .fallback(default_routers::not_found)
        .merge(bounded)
        .merge(chained)
        .layer(RequestBodyLimitLayer::new(
            (config.server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(cors_layer(&config.cors)?)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn cors_layer(cors: &Cors) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if cors.allowed_origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = cors
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("ALLOWED_ORIGINS entry {} is invalid", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
