mod handler;
mod slack;
mod types;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use handler::{handle_event, Config};
use slack::SlackNotifier;
use std::sync::Arc;
use tracing::{info, warn};
use types::GatewayResponse;

#[derive(Clone)]
struct AppState {
    notifier: Arc<SlackNotifier>,
    config: Config,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "issue_relay=info".into()),
        )
        .init();

    // Read configuration
    let slack_url = std::env::var("SLACK_URL").ok().filter(|s| !s.is_empty());
    if slack_url.is_none() {
        warn!("SLACK_URL not set - issue notifications will be skipped");
    }

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .expect("PORT must be a valid u16");

    let state = AppState {
        notifier: Arc::new(SlackNotifier::new()),
        config: Config { slack_url },
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/github/events", post(github_events_handler))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn github_events_handler(
    State(state): State<AppState>,
    body: axum::body::Bytes,
) -> Json<GatewayResponse> {
    info!(
        "Received request to /github/events, body length: {} bytes",
        body.len()
    );

    let raw_body = String::from_utf8_lossy(&body);
    Json(handle_event(&state.config, &state.notifier, &raw_body).await)
}
