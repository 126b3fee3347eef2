use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use pickup_api::{AppState, AppStateInner, control, messages};
use pickup_relay::{DeviceClient, OscSink, RelayScheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pickup=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("PICKUP_DB_PATH").unwrap_or_else(|_| "pickup.db".into());
    let host = std::env::var("PICKUP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("PICKUP_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let wall_addr =
        std::env::var("PICKUP_WALL_ADDR").unwrap_or_else(|_| "192.168.104.10:7000".into());
    let text_address = std::env::var("PICKUP_WALL_TEXT_PARAM").unwrap_or_else(|_| {
        "/composition/layers/6/clips/1/video/effects/textblock/effect/text/params/lines".into()
    });
    let opacity_address = std::env::var("PICKUP_WALL_OPACITY_PARAM")
        .unwrap_or_else(|_| "/composition/layers/6/video/opacity".into());
    let device_url =
        std::env::var("PICKUP_DEVICE_URL").unwrap_or_else(|_| "http://192.168.104.212/".into());
    let window_secs: u64 = std::env::var("PICKUP_DISPLAY_WINDOW_SECS")
        .unwrap_or_else(|_| "120".into())
        .parse()?;

    // Init database
    let db = Arc::new(pickup_db::Database::open(&PathBuf::from(&db_path))?);

    // Shared state
    let sink = Arc::new(OscSink::connect(&wall_addr, &text_address, &opacity_address)?);
    let scheduler = Arc::new(RelayScheduler::new(
        sink,
        db.clone(),
        Duration::from_secs(window_secs),
    ));
    let device = DeviceClient::new(device_url);

    let state: AppState = Arc::new(AppStateInner {
        db,
        scheduler,
        device,
    });

    // Routes
    let app = Router::new()
        .route(
            "/api/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .route("/api/emergency", post(messages::create_message))
        .route("/api/messages/{id}", patch(messages::patch_status))
        .route("/api/clear", post(control::clear_display))
        .route("/api/live", get(control::device_live))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Pickup server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
