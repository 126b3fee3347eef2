use std::net::SocketAddr;
use std::time::Duration;

use tracing::{error, info};

use pickup_device::indicator::{self, BLINK_INTERVAL};
use pickup_device::renderer::RenderConfig;
use pickup_device::report::BackendClient;
use pickup_device::sim::{LogIndicator, MarkerFilePin, SimPanel};
use pickup_device::input::InputConfig;
use pickup_device::{SharedState, http, input, renderer};

/// Startup banner shown while the controller comes up.
const BANNER_TEXT: &str = "System laeuft";
const BANNER_DURATION: Duration = Duration::from_secs(7);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pickup_device=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let host = std::env::var("PICKUP_DEVICE_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("PICKUP_DEVICE_PORT")
        .unwrap_or_else(|_| "8080".into())
        .parse()?;
    let backend_url =
        std::env::var("PICKUP_BACKEND_URL").unwrap_or_else(|_| "http://192.168.104.45:3000".into());
    let accept_marker = std::env::var("PICKUP_ACCEPT_MARKER")
        .unwrap_or_else(|_| "/tmp/pickup-accept".into());
    let reject_marker = std::env::var("PICKUP_REJECT_MARKER")
        .unwrap_or_else(|_| "/tmp/pickup-reject".into());

    let state = SharedState::new();

    // Simulated hardware backend; a GPIO/I2C build swaps these out.
    let (panel, _journal) = SimPanel::new(128, 64);
    let accept = MarkerFilePin::new(&accept_marker);
    let reject = MarkerFilePin::new(&reject_marker);
    let led = LogIndicator::default();
    info!(
        "Simulated buttons: touch {} (accept) or {} (reject)",
        accept_marker, reject_marker
    );

    // Display renderer — the one task allowed to die on a display fault.
    let render_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = renderer::run(render_state, panel, RenderConfig::default()).await {
            error!("Renderer task terminated: {}", e);
        }
    });

    // Button input monitor + status reporter.
    let reporter = BackendClient::new(backend_url);
    tokio::spawn(input::run(
        state.clone(),
        accept,
        reject,
        reporter,
        InputConfig::default(),
    ));

    // Alert indicator.
    tokio::spawn(indicator::run(state.clone(), led, BLINK_INTERVAL));

    // Startup banner.
    let banner_state = state.clone();
    tokio::spawn(async move {
        banner_state.show_banner(BANNER_TEXT);
        tokio::time::sleep(BANNER_DURATION).await;
        banner_state.hide_if_no_message();
    });

    // Inbound endpoint.
    let app = http::router(state);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Device endpoint listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
