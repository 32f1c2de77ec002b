use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stub_server::{build_router, config::StubConfig, cors_layer, state::AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stub_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StubConfig::from_env()?;
    let cors = cors_layer(config.client_url.as_deref())?;
    let app = build_router(AppState::new(config.closed_label.clone(), config.open_label.clone()), cors);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        "Stub classifier listening on {} (closed: {:?}, open: {:?})",
        listener.local_addr()?,
        config.closed_label,
        config.open_label
    );
    axum::serve(listener, app).await?;
    Ok(())
}
