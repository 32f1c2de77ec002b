use stub_server::{build_router, cors_layer, state::AppState};
use tokio::net::TcpListener;

/// Serve the stub on an ephemeral port and return its base URL.
pub async fn spawn_stub(closed_label: &str, open_label: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(
        AppState::new(closed_label, open_label),
        cors_layer(None).unwrap(),
    );
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
