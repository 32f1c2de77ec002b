use std::env;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_CLOSED_LABEL: &str = "Dog Bark";
pub const DEFAULT_OPEN_LABEL: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct StubConfig {
    pub bind_addr: SocketAddr,
    pub closed_label: String,
    pub open_label: String,
    /// Origin allowed by CORS; any origin when unset
    pub client_url: Option<String>,
}

impl StubConfig {
    /// Read `STUB_BIND_ADDR`, `CLOSED_LABEL`, `OPEN_LABEL` and `CLIENT_URL`.
    pub fn from_env() -> Result<Self, String> {
        let bind_addr = env::var("STUB_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .map_err(|e| format!("STUB_BIND_ADDR {:?}: {}", bind_addr, e))?;

        Ok(Self {
            bind_addr,
            closed_label: env::var("CLOSED_LABEL").unwrap_or_else(|_| DEFAULT_CLOSED_LABEL.to_string()),
            open_label: env::var("OPEN_LABEL").unwrap_or_else(|_| DEFAULT_OPEN_LABEL.to_string()),
            client_url: env::var("CLIENT_URL").ok().filter(|u| !u.is_empty()),
        })
    }
}
