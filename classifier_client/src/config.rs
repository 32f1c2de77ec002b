//! Client configuration: where the two services live and how to reach them

use crate::endpoint::{ClassifierEndpoint, HttpEndpoint};
use crate::task::EndpointId;
use crate::{Error, Result};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub closed_path: String,
    pub open_path: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            closed_path: EndpointId::Closed.default_path().to_string(),
            open_path: EndpointId::Open.default_path().to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "unsupported scheme {:?} in base URL",
                base_url.scheme()
            )));
        }
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    pub fn path(&self, endpoint: EndpointId) -> &str {
        match endpoint {
            EndpointId::Closed => &self.closed_path,
            EndpointId::Open => &self.open_path,
        }
    }

    pub fn endpoint_url(&self, endpoint: EndpointId) -> Result<Url> {
        Ok(self.base_url.join(self.path(endpoint))?)
    }

    pub fn http_client(&self) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    /// One HTTP endpoint per [`EndpointId`], sharing a single connection pool.
    pub fn endpoints(&self) -> Result<Vec<(EndpointId, Arc<dyn ClassifierEndpoint>)>> {
        let client = self.http_client()?;
        EndpointId::ALL
            .iter()
            .map(|&id| {
                let endpoint: Arc<dyn ClassifierEndpoint> =
                    Arc::new(HttpEndpoint::new(client.clone(), id, self.endpoint_url(id)?));
                Ok((id, endpoint))
            })
            .collect()
    }
}
