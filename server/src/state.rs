use classifier_client::task::EndpointId;
use std::sync::Arc;

/// Labels the stub answers with, per endpoint.
#[derive(Clone, Debug)]
pub struct AppState {
    labels: Arc<Labels>,
}

#[derive(Debug)]
struct Labels {
    closed: String,
    open: String,
}

impl AppState {
    pub fn new(closed: impl Into<String>, open: impl Into<String>) -> Self {
        AppState {
            labels: Arc::new(Labels {
                closed: closed.into(),
                open: open.into(),
            }),
        }
    }

    pub fn label(&self, endpoint: EndpointId) -> &str {
        match endpoint {
            EndpointId::Closed => &self.labels.closed,
            EndpointId::Open => &self.labels.open,
        }
    }
}
