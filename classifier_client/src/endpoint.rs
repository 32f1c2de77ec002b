use crate::task::{ClassifyOutcome, EndpointId, FailureReason, Label};
use crate::SelectedFile;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Multipart field carrying the audio bytes.
pub const AUDIO_FIELD: &str = "audio_file";

/// A classification service the coordinator can dispatch to.
#[async_trait]
pub trait ClassifierEndpoint: Send + Sync {
    /// Classify `file`. Never fails out of band: every failure is a
    /// [`FailureReason`] inside the outcome.
    async fn classify(&self, file: &SelectedFile) -> ClassifyOutcome;
}

/// Posts the file as multipart form data to one URL.
pub struct HttpEndpoint {
    client: Client,
    endpoint: EndpointId,
    url: Url,
}

impl HttpEndpoint {
    pub fn new(client: Client, endpoint: EndpointId, url: Url) -> Self {
        Self {
            client,
            endpoint,
            url,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ClassifierEndpoint for HttpEndpoint {
    async fn classify(&self, file: &SelectedFile) -> ClassifyOutcome {
        let part = Part::stream_with_length(Body::from(file.content().clone()), file.len() as u64)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| {
                warn!("{} rejected MIME type {:?}: {}", self.endpoint, file.mime_type, e);
                FailureReason::InvalidInput
            })?;
        let form = Form::new().part(AUDIO_FIELD, part);

        debug!("POST {} ({} bytes, {})", self.url, file.len(), file.mime_type);
        let response = self
            .client
            .post(self.url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("{} request to {} failed: {}", self.endpoint, self.url, e);
                FailureReason::TransportError
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!("{} response body from {} unreadable: {}", self.endpoint, self.url, e);
            FailureReason::TransportError
        })?;

        let outcome = parse_response(status, &body);
        if let Err(reason) = &outcome {
            warn!("{} answered {}: {}", self.endpoint, status, reason);
        }
        outcome
    }
}

/// Turn a raw HTTP response into a label or a failure reason.
///
/// `400` means the service rejected the upload. Any other non-2xx status, an
/// empty body, a non-UTF-8 body or a JSON value that is not a scalar is a
/// server error. A body that is not JSON at all is taken as a plain-text label.
pub fn parse_response(status: StatusCode, body: &[u8]) -> ClassifyOutcome {
    if status == StatusCode::BAD_REQUEST {
        return Err(FailureReason::InvalidInput);
    }
    if !status.is_success() {
        return Err(FailureReason::ServerError);
    }

    let text = std::str::from_utf8(body)
        .map_err(|_| FailureReason::ServerError)?
        .trim();

    let label = match serde_json::from_str::<Value>(text) {
        Ok(Value::String(s)) => s.trim().to_string(),
        Ok(Value::Number(n)) => n.to_string(),
        Ok(Value::Bool(b)) => b.to_string(),
        Ok(_) => return Err(FailureReason::ServerError),
        Err(_) => text.to_string(),
    };

    if label.is_empty() {
        return Err(FailureReason::ServerError);
    }
    Ok(Label::new(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_label() {
        let outcome = parse_response(StatusCode::OK, b"Dog Bark\n");
        assert_eq!(outcome, Ok(Label::new("Dog Bark")));
    }

    #[test]
    fn json_scalar_labels() {
        assert_eq!(
            parse_response(StatusCode::OK, br#""dog_bark""#),
            Ok(Label::new("dog_bark"))
        );
        assert_eq!(parse_response(StatusCode::OK, b"3"), Ok(Label::new("3")));
        assert_eq!(parse_response(StatusCode::OK, b"true"), Ok(Label::new("true")));
    }

    #[test]
    fn structured_or_empty_bodies_are_server_errors() {
        for body in [&b""[..], b"   ", br#""""#, b"null", br#"{"label":"x"}"#, b"[1,2]"] {
            assert_eq!(
                parse_response(StatusCode::OK, body),
                Err(FailureReason::ServerError),
                "body {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn non_utf8_body_is_server_error() {
        assert_eq!(
            parse_response(StatusCode::OK, &[0xff, 0xfe, 0x00]),
            Err(FailureReason::ServerError)
        );
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            parse_response(StatusCode::BAD_REQUEST, b"Please ensure you upload a .wav file"),
            Err(FailureReason::InvalidInput)
        );
        assert_eq!(
            parse_response(StatusCode::INTERNAL_SERVER_ERROR, b"boom"),
            Err(FailureReason::ServerError)
        );
        assert_eq!(
            parse_response(StatusCode::NOT_FOUND, b""),
            Err(FailureReason::ServerError)
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        // Port 9 on localhost (discard) is not expected to accept connections.
        let endpoint = HttpEndpoint::new(
            Client::new(),
            EndpointId::Closed,
            Url::parse("http://127.0.0.1:9/predict").unwrap(),
        );
        let file = SelectedFile::new("a.wav", "audio/wav", chrono::Utc::now(), vec![0u8; 4]);
        assert_eq!(
            endpoint.classify(&file).await,
            Err(FailureReason::TransportError)
        );
    }

    #[tokio::test]
    async fn malformed_mime_type_is_invalid_input() {
        let endpoint = HttpEndpoint::new(
            Client::new(),
            EndpointId::Open,
            Url::parse("http://127.0.0.1:9/predict_mod").unwrap(),
        );
        let file = SelectedFile::new("a.wav", "not a mime", chrono::Utc::now(), vec![0u8; 4]);
        assert_eq!(endpoint.classify(&file).await, Err(FailureReason::InvalidInput));
    }
}
