use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use classifier_client::{endpoint::AUDIO_FIELD, task::EndpointId};
use tracing::{info, warn};

use crate::state::AppState;

pub const ACCEPTED_MIME_TYPE: &str = "audio/wav";

pub async fn index() -> &'static str {
    "Closed vs open set audio classification"
}

/// POST /predict
pub async fn predict(State(state): State<AppState>, multipart: Multipart) -> Response {
    classify_upload(EndpointId::Closed, &state, multipart).await
}

/// POST /predict_mod
pub async fn predict_mod(State(state): State<AppState>, multipart: Multipart) -> Response {
    classify_upload(EndpointId::Open, &state, multipart).await
}

struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    size: usize,
}

async fn classify_upload(endpoint: EndpointId, state: &AppState, mut multipart: Multipart) -> Response {
    let mut upload = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(AUDIO_FIELD) => {
                let file_name = field.file_name().map(str::to_owned);
                let content_type = field.content_type().map(str::to_owned);
                let size = match field.bytes().await {
                    Ok(bytes) => bytes.len(),
                    Err(e) => return (e.status(), e.body_text()).into_response(),
                };
                upload = Some(Upload { file_name, content_type, size });
                break;
            }
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(e) => return (e.status(), e.body_text()).into_response(),
        }
    }

    let Some(upload) = upload else {
        warn!("{}: request without {}", endpoint, AUDIO_FIELD);
        return (StatusCode::BAD_REQUEST, "Please attach a file").into_response();
    };

    if upload.content_type.as_deref() != Some(ACCEPTED_MIME_TYPE) {
        warn!("{}: rejected upload of type {:?}", endpoint, upload.content_type);
        return (StatusCode::BAD_REQUEST, "Please ensure you upload a .wav file").into_response();
    }

    let label = state.label(endpoint);
    info!(
        "{}: {} ({} bytes) -> {}",
        endpoint,
        upload.file_name.as_deref().unwrap_or("<unnamed>"),
        upload.size,
        label
    );
    (StatusCode::OK, label.to_string()).into_response()
}
