//! HTTP contract of the stub classifier routes

mod common;

use common::spawn_stub;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

fn wav_form() -> Form {
    let part = Part::bytes(b"RIFF\x24\x00\x00\x00WAVE".to_vec())
        .file_name("clip.wav")
        .mime_str("audio/wav")
        .unwrap();
    Form::new().part("audio_file", part)
}

#[tokio::test]
async fn index_answers() {
    let base = spawn_stub("Dog Bark", "Unknown").await;
    let response = reqwest::get(format!("{}/", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn predict_returns_closed_label_as_plain_text() {
    let base = spawn_stub("Dog Bark", "Unknown").await;
    let response = reqwest::Client::new()
        .post(format!("{}/predict", base))
        .multipart(wav_form())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "Dog Bark");
}

#[tokio::test]
async fn predict_mod_returns_open_label() {
    let base = spawn_stub("Dog Bark", "Unknown").await;
    let response = reqwest::Client::new()
        .post(format!("{}/predict_mod", base))
        .multipart(wav_form())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "Unknown");
}

#[tokio::test]
async fn missing_audio_field_is_rejected() {
    let base = spawn_stub("Dog Bark", "Unknown").await;
    let form = Form::new().text("comment", "no file here");
    let response = reqwest::Client::new()
        .post(format!("{}/predict", base))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Please attach a file");
}

#[tokio::test]
async fn non_wav_upload_is_rejected() {
    let base = spawn_stub("Dog Bark", "Unknown").await;
    let part = Part::bytes(b"ID3".to_vec())
        .file_name("song.mp3")
        .mime_str("audio/mpeg")
        .unwrap();
    let response = reqwest::Client::new()
        .post(format!("{}/predict_mod", base))
        .multipart(Form::new().part("audio_file", part))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.text().await.unwrap(),
        "Please ensure you upload a .wav file"
    );
}

#[tokio::test]
async fn non_multipart_body_is_rejected() {
    let base = spawn_stub("Dog Bark", "Unknown").await;
    let response = reqwest::Client::new()
        .post(format!("{}/predict", base))
        .body("plain body")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn get_on_predict_is_not_allowed() {
    let base = spawn_stub("Dog Bark", "Unknown").await;
    let response = reqwest::get(format!("{}/predict", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
