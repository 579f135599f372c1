#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use eduvoice::domain::ports::{DocumentAnalyzer, SearchIndex, SpeechRecognizer};
use eduvoice::domain::{DomainError, SearchHit, UploadedFile};
use eduvoice::infrastructure::AppConfig;
use http_body_util::BodyExt;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use tower::ServiceExt;

pub const BOUNDARY: &str = "eduvoice-test-boundary";

pub fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| env.get(key).cloned(), 0).expect("valid test config")
}

pub fn multipart_body(field: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// A plain form field, without the filename a browser sends for file inputs.
pub fn multipart_text_field(field: &str, value: &str) -> Vec<u8> {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"\r\n\r\n\
         {value}\r\n--{BOUNDARY}--\r\n"
    )
    .into_bytes()
}

pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = send(app, request).await;
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        json!({ "raw": String::from_utf8_lossy(&bytes) })
    });
    (status, body)
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Index returning one fixed document per query.
#[derive(Default)]
pub struct FakeIndex {
    pub queries: Mutex<Vec<String>>,
}

#[async_trait]
impl SearchIndex for FakeIndex {
    async fn search(&self, query: &str, _top: usize) -> Result<Vec<SearchHit>, DomainError> {
        self.queries.lock().unwrap().push(query.to_string());
        let mut doc = Map::new();
        doc.insert("id".into(), json!("lesson-1"));
        doc.insert("title".into(), json!(format!("About {query}")));
        doc.insert("@search.score".into(), json!(1.5));
        Ok(vec![SearchHit::from_document(doc)])
    }
}

/// Analyzer that echoes the uploaded bytes back as text.
#[derive(Default)]
pub struct EchoAnalyzer {
    pub uploads: Mutex<Vec<UploadedFile>>,
}

#[async_trait]
impl DocumentAnalyzer for EchoAnalyzer {
    async fn extract_text(&self, document: &UploadedFile) -> Result<String, DomainError> {
        self.uploads.lock().unwrap().push(document.clone());
        Ok(String::from_utf8_lossy(&document.bytes).into_owned())
    }
}

pub enum SpeechOutcome {
    Text(&'static str),
    NoMatch,
    Failed,
}

pub struct ScriptedRecognizer(pub SpeechOutcome);

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn recognize_once(&self, _audio: &UploadedFile) -> Result<String, DomainError> {
        match self.0 {
            SpeechOutcome::Text(text) => Ok(text.to_string()),
            SpeechOutcome::NoMatch => Err(DomainError::NoSpeechRecognized),
            SpeechOutcome::Failed => Err(DomainError::RecognitionFailed {
                status: "Error".into(),
            }),
        }
    }
}
