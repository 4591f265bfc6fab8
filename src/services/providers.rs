// Detector Provider Service
// Implements the ZeroGPT detectText call

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER,
    USER_AGENT,
};
use reqwest::{Client, Request};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{DetectRequest, DetectResponse, DetectionResult};
use super::config_store::DetectorConfig;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("HTTP request failed")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
    #[error("Malformed detector response: {0}")]
    MalformedResponse(String),
    #[error("Invalid value for header {name}: {value:?}")]
    InvalidHeader { name: HeaderName, value: String },
}

/// Anything that can score a chunk of text.
#[allow(async_fn_in_trait)]
pub trait TextDetector {
    async fn detect(&self, text: &str) -> Result<DetectionResult, DetectionError>;
}

pub struct DetectorClient {
    client: Client,
    endpoint: String,
    headers: HeaderMap,
}

impl DetectorClient {
    pub fn new(config: &DetectorConfig) -> Result<Self, DetectionError> {
        let headers = build_headers(config)?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        match config.proxy.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => builder = builder.proxy(reqwest::Proxy::all(url)?),
            _ if !config.use_system_proxy => builder = builder.no_proxy(),
            _ => {}
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            headers,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the POST for one chunk without sending it
    pub fn build_request(&self, text: &str) -> Result<Request, DetectionError> {
        let request = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(&DetectRequest { input_text: text })
            .build()?;
        Ok(request)
    }

    /// Send one chunk and return the raw response body
    pub async fn fetch_raw(&self, text: &str) -> Result<Vec<u8>, DetectionError> {
        let request = self.build_request(text)?;
        let start = Instant::now();

        let response = self.client.execute(request).await?;

        let latency_ms = start.elapsed().as_millis() as i64;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DetectionError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.bytes().await?;
        debug!(
            latency_ms,
            status = status.as_u16(),
            bytes = body.len(),
            "detector.response"
        );
        Ok(body.to_vec())
    }
}

impl TextDetector for DetectorClient {
    async fn detect(&self, text: &str) -> Result<DetectionResult, DetectionError> {
        let body = self.fetch_raw(text).await?;
        parse_detection(&body)
    }
}

fn build_headers(config: &DetectorConfig) -> Result<HeaderMap, DetectionError> {
    let pairs = [
        (USER_AGENT, &config.user_agent),
        (ACCEPT, &config.accept),
        (ACCEPT_LANGUAGE, &config.accept_language),
        (ORIGIN, &config.origin),
        (REFERER, &config.referer),
        (HeaderName::from_static("sec-fetch-dest"), &config.sec_fetch_dest),
        (HeaderName::from_static("sec-fetch-mode"), &config.sec_fetch_mode),
        (HeaderName::from_static("sec-fetch-site"), &config.sec_fetch_site),
    ];

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in pairs {
        let header_value =
            HeaderValue::from_str(value).map_err(|_| DetectionError::InvalidHeader {
                name: name.clone(),
                value: value.clone(),
            })?;
        headers.insert(name, header_value);
    }
    Ok(headers)
}

/// Decode a detectText body.
///
/// Missing fields decode to an empty, zero-percent result; a body that is not
/// JSON at all is an error.
pub fn parse_detection(body: &[u8]) -> Result<DetectionResult, DetectionError> {
    let response: DetectResponse = serde_json::from_slice(body)
        .map_err(|e| DetectionError::MalformedResponse(e.to_string()))?;

    if response.data.is_none() {
        warn!(
            success = ?response.success,
            message = response.message.as_deref().unwrap_or(""),
            "detector.response_without_data"
        );
    }

    Ok(response.into())
}
