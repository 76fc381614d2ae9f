use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart;
use serde::Deserialize;
use url::Url;

use crate::filename::filename_from_disposition;
use crate::{ImagePayload, Mp3Payload, WorkError, WorkErrorKind};

/// Generic failure text when the server gives no usable `detail`.
pub const MP3_FALLBACK_ERROR: &str = "Failed to download MP3.";
pub const REMOVEBG_FALLBACK_ERROR: &str = "Failed to remove background.";

/// Structured error body the backend returns instead of binary data.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Issues the work requests against the conversion backend.
#[derive(Debug, Clone)]
pub struct MediaClient {
    http: reqwest::Client,
    base: Url,
}

impl MediaClient {
    /// The client carries no request timeout: a work request waits until the
    /// underlying transport resolves or errors.
    pub fn new(base: Url) -> Result<Self, WorkError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| WorkError::new(WorkErrorKind::Network(err.to_string())))?;
        Ok(Self { http, base })
    }

    /// The underlying HTTP client, shared with the progress channel.
    pub fn http(&self) -> reqwest::Client {
        self.http.clone()
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// MP3 work request: pulls the converted audio for `url`, correlated to
    /// the progress channel through `download_id`.
    pub async fn download_mp3(
        &self,
        url: &str,
        download_id: &str,
    ) -> Result<Mp3Payload, WorkError> {
        let endpoint = self.join("download")?;
        let response = self
            .http
            .get(endpoint)
            .query(&[("url", url), ("download_id", download_id)])
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let filename = filename_from_disposition(
            response
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|value| value.to_str().ok()),
        );
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(Mp3Payload { filename, bytes })
    }

    /// Background-removal work request: single synchronous round trip, no
    /// progress channel, multipart field named `file`.
    pub async fn remove_background(
        &self,
        image: Vec<u8>,
        original_name: &str,
    ) -> Result<ImagePayload, WorkError> {
        let endpoint = self.join("removebg")?;
        let part = multipart::Part::bytes(image).file_name(original_name.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(ImagePayload { bytes })
    }

    fn join(&self, path: &str) -> Result<Url, WorkError> {
        self.base
            .join(path)
            .map_err(|err| WorkError::new(WorkErrorKind::Network(err.to_string())))
    }
}

/// Extract the `detail` message from a structured error body, if any.
async fn error_from_response(response: reqwest::Response) -> WorkError {
    let status = response.status().as_u16();
    let detail = response
        .bytes()
        .await
        .ok()
        .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
        .map(|body| body.detail);
    WorkError::with_detail(WorkErrorKind::HttpStatus(status), detail)
}

fn transport_error(err: reqwest::Error) -> WorkError {
    WorkError::new(WorkErrorKind::Network(err.to_string()))
}
