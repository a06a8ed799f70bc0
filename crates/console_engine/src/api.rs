use std::time::Duration;

use console_core::{ApplicationInfo, JobRecord, PluginDescriptor, PluginKind};
use console_logging::{console_debug, console_warn};
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use url::Url;

use crate::wire::{AboutDto, JobDto, PluginDto};
use crate::{FailureKind, FetchError};

/// Query flag asking the backend for the decoded variant of a result.
pub const DECODED_QUERY: (&str, &str) = ("q", "2");

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Root of the REST API, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Upper bound for any single response body.
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Read-only view of the job backend.
#[async_trait::async_trait]
pub trait ConsoleApi: Send + Sync {
    async fn about(&self) -> Result<ApplicationInfo, FetchError>;

    async fn plugins(&self, kind: PluginKind) -> Result<Vec<PluginDescriptor>, FetchError>;

    async fn jobs(&self) -> Result<Vec<JobRecord>, FetchError>;

    /// Plain-text body of `{uuid}{suffix}`, decoded variant when `decoded`.
    async fn job_text(&self, uuid: &str, suffix: &str, decoded: bool)
        -> Result<String, FetchError>;

    /// Raw body of `{uuid}{api}`, used for downloads.
    async fn job_bytes(&self, uuid: &str, api: &str) -> Result<Vec<u8>, FetchError>;
}

/// Builds `{base}/job/{uuid}{suffix}`, appending `q=2` when `decoded`.
///
/// `suffix` may carry its own query string; path pieces are percent-encoded.
pub fn job_url(base: &Url, uuid: &str, suffix: &str, decoded: bool) -> Result<Url, FetchError> {
    let (path, query) = match suffix.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (suffix, None),
    };
    let mut url = endpoint_url(base, &["job", uuid])?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| FetchError::new(FailureKind::InvalidUrl, "base url cannot hold a path"))?;
        segments.extend(path.split('/').filter(|part| !part.is_empty()));
    }
    if let Some(query) = query.filter(|query| !query.is_empty()) {
        url.set_query(Some(query));
    }
    if decoded {
        url.query_pairs_mut()
            .append_pair(DECODED_QUERY.0, DECODED_QUERY.1);
    }
    Ok(url)
}

fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url, FetchError> {
    let mut url = base.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|_| FetchError::new(FailureKind::InvalidUrl, "base url cannot hold a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ClientSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ClientSettings) -> Result<Self, FetchError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    async fn get_bytes(&self, url: Url, accept: &str) -> Result<Vec<u8>, FetchError> {
        console_debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            console_warn!("GET {} returned {}", url, status);
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        console_debug!("GET {} -> {} bytes", url, bytes.len());
        Ok(bytes)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, FetchError> {
        let url = endpoint_url(&self.base, segments)?;
        let bytes = self.get_bytes(url, "application/json").await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::InvalidBody, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ConsoleApi for ReqwestApi {
    async fn about(&self) -> Result<ApplicationInfo, FetchError> {
        let dto: AboutDto = self.get_json(&["version"]).await?;
        Ok(dto.into())
    }

    async fn plugins(&self, kind: PluginKind) -> Result<Vec<PluginDescriptor>, FetchError> {
        let segment = match kind {
            PluginKind::Provider => "providers",
            PluginKind::Publisher => "publishers",
        };
        let dtos: Vec<PluginDto> = self.get_json(&[segment]).await?;
        Ok(dtos
            .into_iter()
            .map(|dto| dto.into_descriptor(kind))
            .collect())
    }

    async fn jobs(&self) -> Result<Vec<JobRecord>, FetchError> {
        let dtos: Vec<JobDto> = self.get_json(&["job"]).await?;
        Ok(dtos.into_iter().map(JobRecord::from).collect())
    }

    async fn job_text(
        &self,
        uuid: &str,
        suffix: &str,
        decoded: bool,
    ) -> Result<String, FetchError> {
        let url = job_url(&self.base, uuid, suffix, decoded)?;
        let bytes = self.get_bytes(url, "text/plain").await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn job_bytes(&self, uuid: &str, api: &str) -> Result<Vec<u8>, FetchError> {
        let url = job_url(&self.base, uuid, api, false)?;
        self.get_bytes(url, "*/*").await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

