use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use url::Url;

use crate::wire::ErrorBody;
use crate::{ClientError, ClientSettings, FailureKind};

pub(crate) fn build_client(settings: &ClientSettings) -> Result<reqwest::Client, ClientError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .build()
        .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))
}

/// Resolves `path` below the configured base, keeping any path prefix the base carries.
pub(crate) fn endpoint(settings: &ClientSettings, path: &str) -> Result<Url, ClientError> {
    let mut base = settings.base_url.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/'))
        .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))
}

/// Reads a successful response as JSON; turns anything else into a [`ClientError`].
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    max_bytes: u64,
) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = read_body(response, max_bytes).await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());
        return Err(ClientError::new(
            FailureKind::HttpStatus(status.as_u16()),
            message,
        ));
    }

    let body = read_body(response, max_bytes).await?;
    serde_json::from_slice(&body)
        .map_err(|err| ClientError::new(FailureKind::MalformedResponse, err.to_string()))
}

async fn read_body(response: reqwest::Response, max_bytes: u64) -> Result<Vec<u8>, ClientError> {
    if let Some(content_len) = response.content_length() {
        if content_len > max_bytes {
            return Err(too_large(max_bytes, content_len));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        let next_len = bytes.len() as u64 + chunk.len() as u64;
        if next_len > max_bytes {
            return Err(too_large(max_bytes, next_len));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

pub(crate) fn too_large(max_bytes: u64, actual: u64) -> ClientError {
    ClientError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "payload too large",
    )
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ClientError::new(FailureKind::MalformedResponse, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(base: &str) -> ClientSettings {
        ClientSettings::with_base_url(Url::parse(base).unwrap())
    }

    #[test]
    fn endpoint_joins_below_root() {
        let url = endpoint(&settings("http://localhost:5050"), "/upload/resume").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5050/upload/resume");
    }

    #[test]
    fn endpoint_keeps_base_prefix() {
        let url = endpoint(&settings("https://ats.example.com/api"), "score-keywords").unwrap();
        assert_eq!(url.as_str(), "https://ats.example.com/api/score-keywords");

        let url = endpoint(&settings("https://ats.example.com/api/"), "/score-keywords").unwrap();
        assert_eq!(url.as_str(), "https://ats.example.com/api/score-keywords");
    }
}
