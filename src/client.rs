//! HTTP plumbing shared by the result aggregator.
//!
//! Provides a configured [`reqwest::Client`], a timed-GET primitive used as
//! the primary retrieval strategy for the instant-answer source, and the
//! CORS-relay fallback that unwraps the proxy's JSON envelope.

use crate::config::SourcesConfig;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// User-Agent string identifying this tool
const USER_AGENT: &str = concat!(
    "searchdocs/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/searchdocs/searchdocs)"
);

/// Default timeout for HTTP requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A single upstream source failed. Recovered locally as an empty result
/// list for that source; never surfaced to the user.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// JSON envelope returned by the CORS-relay proxy. The target response body
/// arrives as a string in `contents` and needs a second parse step.
#[derive(Debug, Deserialize)]
struct RelayEnvelope {
    #[serde(default)]
    contents: String,
}

/// Create a configured HTTP client for the upstream APIs
pub fn create_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

/// Fetch `url` and deserialize the JSON body, racing against `timeout`.
///
/// This is the request-with-timeout primitive behind the instant-answer
/// source: it resolves or rejects exactly once, and dropping the future on
/// timeout cancels the in-flight request.
pub async fn get_json_timed<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<T, SourceError> {
    let request = async {
        let response = client.get(url).send().await?;
        let payload = response.json::<T>().await?;
        Ok(payload)
    };

    match tokio::time::timeout(timeout, request).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout(timeout)),
    }
}

/// Fetch `target_url` through the CORS-relay proxy and parse the relayed
/// body as embedded JSON.
///
/// Used only when the direct strategy rejects; the relay wraps the target
/// response in an envelope whose `contents` field holds the raw body.
pub async fn get_json_relayed<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    config: &SourcesConfig,
    target_url: &str,
) -> Result<T, SourceError> {
    let proxy_url = format!("{}{}", config.relay_url, urlencoding::encode(target_url));
    tracing::debug!(%proxy_url, "falling back to relay proxy");

    let envelope = client
        .get(&proxy_url)
        .send()
        .await?
        .json::<RelayEnvelope>()
        .await?;

    let payload = serde_json::from_str(&envelope.contents)?;
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_envelope_second_parse() {
        let body = r#"{"contents": "{\"Abstract\": \"Rust is a language.\"}"}"#;
        let envelope: RelayEnvelope = serde_json::from_str(body).expect("envelope parse");
        let inner: serde_json::Value =
            serde_json::from_str(&envelope.contents).expect("inner parse");
        assert_eq!(inner["Abstract"], "Rust is a language.");
    }

    #[test]
    fn relay_envelope_missing_contents_defaults_empty() {
        let envelope: RelayEnvelope = serde_json::from_str("{}").expect("envelope parse");
        assert!(envelope.contents.is_empty());
        let inner: Result<serde_json::Value, _> = serde_json::from_str(&envelope.contents);
        assert!(inner.is_err());
    }

    #[tokio::test]
    async fn timed_get_rejects_on_timeout() {
        // A listener that accepts but never responds: the request budget
        // expires before any bytes come back.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let url = format!("http://{}/", listener.local_addr().expect("addr"));

        let client = create_client().expect("client");
        let result: Result<serde_json::Value, _> =
            get_json_timed(&client, &url, Duration::from_millis(100)).await;
        assert!(matches!(result, Err(SourceError::Timeout(_))));
    }

    #[test]
    fn source_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SourceError>();
    }
}
