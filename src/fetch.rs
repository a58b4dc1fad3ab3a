//! Dataset retrieval over HTTP
//!
//! A fetch is a single GET with no retries. The response status is checked before the body
//! is read, and the body is decoded according to the source format.

use crate::error::{DecodeError, Error, Result};
use crate::types::{Payload, SourceFormat};
use async_trait::async_trait;
use tracing::debug;

/// Retrieves the raw payload for a source
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and decode the body as `format` requires
    async fn fetch(&self, url: &str, format: SourceFormat) -> Result<Payload>;
}

/// [`Fetcher`] backed by a shared `reqwest` client with transport-default timeouts
#[derive(Clone, Debug, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a default client
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fetcher around an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, format: SourceFormat) -> Result<Payload> {
        debug!(url, %format, "sending request");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let payload = match format {
            // Honors the charset in Content-Type, falling back to UTF-8
            SourceFormat::Text => Payload::Text(response.text().await?),
            SourceFormat::Csv => {
                let bytes = response.bytes().await?;
                let text = String::from_utf8(bytes.to_vec()).map_err(|e| DecodeError::Utf8 {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;
                Payload::Text(text)
            }
            SourceFormat::Spreadsheet => Payload::Bytes(response.bytes().await?.to_vec()),
            SourceFormat::JsonRecords => {
                let bytes = response.bytes().await?;
                let value = serde_json::from_slice(&bytes).map_err(DecodeError::Json)?;
                Payload::Json(value)
            }
        };

        debug!(url, kind = payload.kind(), "response decoded");
        Ok(payload)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Helper: start a mock server serving `template` at `path_str`, return the full URL.
    async fn serve(server: &MockServer, path_str: &str, template: ResponseTemplate) -> String {
        Mock::given(method("GET"))
            .and(path(path_str))
            .respond_with(template)
            .expect(1)
            .mount(server)
            .await;
        format!("{}{}", server.uri(), path_str)
    }

    #[tokio::test]
    async fn fetches_text() {
        let server = MockServer::start().await;
        let url = serve(
            &server,
            "/play.html",
            ResponseTemplate::new(200).set_body_string("Romeo, Romeo"),
        )
        .await;

        let payload = HttpFetcher::new()
            .fetch(&url, SourceFormat::Text)
            .await
            .unwrap();

        assert_eq!(payload, Payload::Text("Romeo, Romeo".into()));
    }

    #[tokio::test]
    async fn fetches_csv_as_text() {
        let server = MockServer::start().await;
        let url = serve(
            &server,
            "/2020.csv",
            ResponseTemplate::new(200).set_body_string("a,b\n1,2\n"),
        )
        .await;

        let payload = HttpFetcher::new()
            .fetch(&url, SourceFormat::Csv)
            .await
            .unwrap();

        assert_eq!(payload, Payload::Text("a,b\n1,2\n".into()));
    }

    #[tokio::test]
    async fn csv_with_invalid_utf8_is_decode_error() {
        let server = MockServer::start().await;
        let url = serve(
            &server,
            "/bad.csv",
            ResponseTemplate::new(200).set_body_bytes(vec![b'a', 0xff, 0xfe, b'\n']),
        )
        .await;

        let err = HttpFetcher::new()
            .fetch(&url, SourceFormat::Csv)
            .await
            .unwrap_err();

        assert_eq!(err.class(), ErrorClass::Decode);
        assert_eq!(err.error_code(), "invalid_utf8");
    }

    #[tokio::test]
    async fn fetches_spreadsheet_bytes_untouched() {
        let body = vec![0xd0, 0xcf, 0x11, 0xe0, 0x00, 0xff];
        let server = MockServer::start().await;
        let url = serve(
            &server,
            "/cattle.xls",
            ResponseTemplate::new(200).set_body_bytes(body.clone()),
        )
        .await;

        let payload = HttpFetcher::new()
            .fetch(&url, SourceFormat::Spreadsheet)
            .await
            .unwrap();

        assert_eq!(payload, Payload::Bytes(body));
    }

    #[tokio::test]
    async fn fetches_json_records() {
        let server = MockServer::start().await;
        let url = serve(
            &server,
            "/astros.json",
            ResponseTemplate::new(200)
                .set_body_string(r#"{"number": 1, "people": [{"name": "x"}]}"#),
        )
        .await;

        let payload = HttpFetcher::new()
            .fetch(&url, SourceFormat::JsonRecords)
            .await
            .unwrap();

        assert_eq!(
            payload,
            Payload::Json(serde_json::json!({"number": 1, "people": [{"name": "x"}]}))
        );
    }

    #[tokio::test]
    async fn malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        let url = serve(
            &server,
            "/astros.json",
            ResponseTemplate::new(200).set_body_string("{\"people\": ["),
        )
        .await;

        let err = HttpFetcher::new()
            .fetch(&url, SourceFormat::JsonRecords)
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "invalid_json");
    }

    #[tokio::test]
    async fn non_success_status_is_network_error() {
        let server = MockServer::start().await;
        let url = serve(&server, "/missing.csv", ResponseTemplate::new(404)).await;

        let err = HttpFetcher::new()
            .fetch(&url, SourceFormat::Csv)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
        assert_eq!(err.class(), ErrorClass::Network);
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        // Bind then drop a listener so the port is known to be closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = HttpFetcher::new()
            .fetch(&format!("http://{addr}/data.txt"), SourceFormat::Text)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Network(_)));
        assert_eq!(err.class(), ErrorClass::Network);
    }
}
