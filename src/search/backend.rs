//! Search endpoint client
//!
//! The hosted endpoint embeds the query, runs a k-NN lookup against the
//! transcript index and answers with a ranked JSON array.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use super::error::SearchError;
use super::result::SearchResult;

/// Default hosted search endpoint
pub const DEFAULT_ENDPOINT: &str = "https://launch-semantic-search-capstone-yt.vercel.app/api/search";

/// Anything that can answer `{ query } -> SearchResult[]`
pub trait SearchBackend: Send + Sync + 'static {
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;
}

/// HTTP client for the hosted search API
pub struct HttpBackend {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend for a custom endpoint
    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("capstone-search/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SearchError::Client)?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SearchBackend for HttpBackend {
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<SearchResult>, SearchError>> + Send {
        let request = self.client.get(&self.endpoint).query(&[("query", query)]);
        let query = query.to_string();

        async move {
            debug!("GET search query={:?}", query);
            let response = request.send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(SearchError::Status(status));
            }

            let body = response.bytes().await?;
            let results: Vec<SearchResult> = serde_json::from_slice(&body)
                .map_err(|e| SearchError::Decode(e.to_string()))?;

            debug!("query={:?} returned {} results", query, results.len());
            Ok(results)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response and hand back the request head
    async fn serve_once(status: &str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let status = status.to_string();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            let head = String::from_utf8_lossy(&buf[..n]).to_string();

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            head
        });

        (format!("http://{}/api/search", addr), handle)
    }

    #[test]
    fn test_endpoint_trimmed() {
        let backend =
            HttpBackend::with_endpoint("https://custom.example.com/api/search/", Duration::from_secs(5))
                .unwrap();
        assert_eq!(backend.endpoint(), "https://custom.example.com/api/search");
    }

    #[test]
    fn test_default_endpoint() {
        let backend = HttpBackend::with_endpoint(DEFAULT_ENDPOINT, Duration::from_secs(30)).unwrap();
        assert_eq!(backend.endpoint(), DEFAULT_ENDPOINT);
        assert!(DEFAULT_ENDPOINT.ends_with("/api/search"));
    }

    #[tokio::test]
    async fn test_search_decodes_results_in_order() {
        let body = r#"[
            {"id":"b:1","score":0.91,"metadata":{"videoId":"b","title":"Second","text":"x","start":10,"end":20}},
            {"id":"a:4","score":0.95,"metadata":{"videoId":"a","title":"First","text":"y","start":"30","end":"40"}}
        ]"#;
        let (url, server) = serve_once("200 OK", body).await;

        let backend = HttpBackend::with_endpoint(&url, Duration::from_secs(5)).unwrap();
        let results = backend.search("api load testing").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "b:1");
        assert_eq!(results[1].id, "a:4");

        let head = server.await.unwrap();
        assert!(head.starts_with("GET /api/search?query=api+load+testing "));
    }

    #[tokio::test]
    async fn test_search_status_error() {
        let (url, server) = serve_once("500 Internal Server Error", "{}").await;

        let backend = HttpBackend::with_endpoint(&url, Duration::from_secs(5)).unwrap();
        let err = backend.search("websockets").await.unwrap_err();
        assert!(matches!(err, SearchError::Status(s) if s.as_u16() == 500));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_search_malformed_body() {
        let (url, server) = serve_once("200 OK", r#"{"error":"nope"}"#).await;

        let backend = HttpBackend::with_endpoint(&url, Duration::from_secs(5)).unwrap();
        let err = backend.search("websockets").await.unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
        server.await.unwrap();
    }
}
