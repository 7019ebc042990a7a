//! Photographer page data loading.
//!
//! A page starts in [`PhotographerView::Loading`] and moves at most once:
//! - a successful fetch makes it `Ready` with the summary computed up front,
//! - a non-success HTTP status, or a photographer with no photos, makes it
//!   `NotFound`,
//! - a transport or decode fault is logged and leaves it `Loading`; there is
//!   no retry.

use compute::{AggregationResult, MetricSchema};
use tracing::{debug, warn};

use crate::model::PhotographerRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Found(PhotographerRecord),
    /// The server answered with a non-success status.
    Unavailable(u16),
    /// Connection, protocol or body decoding failure.
    TransportFault(String),
}

#[derive(Debug, Clone)]
pub struct PhotographerClient {
    http: reqwest::Client,
    base_url: String,
}

impl PhotographerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn photographer_url(&self, number: u32) -> String {
        format!(
            "{}/api/photographer/{number}/",
            self.base_url.trim_end_matches('/')
        )
    }

    pub async fn fetch(&self, number: u32) -> FetchOutcome {
        let url = self.photographer_url(number);
        let resp = match self.http.get(&url).send().await {
            Ok(resp) => resp,
            Err(err) => return FetchOutcome::TransportFault(format!("GET {url}: {err}")),
        };

        let status = resp.status();
        if !status.is_success() {
            return FetchOutcome::Unavailable(status.as_u16());
        }

        match resp.json::<PhotographerRecord>().await {
            Ok(record) => FetchOutcome::Found(record),
            Err(err) => FetchOutcome::TransportFault(format!("decode {url}: {err}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhotographerPage {
    pub photographer: PhotographerRecord,
    /// Summary panel values, in schema order.
    pub summary: AggregationResult,
}

impl PhotographerPage {
    pub fn new(photographer: PhotographerRecord, schema: &MetricSchema) -> Self {
        let summary = photographer.summarize(schema);
        Self {
            photographer,
            summary,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum PhotographerView {
    #[default]
    Loading,
    NotFound,
    Ready(PhotographerPage),
}

impl PhotographerView {
    pub fn apply(self, number: u32, outcome: FetchOutcome, schema: &MetricSchema) -> Self {
        match outcome {
            FetchOutcome::Found(record) if record.photos.is_empty() => {
                debug!(number, "photographer has no photos to summarize");
                PhotographerView::NotFound
            }
            FetchOutcome::Found(record) => {
                PhotographerView::Ready(PhotographerPage::new(record, schema))
            }
            FetchOutcome::Unavailable(status) => {
                debug!(number, status, "photographer not available");
                PhotographerView::NotFound
            }
            FetchOutcome::TransportFault(msg) => {
                warn!(number, "photographer fetch failed: {msg}");
                self
            }
        }
    }

    /// Fetches photographer `number` once and returns the resulting view.
    pub async fn load(client: &PhotographerClient, number: u32, schema: &MetricSchema) -> Self {
        let outcome = client.fetch(number).await;
        PhotographerView::Loading.apply(number, outcome, schema)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PhotographerView::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compute::PHOTOGRAPHER_SCHEMA;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves exactly one canned HTTP response and returns the base url.
    async fn serve_once(status_line: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}")
    }

    fn record() -> PhotographerRecord {
        serde_json::from_str(
            r#"{
                "name": "Marie Curie",
                "number": 5,
                "map_square": {"number": 9},
                "photos": [
                    {"map_square_number": 9, "number": 1,
                     "analyses": [{"name": "whitespace_percentage", "result": "12"}]}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn photographer_url_has_trailing_slash() {
        let client = PhotographerClient::new("http://archive.local/");
        assert_eq!(
            client.photographer_url(42),
            "http://archive.local/api/photographer/42/"
        );
    }

    #[test]
    fn found_becomes_ready_with_summary() {
        let view = PhotographerView::Loading.apply(
            5,
            FetchOutcome::Found(record()),
            &PHOTOGRAPHER_SCHEMA,
        );
        let PhotographerView::Ready(page) = view else {
            panic!("expected ready view");
        };
        assert_eq!(page.photographer.name, "Marie Curie");
        assert_eq!(page.summary.get("whitespace_percentage"), Some(12.0));
        assert_eq!(page.summary.get("portrait_detection"), Some(0.0));
    }

    #[test]
    fn unavailable_becomes_not_found() {
        let view =
            PhotographerView::Loading.apply(5, FetchOutcome::Unavailable(404), &PHOTOGRAPHER_SCHEMA);
        assert_eq!(view, PhotographerView::NotFound);
    }

    #[test]
    fn photographer_without_photos_is_not_found() {
        let mut empty = record();
        empty.photos.clear();
        let view =
            PhotographerView::Loading.apply(5, FetchOutcome::Found(empty), &PHOTOGRAPHER_SCHEMA);
        assert_eq!(view, PhotographerView::NotFound);
    }

    #[test]
    fn transport_fault_keeps_loading() {
        let view = PhotographerView::Loading.apply(
            5,
            FetchOutcome::TransportFault("connection reset".to_string()),
            &PHOTOGRAPHER_SCHEMA,
        );
        assert!(view.is_loading());
    }

    #[tokio::test]
    async fn fetch_success_decodes_record() {
        let body = serde_json::to_string(&record()).unwrap();
        let base = serve_once("200 OK", body).await;
        let client = PhotographerClient::new(base);
        assert_eq!(client.fetch(5).await, FetchOutcome::Found(record()));
    }

    #[tokio::test]
    async fn fetch_http_error_is_unavailable() {
        let base = serve_once("404 Not Found", r#"{"error":"not found"}"#.to_string()).await;
        let client = PhotographerClient::new(base);
        let view = PhotographerView::load(&client, 5, &PHOTOGRAPHER_SCHEMA).await;
        assert_eq!(view, PhotographerView::NotFound);
    }

    #[tokio::test]
    async fn fetch_garbage_body_is_transport_fault() {
        let base = serve_once("200 OK", "<html>".to_string()).await;
        let client = PhotographerClient::new(base);
        assert!(matches!(
            client.fetch(5).await,
            FetchOutcome::TransportFault(_)
        ));
    }

    #[tokio::test]
    async fn connection_refused_leaves_view_loading() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = PhotographerClient::new(format!("http://{addr}"));
        let view = PhotographerView::load(&client, 5, &PHOTOGRAPHER_SCHEMA).await;
        assert!(view.is_loading());
    }
}
