pub mod error;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Url;
use serde::Deserialize;

use crate::fetch::error::FetchError;
use crate::fetch::error::Result;
use crate::labels::LabelDataset;
use crate::series::TimeSeries;

/// Appended to the page URL to reach the statistics endpoint.
const JSON_PATH: &str = "json";

/// Asks the endpoint to include the per-label table. The capitalized
/// boolean is what the endpoint expects and is sent verbatim.
pub const INCLUDE_LABELS_QUERY: &str = "include_labels=True";

/// A source of the per-label issue counts.
#[async_trait]
pub trait LabelSource {
    async fn fetch_labels(&self) -> Result<LabelDataset>;
}

/// The body returned by the statistics endpoint.
///
/// Every field is optional: the per-label table is only present when it was
/// asked for, and older servers do not send the per-day series.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatsPayload {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub stargazers: Option<TimeSeries>,
    pub open_issues: Option<TimeSeries>,
    pub open_pulls: Option<TimeSeries>,
    pub by_label: Option<LabelDataset>,
}

/// A client for the JSON endpoint that sits next to a dashboard page.
pub struct StatsClient {
    client: Client,
    page_url: Url,
}

impl StatsClient {
    /// Creates a client for the dashboard page at `page_url`. Requests never
    /// time out unless `timeout` is set.
    pub fn new(page_url: &str, timeout: Option<Duration>) -> Result<StatsClient> {
        let page_url = Url::parse(page_url).map_err(|e| FetchError::Url(e.to_string()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, page_url })
    }

    /// The endpoint URL: the page URL followed by `/json`, plus the label
    /// query when `include_labels` is set.
    pub fn stats_url(&self, include_labels: bool) -> String {
        let page_url = self.page_url.as_str().trim_end_matches('/');

        if include_labels {
            format!("{page_url}/{JSON_PATH}?{INCLUDE_LABELS_QUERY}")
        } else {
            format!("{page_url}/{JSON_PATH}")
        }
    }

    pub async fn fetch_stats(&self, include_labels: bool) -> Result<StatsPayload> {
        let url = self.stats_url(include_labels);
        tracing::info!(%url, "fetching repository statistics");

        let response = self.client.get(&url).send().await?;

        match response.status() {
            status if status.is_success() => {
                let payload: StatsPayload = response.json().await?;
                Ok(payload)
            }
            status_code => {
                let message = response.text().await?;
                let error = FetchError::Response {
                    status_code,
                    message,
                };
                Err(error)
            }
        }
    }
}

#[async_trait]
impl LabelSource for StatsClient {
    async fn fetch_labels(&self) -> Result<LabelDataset> {
        let payload = self.fetch_stats(true).await?;
        payload.by_label.ok_or(FetchError::MissingField("by_label"))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use tokio::io::AsyncReadExt;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    use super::*;

    // Answers a single request with `body` and returns the page URL.
    async fn serve_once(body: &'static str) -> std::io::Result<String> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}/danvk/dygraphs", listener.local_addr()?);

        tokio::spawn(async move {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };

            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buffer).await {
                    Ok(0) | Err(_) => return,
                    Ok(n) => request.extend_from_slice(&buffer[..n]),
                }
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
        });

        Ok(url)
    }

    #[test]
    fn stats_url_appends_json_path_and_label_query() -> Result<()> {
        let client = StatsClient::new("https://stats.example.com/danvk/dygraphs", None)?;

        assert_eq!(
            client.stats_url(true),
            "https://stats.example.com/danvk/dygraphs/json?include_labels=True"
        );
        assert_eq!(
            client.stats_url(false),
            "https://stats.example.com/danvk/dygraphs/json"
        );

        Ok(())
    }

    #[test]
    fn stats_url_ignores_trailing_slash() -> Result<()> {
        let client = StatsClient::new("https://stats.example.com/", None)?;

        assert_eq!(
            client.stats_url(true),
            "https://stats.example.com/json?include_labels=True"
        );

        Ok(())
    }

    #[test]
    fn invalid_page_url() {
        let result = StatsClient::new("not a url", None);

        assert!(matches!(result, Err(FetchError::Url(_))));
    }

    #[test]
    fn payload_without_labels() -> std::result::Result<(), serde_json::Error> {
        let payload: StatsPayload = serde_json::from_str(
            r#"{"owner": "danvk", "repo": "dygraphs",
                "stargazers": [["2023-01-05 00:00:00Z", 1200]],
                "open_issues": [], "open_pulls": []}"#,
        )?;

        assert_eq!(payload.owner.as_deref(), Some("danvk"));
        assert_eq!(payload.stargazers.map(|s| s.len()), Some(1));
        assert!(payload.by_label.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn refused_connection_is_an_http_error() -> Result<()> {
        // Nothing listens on port 1.
        let client = StatsClient::new("http://127.0.0.1:1/danvk/dygraphs", None)?;

        let result = client.fetch_labels().await;

        assert!(matches!(result, Err(FetchError::Http(_))));

        Ok(())
    }

    #[tokio::test]
    async fn fetch_labels_reads_the_label_table() -> std::result::Result<(), Box<dyn Error>> {
        let url = serve_once(
            r#"{"owner": "danvk", "repo": "dygraphs",
                "by_label": [["", "bug"], ["2023-01-05 00:00:00Z", 3]]}"#,
        )
        .await?;
        let client = StatsClient::new(&url, None)?;

        let dataset = client.fetch_labels().await?;

        assert_eq!(dataset.labels(), ["bug"]);
        assert_eq!(dataset.rows.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn missing_label_table_is_an_error() -> std::result::Result<(), Box<dyn Error>> {
        let url = serve_once(r#"{"owner": "danvk", "repo": "dygraphs"}"#).await?;
        let client = StatsClient::new(&url, None)?;

        let result = client.fetch_labels().await;

        assert!(matches!(result, Err(FetchError::MissingField("by_label"))));

        Ok(())
    }

    #[tokio::test]
    async fn silent_server_times_out() -> std::result::Result<(), Box<dyn Error>> {
        // Connections are queued by the listener but never answered.
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}/danvk/dygraphs", listener.local_addr()?);
        let client = StatsClient::new(&url, Some(Duration::from_millis(200)))?;

        let result = client.fetch_labels().await;

        assert!(matches!(result, Err(FetchError::Http(ref error)) if error.is_timeout()));
        drop(listener);

        Ok(())
    }
}
