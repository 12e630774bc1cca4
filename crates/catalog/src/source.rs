//! Where catalog rows come from.

use crate::csv::parse_records;
use crate::error::{CatalogError, CatalogResult, DataSourceError};
use crate::item::RawRow;
use partmatch_core::config::Config;
use partmatch_core::retry::RetryConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Floor for a single attempt's timeout
const MIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// A provider of raw catalog rows.
pub trait DataSource: Send + Sync {
    /// Fetch every row of the catalog.
    fn fetch_rows(&self) -> impl Future<Output = Result<Vec<RawRow>, DataSourceError>> + Send;

    /// Human-readable location, for logs and health output.
    fn location(&self) -> &str;
}

/// Published spreadsheet exported as CSV over HTTP.
#[derive(Debug, Clone)]
pub struct SheetSource {
    client: Client,
    url: String,
    retry: RetryConfig,
    timeout: Duration,
    request_timeout: Duration,
}

impl SheetSource {
    /// Create a source for a published CSV URL.
    ///
    /// `timeout` is the budget for the whole fetch, retries included.
    /// Each attempt gets an equal share of it.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DataSourceError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("text/csv"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("partmatch/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder().default_headers(default_headers).build()?;
        let retry = RetryConfig::default();

        Ok(Self {
            client,
            url: url.into(),
            request_timeout: per_request_timeout(timeout, &retry),
            retry,
            timeout,
        })
    }

    /// Create a source from loaded configuration.
    ///
    /// Fails with [`CatalogError::Configuration`] when no URL is set.
    pub fn from_config(config: &Config) -> CatalogResult<Self> {
        let url = config.sheet_url()?;
        let timeout = Duration::from_secs(config.schema.source.timeout_secs);
        Self::new(url, timeout).map_err(CatalogError::from)
    }

    /// Override the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.request_timeout = per_request_timeout(self.timeout, &retry);
        self.retry = retry;
        self
    }

    /// Sheet URL
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn download_with_retry(&self) -> Result<String, DataSourceError> {
        let request_id = Uuid::new_v4().to_string();
        let mut attempt = 0;

        loop {
            if attempt > 0 {
                let delay = self.retry.delay_for_attempt(attempt);
                debug!(
                    request_id = %request_id,
                    attempt = attempt,
                    delay_ms = delay.as_millis(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();
            match self.download(&request_id).await {
                Ok(body) => {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        elapsed_ms = start.elapsed().as_millis(),
                        bytes = body.len(),
                        "Sheet downloaded"
                    );
                    return Ok(body);
                }
                Err(e) if e.is_retryable() && self.retry.should_retry(attempt) => {
                    warn!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        error = %e,
                        "Sheet download failed, will retry"
                    );
                    attempt += 1;
                }
                Err(e) => {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        error = %e,
                        "Sheet download failed, not retrying"
                    );
                    return Err(e);
                }
            }
        }
    }

    async fn download(&self, request_id: &str) -> Result<String, DataSourceError> {
        let response = self
            .client
            .get(&self.url)
            .header(X_REQUEST_ID, request_id)
            .timeout(self.request_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataSourceError::Status {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        ensure_csv(content_type.as_deref())?;

        Ok(response.text().await?)
    }
}

/// Share of the fetch budget one attempt may use, so that a timed-out
/// attempt leaves room for the next one.
fn per_request_timeout(total: Duration, retry: &RetryConfig) -> Duration {
    let attempts = retry.max_attempts.max(1);
    (total / attempts).max(MIN_REQUEST_TIMEOUT.min(total))
}

/// Reject HTML pages served in place of the CSV export.
///
/// Unpublished sheets answer 200 with a sign-in page.
fn ensure_csv(content_type: Option<&str>) -> Result<(), DataSourceError> {
    match content_type {
        Some(ct) if ct.to_ascii_lowercase().contains("text/html") => Err(DataSourceError::Parse(
            "expected CSV but the sheet returned an HTML page; is it published to the web?".into(),
        )),
        _ => Ok(()),
    }
}

impl DataSource for SheetSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, DataSourceError> {
        let body = self.download_with_retry().await?;
        Ok(parse_records(&body))
    }

    fn location(&self) -> &str {
        &self.url
    }
}

/// CSV file on local disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    location: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileSource {
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, DataSourceError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let rows = parse_records(&text);
        debug!(path = %self.location, rows = rows.len(), "Catalog file read");
        Ok(rows)
    }

    fn location(&self) -> &str {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SHEET_CSV: &str = "Барааны нэр,TOK код,OEM код\nPrius бампер,TOK123,OEM456\n";

    fn sheet_at(server: &MockServer, timeout: Duration) -> SheetSource {
        SheetSource::new(format!("{}/sheet.csv", server.uri()), timeout)
            .unwrap()
            .with_retry(RetryConfig::quick())
    }

    fn csv_response() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(SHEET_CSV, "text/csv")
    }

    #[test]
    fn test_ensure_csv() {
        assert!(ensure_csv(None).is_ok());
        assert!(ensure_csv(Some("text/csv; charset=utf-8")).is_ok());
        assert!(matches!(
            ensure_csv(Some("Text/HTML; charset=utf-8")),
            Err(DataSourceError::Parse(_))
        ));
    }

    #[test]
    fn test_sheet_source_from_config() {
        let mut config = Config::default();
        let err = SheetSource::from_config(&config).unwrap_err();
        assert!(matches!(err, CatalogError::Configuration(_)));

        config.schema.source.url = Some("https://example.com/pub?output=csv".into());
        let source = SheetSource::from_config(&config).unwrap();
        assert_eq!(source.location(), "https://example.com/pub?output=csv");
    }

    #[test]
    fn test_per_request_timeout() {
        let total = Duration::from_secs(15);
        assert_eq!(per_request_timeout(total, &RetryConfig::default()), Duration::from_secs(5));
        assert_eq!(per_request_timeout(total, &RetryConfig::no_retry()), total);
        assert_eq!(
            per_request_timeout(Duration::from_millis(1500), &RetryConfig::default()),
            MIN_REQUEST_TIMEOUT
        );
        assert_eq!(
            per_request_timeout(Duration::from_millis(400), &RetryConfig::default()),
            Duration::from_millis(400)
        );
    }

    #[tokio::test]
    async fn test_sheet_retries_server_error_then_succeeds() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sheet.csv"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/sheet.csv"))
            .and(header("accept", "text/csv"))
            .and(header_exists("x-request-id"))
            .respond_with(csv_response())
            .expect(1)
            .mount(&server)
            .await;

        let rows = sheet_at(&server, Duration::from_secs(10)).fetch_rows().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["TOK код"], "TOK123");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        let ids: Vec<_> = requests
            .iter()
            .map(|r| r.headers.get("x-request-id").cloned())
            .collect();
        assert!(ids[0].is_some());
        assert_eq!(ids[0], ids[1]);
    }

    #[tokio::test]
    async fn test_sheet_not_found_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sheet.csv"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = sheet_at(&server, Duration::from_secs(10)).fetch_rows().await.unwrap_err();
        assert!(matches!(err, DataSourceError::Status { status: 404 }));
        assert_eq!(err.to_string(), "Failed to download sheet: 404");
    }

    #[tokio::test]
    async fn test_sheet_html_page_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sheet.csv"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>Sign in</body></html>", "text/html; charset=utf-8"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = sheet_at(&server, Duration::from_secs(10)).fetch_rows().await.unwrap_err();
        assert!(matches!(err, DataSourceError::Parse(_)));
    }

    #[tokio::test]
    async fn test_sheet_slow_attempt_is_retried_within_budget() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sheet.csv"))
            .respond_with(csv_response().set_delay(Duration::from_secs(3)))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/sheet.csv"))
            .respond_with(csv_response())
            .expect(1)
            .mount(&server)
            .await;

        // Three attempts share the budget, so the first gives up after 1s.
        let source = sheet_at(&server, Duration::from_secs(3));
        let rows = tokio::time::timeout(Duration::from_secs(3), source.fetch_rows())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_file_source_reads_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "Барааны нэр,TOK код,OEM код\nPrius бампер,TOK123,OEM456\nHarrier толь,,\n"
        )
        .unwrap();

        let source = FileSource::new(file.path());
        let rows = source.fetch_rows().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["TOK код"], "TOK123");
        assert_eq!(rows[1]["Барааны нэр"], "Harrier толь");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/catalog.csv");
        let err = source.fetch_rows().await.unwrap_err();
        assert!(matches!(err, DataSourceError::Io(_)));
        assert!(!err.is_retryable());
    }
}
