//! Chartdesk API client
//!
//! Provides the chart-data and upload calls against the Chartdesk backend.

use async_trait::async_trait;
use chartdesk_core::{ApiError, ApiResult, ChartData};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::api::MarketApi;
use crate::config::{ClientConfig, ConfigError, DEFAULT_CONTENT_TYPE};
use crate::interceptor::{map_reqwest_error, unwrap_body, Interceptor, LoggingInterceptor};
use crate::types::FormData;

/// Chartdesk API client
#[derive(Clone)]
pub struct MarketClient {
    client: Client,
    config: ClientConfig,
    interceptor: Arc<dyn Interceptor>,
}

impl MarketClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            config,
            interceptor: Arc::new(LoggingInterceptor),
        })
    }

    /// Replace the interceptor
    pub fn with_interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptor = Arc::new(interceptor);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch chart data for a market
    #[instrument(skip(self))]
    pub async fn get_chart_data(&self, market: &str) -> ApiResult<ChartData> {
        let url = self.config.url(&format!("/api/chart-data/{}", market));

        debug!("Fetching chart data from: {}", url);

        self.send(self.client.get(&url)).await
    }

    /// Upload a file for a market and file type
    #[instrument(skip(self, form))]
    pub async fn upload_file(
        &self,
        market: &str,
        file_type: &str,
        form: FormData,
    ) -> ApiResult<ChartData> {
        let url = self.config.url(&format!("/upload/{}/{}", market, file_type));

        debug!("Uploading {} part(s) to: {}", form.parts().len(), url);

        // The multipart body sets its own Content-Type with the boundary,
        // which takes precedence over the client-wide JSON default.
        let form = match form.into_multipart() {
            Ok(form) => form,
            Err(e) => return Err(self.fail(map_reqwest_error(e))),
        };

        self.send(self.client.post(&url).multipart(form)).await
    }

    /// Run a request through the interceptors and unwrap the body
    async fn send(&self, builder: RequestBuilder) -> ApiResult<ChartData> {
        match self.dispatch(builder).await {
            Ok(data) => Ok(data),
            Err(e) => Err(self.fail(e)),
        }
    }

    async fn dispatch(&self, builder: RequestBuilder) -> ApiResult<ChartData> {
        let request = builder.build().map_err(map_reqwest_error)?;
        let request = self.interceptor.on_request(request)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        unwrap_body(status, &body)
    }

    fn fail(&self, err: ApiError) -> ApiError {
        self.interceptor.on_error(&err);
        err
    }
}

#[async_trait]
impl MarketApi for MarketClient {
    async fn get_chart_data(&self, market: &str) -> ApiResult<ChartData> {
        MarketClient::get_chart_data(self, market).await
    }

    async fn upload_file(
        &self,
        market: &str,
        file_type: &str,
        form: FormData,
    ) -> ApiResult<ChartData> {
        MarketClient::upload_file(self, market, file_type, form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UploadFile;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve a single canned response and hand back the raw request
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (format!("http://{}", addr), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|l| {
                        let (k, v) = l.split_once(':')?;
                        k.eq_ignore_ascii_case("content-length")
                            .then(|| v.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&buf).into_owned()
    }

    #[derive(Default)]
    struct CountingInterceptor {
        requests: AtomicUsize,
        errors: AtomicUsize,
    }

    impl Interceptor for Arc<CountingInterceptor> {
        fn on_request(&self, request: reqwest::Request) -> ApiResult<reqwest::Request> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Ok(request)
        }

        fn on_error(&self, _err: &ApiError) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_get_chart_data_unwraps_body() {
        let (base_url, server) = serve_once("200 OK", r#"{"series":[1,2,3]}"#).await;
        let client = MarketClient::new(ClientConfig::new(base_url)).unwrap();

        let data = client.get_chart_data("cn").await.unwrap();
        assert_eq!(data, json!({"series": [1, 2, 3]}));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/chart-data/cn HTTP/1.1"));
        assert!(request.to_lowercase().contains("content-type: application/json"));
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_file_field() {
        let (base_url, server) = serve_once("200 OK", r#"{"status":"ok"}"#).await;
        let client = MarketClient::new(ClientConfig::new(base_url)).unwrap();

        let form = FormData::with_file(
            UploadFile::new("prices.csv", b"date,close\n2024-01-02,10.5\n".to_vec())
                .with_content_type("text/csv"),
        );
        let result = client.upload_file("hk", "prices", form).await.unwrap();
        assert_eq!(result, json!({"status": "ok"}));

        let request = server.await.unwrap();
        let lower = request.to_lowercase();
        assert!(request.starts_with("POST /upload/hk/prices HTTP/1.1"));
        assert!(lower.contains("content-type: multipart/form-data; boundary="));
        assert!(!lower.contains("content-type: application/json"));
        assert!(request.contains(r#"name="file"; filename="prices.csv""#));
        assert!(request.contains("2024-01-02,10.5"));
    }

    #[tokio::test]
    async fn test_error_status_logged_once_and_returned() {
        let (base_url, server) = serve_once("503 Service Unavailable", r#"{"error":"down"}"#).await;
        let counter = Arc::new(CountingInterceptor::default());
        let client = MarketClient::new(ClientConfig::new(base_url))
            .unwrap()
            .with_interceptor(Arc::clone(&counter));

        let err = client.get_chart_data("us").await.unwrap_err();
        assert_eq!(err, ApiError::status(503, r#"{"error":"down"}"#));
        assert_eq!(counter.requests.load(Ordering::SeqCst), 1);
        assert_eq!(counter.errors.load(Ordering::SeqCst), 1);

        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_timeout_surfaces_as_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            // Hold the connection open without answering
            tokio::time::sleep(Duration::from_secs(2)).await;
            drop(socket);
        });

        let config = ClientConfig::new(format!("http://{}", addr)).with_timeout(Duration::from_millis(200));
        let client = MarketClient::new(config).unwrap();

        let err = client.get_chart_data("hk").await.unwrap_err();
        assert!(err.is_timeout(), "expected timeout, got {:?}", err);

        server.abort();
    }

    #[tokio::test]
    async fn test_empty_base_url_cannot_leave_the_process() {
        let counter = Arc::new(CountingInterceptor::default());
        let client = MarketClient::new(ClientConfig::default())
            .unwrap()
            .with_interceptor(Arc::clone(&counter));

        let err = client.get_chart_data("cn").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
        // Never reached the request hook, but the failure is still reported
        assert_eq!(counter.requests.load(Ordering::SeqCst), 0);
        assert_eq!(counter.errors.load(Ordering::SeqCst), 1);
    }
}
