use async_trait::async_trait;
use gloo::net::http::Request;
use serde_json::Value;
use shared::{DashboardConfig, HttpGet, RequestError, UsageClient};

/// `HttpGet` over the browser's fetch API
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlooHttp;

#[async_trait(?Send)]
impl HttpGet for GlooHttp {
    async fn get_json(&self, url: &str) -> Result<Value, RequestError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| RequestError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.ok() {
            return Err(RequestError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        response.json::<Value>().await.map_err(|e| RequestError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// API client for the usage backend
pub type ApiClient = UsageClient<GlooHttp>;

/// Create a client pointed at the configured API origin
pub fn api_client(config: &DashboardConfig) -> ApiClient {
    UsageClient::new(GlooHttp, config.api_base_url.clone())
}
