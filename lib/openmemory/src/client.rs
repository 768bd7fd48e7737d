use anyhow::Context;
use anyhow::Result;
use framework::http_client::HTTP_CLIENT;
use framework::json;
use reqwest::RequestBuilder;
use reqwest::StatusCode;
use reqwest::Url;
use serde::de;
use tracing::debug;

use crate::CONFIG_PATH;
use crate::MEMORIES_PATH;
use crate::PROVIDERS_PATH;
use crate::RESET_PATH;
use crate::api::ConfigUpdate;
use crate::api::CreateMemoryRequest;

// status and body are kept raw, callers decide what counts as success
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    pub fn json<T>(&self) -> Result<T>
    where
        T: de::DeserializeOwned,
    {
        json::from_json(&self.body)
    }
}

#[derive(Debug, Clone)]
pub struct OpenMemoryClient {
    url: String,
}

impl OpenMemoryClient {
    pub fn new(url: &str) -> Self {
        OpenMemoryClient {
            url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn get_config(&self) -> Result<ApiResponse> {
        send(HTTP_CLIENT.get(self.endpoint(CONFIG_PATH))).await
    }

    pub async fn update_config(&self, update: &ConfigUpdate) -> Result<ApiResponse> {
        let body = json::to_json(update)?;
        let request = HTTP_CLIENT
            .put(self.endpoint(CONFIG_PATH))
            .header("Content-Type", "application/json")
            .body(body);
        send(request).await
    }

    pub async fn get_providers(&self) -> Result<ApiResponse> {
        send(HTTP_CLIENT.get(self.endpoint(PROVIDERS_PATH))).await
    }

    pub async fn reset_config(&self) -> Result<ApiResponse> {
        send(HTTP_CLIENT.post(self.endpoint(RESET_PATH))).await
    }

    pub async fn create_memory(&self, request: &CreateMemoryRequest) -> Result<ApiResponse> {
        let body = json::to_json(request)?;
        let request = HTTP_CLIENT
            .post(self.endpoint(MEMORIES_PATH))
            .header("Content-Type", "application/json")
            .body(body);
        send(request).await
    }

    pub async fn search_memories(&self, user_id: &str, search_query: &str) -> Result<ApiResponse> {
        let url = self.search_url(user_id, search_query)?;
        send(HTTP_CLIENT.get(url)).await
    }

    fn search_url(&self, user_id: &str, search_query: &str) -> Result<Url> {
        let endpoint = self.endpoint(MEMORIES_PATH);
        Url::parse_with_params(&endpoint, &[("user_id", user_id), ("search_query", search_query)])
            .with_context(|| format!("invalid url, url={endpoint}"))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.url)
    }
}

async fn send(request: RequestBuilder) -> Result<ApiResponse> {
    let request = request.build()?;
    let method = request.method().clone();
    let url = request.url().clone();
    debug!("call api, method={method}, url={url}");

    let response = HTTP_CLIENT
        .execute(request)
        .await
        .with_context(|| format!("failed to call api, method={method}, url={url}"))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .with_context(|| format!("failed to read response, method={method}, url={url}"))?;
    debug!("api response, method={method}, url={url}, status={status}");

    Ok(ApiResponse { status, body })
}

pub fn is_connect_error(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<reqwest::Error>()
        .is_some_and(|error| error.is_connect())
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;

    #[test]
    fn endpoint_ignores_trailing_slash_of_base_url() {
        let client = OpenMemoryClient::new("http://localhost:8765/");
        assert_eq!(client.endpoint(CONFIG_PATH), "http://localhost:8765/api/v1/config/");
        assert_eq!(client.endpoint(RESET_PATH), "http://localhost:8765/api/v1/config/reset");
    }

    #[test]
    fn search_url_encodes_query() {
        let client = OpenMemoryClient::new("http://localhost:8765");
        let url = client.search_url("test_user", "test memory").unwrap();
        assert_eq!(url.path(), "/api/v1/memories/");
        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            params,
            vec![
                ("user_id".to_string(), "test_user".to_string()),
                ("search_query".to_string(), "test memory".to_string())
            ]
        );
    }

    #[test]
    fn api_response_success_is_exactly_200() {
        let response = ApiResponse {
            status: StatusCode::CREATED,
            body: String::new(),
        };
        assert!(!response.is_ok());
    }

    #[tokio::test]
    async fn refused_connection_is_connect_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = OpenMemoryClient::new(&format!("http://127.0.0.1:{port}"));

        let error = client.get_config().await.unwrap_err();
        assert!(is_connect_error(&error));
        assert!(error.to_string().contains("failed to call api"));
    }
}
