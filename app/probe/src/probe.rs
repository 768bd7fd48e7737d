use std::time::Duration;

use anyhow::Result;
use openmemory::api::ConfigType;
use openmemory::api::ConfigUpdate;
use openmemory::api::CreateMemoryRequest;
use openmemory::api::ProviderSetting;
use openmemory::api::SupportedProviders;
use openmemory::client::ApiResponse;
use openmemory::client::OpenMemoryClient;
use openmemory::client::is_connect_error;
use serde::de;
use serde_json::Value;
use serde_json::json;
use tokio::time;
use tracing::debug;

pub const TEST_USER_ID: &str = "test_user";
const TEST_MEMORY_TEXT: &str = "This is a test memory for provider configuration testing.";
const TEST_APP: &str = "test_app";
const SEARCH_QUERY: &str = "test memory";

/// Every step prints its own diagnostics and returns a plain sentinel, failures never propagate.
pub struct Probe {
    client: OpenMemoryClient,
    settle_delay: Duration,
}

impl Probe {
    pub fn new(client: OpenMemoryClient, settle_delay: Duration) -> Self {
        Probe { client, settle_delay }
    }

    pub async fn check_connection(&self) -> bool {
        match self.client.get_config().await {
            Ok(response) if response.is_ok() => {
                println!("✅ API connection successful");
                true
            }
            Ok(response) => {
                println!("❌ API connection failed: {}", response.status.as_u16());
                false
            }
            Err(err) if is_connect_error(&err) => {
                debug!("connect failed, url={}, error={err:#}", self.client.url());
                println!("❌ API connection failed: Could not connect to server");
                false
            }
            Err(err) => {
                println!("❌ API connection failed: {err:#}");
                false
            }
        }
    }

    pub async fn get_current_config(&self) -> Option<Value> {
        read_json(self.client.get_config().await, "current config")
    }

    pub async fn get_supported_providers(&self) -> Option<SupportedProviders> {
        read_json(self.client.get_providers().await, "supported providers")
    }

    pub async fn test_provider_config(&self, provider: &str, config: &Value, config_type: ConfigType) -> bool {
        println!("\n🧪 Testing {config_type} provider: {provider}");

        let update = ConfigUpdate::new(
            config_type,
            ProviderSetting {
                provider: provider.to_string(),
                config: config.clone(),
            },
        );
        let response = match self.client.update_config(&update).await {
            Ok(response) => response,
            Err(err) => {
                println!("❌ Error testing {provider} {config_type}: {err:#}");
                return false;
            }
        };

        if !response.is_ok() {
            println!("❌ Failed to update {config_type} configuration: {}", response.status.as_u16());
            println!("Response: {}", response.body);
            return false;
        }
        println!("✅ {config_type} configuration updated successfully");

        // the service picks up new config asynchronously, there is no readiness signal to wait on
        time::sleep(self.settle_delay).await;

        if self.test_memory_operations().await {
            println!("✅ {provider} {config_type} working correctly");
            true
        } else {
            println!("❌ {provider} {config_type} memory operations failed");
            false
        }
    }

    pub async fn test_memory_operations(&self) -> bool {
        match self.memory_round_trip().await {
            Ok(passed) => passed,
            Err(err) => {
                println!("❌ Error testing memory operations: {err:#}");
                false
            }
        }
    }

    async fn memory_round_trip(&self) -> Result<bool> {
        let request = CreateMemoryRequest {
            user_id: TEST_USER_ID.to_string(),
            text: TEST_MEMORY_TEXT.to_string(),
            metadata: json!({"test": true}),
            app: TEST_APP.to_string(),
        };
        let response = self.client.create_memory(&request).await?;
        if !response.is_ok() {
            println!("❌ Memory creation failed: {}", response.status.as_u16());
            println!("Response: {}", response.body);
            return Ok(false);
        }
        println!("✅ Memory creation successful");

        let response = self.client.search_memories(TEST_USER_ID, SEARCH_QUERY).await?;
        if !response.is_ok() {
            println!("❌ Memory search failed: {}", response.status.as_u16());
            return Ok(false);
        }
        println!("✅ Memory search successful");
        Ok(true)
    }

    pub async fn reset_to_default(&self) -> bool {
        match self.client.reset_config().await {
            Ok(response) if response.is_ok() => {
                println!("✅ Configuration reset to default");
                true
            }
            Ok(response) => {
                println!("❌ Failed to reset configuration: {}", response.status.as_u16());
                false
            }
            Err(err) => {
                println!("❌ Error resetting configuration: {err:#}");
                false
            }
        }
    }
}

fn read_json<T>(result: Result<ApiResponse>, subject: &str) -> Option<T>
where
    T: de::DeserializeOwned,
{
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            println!("❌ Error getting {subject}: {err:#}");
            return None;
        }
    };
    if !response.is_ok() {
        println!("❌ Failed to get {subject}: {}", response.status.as_u16());
        return None;
    }
    match response.json() {
        Ok(value) => Some(value),
        Err(err) => {
            println!("❌ Error getting {subject}: {err:#}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use mock_service::Endpoint;
    use mock_service::MockState;
    use openmemory::StatusCode;
    use tokio::net::TcpListener;

    use super::*;
    use crate::provider;

    async fn probe(state: &MockState, settle_delay: Duration) -> Probe {
        let url = mock_service::serve_local(state.clone()).await.unwrap();
        Probe::new(OpenMemoryClient::new(&url), settle_delay)
    }

    async fn closed_port_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{address}")
    }

    #[tokio::test]
    async fn every_provider_passes_against_healthy_service() {
        let state = MockState::default();
        let probe = probe(&state, Duration::ZERO).await;

        for provider in provider::llm_providers().into_iter().chain(provider::embedder_providers()) {
            let passed = probe
                .test_provider_config(provider.provider, &provider.config, provider.config_type)
                .await;
            assert!(passed, "{} {}", provider.name, provider.config_type);
        }
        assert_eq!(state.memories().len(), 7);
        assert_eq!(state.config()["mem0"]["embedder"]["provider"], "ollama");
        assert_eq!(state.config()["mem0"]["llm"]["provider"], "groq");
    }

    #[tokio::test]
    async fn rejected_update_skips_memory_operations() {
        let state = MockState::default();
        state.fail(Endpoint::UpdateConfig, StatusCode::UNPROCESSABLE_ENTITY);
        let probe = probe(&state, Duration::ZERO).await;

        let provider = provider::openai_llm();
        let passed = probe
            .test_provider_config(provider.provider, &provider.config, provider.config_type)
            .await;
        assert!(!passed);
        assert_eq!(state.requests(), vec![Endpoint::UpdateConfig]);
    }

    #[tokio::test]
    async fn failed_memory_creation_fails_provider() {
        let state = MockState::default();
        state.fail(Endpoint::CreateMemory, StatusCode::INTERNAL_SERVER_ERROR);
        let probe = probe(&state, Duration::ZERO).await;

        assert!(!probe.test_memory_operations().await);

        let provider = provider::anthropic_llm();
        let passed = probe
            .test_provider_config(provider.provider, &provider.config, provider.config_type)
            .await;
        assert!(!passed);
        assert!(!state.requests().contains(&Endpoint::SearchMemories));
    }

    #[tokio::test]
    async fn failed_search_fails_memory_operations() {
        let state = MockState::default();
        state.fail(Endpoint::SearchMemories, StatusCode::BAD_GATEWAY);
        let probe = probe(&state, Duration::ZERO).await;

        assert!(!probe.test_memory_operations().await);
        assert_eq!(state.requests(), vec![Endpoint::CreateMemory, Endpoint::SearchMemories]);
    }

    #[tokio::test]
    async fn waits_settle_delay_after_update() {
        let state = MockState::default();
        let probe = probe(&state, Duration::from_millis(200)).await;

        let provider = provider::ollama_llm();
        let start = Instant::now();
        assert!(
            probe
                .test_provider_config(provider.provider, &provider.config, provider.config_type)
                .await
        );
        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test]
    async fn transport_errors_become_sentinels() {
        let probe = Probe::new(OpenMemoryClient::new(&closed_port_url().await), Duration::ZERO);

        assert!(!probe.check_connection().await);
        assert!(probe.get_current_config().await.is_none());
        assert!(probe.get_supported_providers().await.is_none());
        assert!(!probe.test_memory_operations().await);
        let provider = provider::groq_llm();
        assert!(
            !probe
                .test_provider_config(provider.provider, &provider.config, provider.config_type)
                .await
        );
        assert!(!probe.reset_to_default().await);
    }

    #[tokio::test]
    async fn reset_follows_reset_endpoint_status() {
        let state = MockState::default();
        let probe = probe(&state, Duration::ZERO).await;
        assert!(probe.reset_to_default().await);

        state.fail(Endpoint::ResetConfig, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!probe.reset_to_default().await);
    }

    #[tokio::test]
    async fn config_accessors_parse_bodies() {
        let state = MockState::default();
        state.set_config(json!({"mem0": {}}));
        let probe = probe(&state, Duration::ZERO).await;

        assert_eq!(probe.get_current_config().await, Some(json!({"mem0": {}})));
        let providers = probe.get_supported_providers().await.unwrap();
        assert!(!providers.llm_providers.is_empty());

        state.fail(Endpoint::GetProviders, StatusCode::NOT_FOUND);
        assert!(probe.get_supported_providers().await.is_none());
    }
}
