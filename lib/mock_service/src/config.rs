use anyhow::Context;
use anyhow::Result;
use axum::Json;
use axum::Router;
use axum::debug_handler;
use axum::extract::State;
use axum::routing::get;
use axum::routing::post;
use framework::web::error::HttpError;
use framework::web::error::HttpResult;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use tracing::info;

use crate::Endpoint;
use crate::MockState;

pub const LLM_PROVIDERS: &[&str] = &[
    "openai",
    "ollama",
    "anthropic",
    "together",
    "groq",
    "litellm",
    "mistralai",
    "google_ai",
    "aws_bedrock",
    "gemini",
    "deepseek",
    "xai",
    "lmstudio",
];

pub const EMBEDDER_PROVIDERS: &[&str] = &[
    "openai",
    "ollama",
    "huggingface",
    "azure_openai",
    "gemini",
    "vertexai",
    "together",
    "lmstudio",
];

pub fn default_config() -> Value {
    json!({
        "mem0": {
            "llm": {
                "provider": "openai",
                "config": {
                    "model": "gpt-4o-mini",
                    "temperature": 0.1,
                    "max_tokens": 2000,
                    "api_key": "env:OPENAI_API_KEY"
                }
            },
            "embedder": {
                "provider": "openai",
                "config": {
                    "model": "text-embedding-3-small",
                    "api_key": "env:OPENAI_API_KEY"
                }
            }
        }
    })
}

pub fn routes() -> Router<MockState> {
    Router::new()
        .route("/api/v1/config/", get(get_config).put(update_config))
        .route("/api/v1/config/providers", get(get_providers))
        .route("/api/v1/config/reset", post(reset_config))
}

#[derive(Deserialize, Debug)]
struct ConfigUpdate {
    mem0: Option<Mem0Update>,
}

#[derive(Deserialize, Debug)]
struct Mem0Update {
    llm: Option<ProviderSetting>,
    embedder: Option<ProviderSetting>,
}

#[derive(Serialize, Deserialize, Debug)]
struct ProviderSetting {
    provider: String,
    #[serde(default)]
    config: Map<String, Value>,
}

#[debug_handler]
async fn get_config(State(state): State<MockState>) -> HttpResult<Json<Value>> {
    let store = state.enter(Endpoint::GetConfig)?;
    Ok(Json(store.config.clone()))
}

#[debug_handler]
async fn update_config(State(state): State<MockState>, Json(update): Json<ConfigUpdate>) -> HttpResult<Json<Value>> {
    let mut store = state.enter(Endpoint::UpdateConfig)?;

    let settings = match update.mem0 {
        Some(mem0) => [("llm", LLM_PROVIDERS, mem0.llm), ("embedder", EMBEDDER_PROVIDERS, mem0.embedder)],
        None => return Ok(Json(store.config.clone())),
    };

    // validate every role before touching the config so a bad update changes nothing
    for (role, supported, setting) in settings.iter() {
        if let Some(setting) = setting {
            if !supported.contains(&setting.provider.as_str()) {
                return Err(HttpError::BadRequest(format!(
                    "unsupported provider, role={role}, provider={}",
                    setting.provider
                )));
            }
        }
    }

    for (role, _, setting) in settings {
        if let Some(setting) = setting {
            info!("update config, role={role}, provider={}", setting.provider);
            apply(&mut store.config, role, setting)?;
        }
    }
    Ok(Json(store.config.clone()))
}

fn apply(config: &mut Value, role: &str, setting: ProviderSetting) -> Result<()> {
    let mem0 = config
        .as_object_mut()
        .context("config must be object")?
        .entry("mem0")
        .or_insert_with(|| json!({}))
        .as_object_mut()
        .context("mem0 config must be object")?;
    mem0.insert(role.to_string(), serde_json::to_value(setting)?);
    Ok(())
}

#[debug_handler]
async fn get_providers(State(state): State<MockState>) -> HttpResult<Json<Value>> {
    state.enter(Endpoint::GetProviders)?;
    Ok(Json(json!({
        "llm_providers": LLM_PROVIDERS,
        "embedder_providers": EMBEDDER_PROVIDERS
    })))
}

#[debug_handler]
async fn reset_config(State(state): State<MockState>) -> HttpResult<Json<Value>> {
    let mut store = state.enter(Endpoint::ResetConfig)?;
    info!("reset config");
    store.config = store.default_config.clone();
    Ok(Json(store.config.clone()))
}
