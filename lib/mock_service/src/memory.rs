use axum::Json;
use axum::Router;
use axum::debug_handler;
use axum::extract::Query;
use axum::extract::State;
use axum::routing::get;
use chrono::DateTime;
use chrono::Utc;
use framework::web::error::HttpError;
use framework::web::error::HttpResult;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::Endpoint;
use crate::MockState;

pub fn routes() -> Router<MockState> {
    Router::new().route("/api/v1/memories/", get(search_memories).post(create_memory))
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Memory {
    pub id: Uuid,
    pub user_id: String,
    pub content: String,
    pub metadata: Value,
    pub app: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
struct CreateMemoryRequest {
    user_id: String,
    text: String,
    #[serde(default)]
    metadata: Value,
    #[serde(default = "default_app")]
    app: String,
}

fn default_app() -> String {
    "openmemory".to_string()
}

#[derive(Deserialize, Debug)]
struct SearchParams {
    user_id: Option<String>,
    search_query: Option<String>,
}

#[derive(Serialize, Debug)]
struct MemoryPage {
    items: Vec<Memory>,
    total: usize,
}

#[debug_handler]
async fn create_memory(State(state): State<MockState>, Json(request): Json<CreateMemoryRequest>) -> HttpResult<Json<Memory>> {
    let mut store = state.enter(Endpoint::CreateMemory)?;
    if request.text.trim().is_empty() {
        return Err(HttpError::BadRequest("text must not be empty".to_string()));
    }

    let memory = Memory {
        id: Uuid::now_v7(),
        user_id: request.user_id,
        content: request.text,
        metadata: request.metadata,
        app: request.app,
        created_at: Utc::now(),
    };
    info!("create memory, id={}, user_id={}, app={}", memory.id, memory.user_id, memory.app);
    store.memories.push(memory.clone());
    Ok(Json(memory))
}

#[debug_handler]
async fn search_memories(State(state): State<MockState>, Query(params): Query<SearchParams>) -> HttpResult<Json<MemoryPage>> {
    let store = state.enter(Endpoint::SearchMemories)?;
    let user_id = params
        .user_id
        .ok_or_else(|| HttpError::BadRequest("user_id is required".to_string()))?;
    let query = params.search_query.map(|query| query.to_lowercase());

    let items: Vec<Memory> = store
        .memories
        .iter()
        .filter(|memory| memory.user_id == user_id)
        .filter(|memory| {
            query
                .as_ref()
                .is_none_or(|query| memory.content.to_lowercase().contains(query.as_str()))
        })
        .cloned()
        .collect();
    Ok(Json(MemoryPage {
        total: items.len(),
        items,
    }))
}
