pub mod api;
pub mod client;

pub use reqwest::StatusCode;

pub const DEFAULT_URL: &str = "http://localhost:8765";

const CONFIG_PATH: &str = "/api/v1/config/";
const PROVIDERS_PATH: &str = "/api/v1/config/providers";
const RESET_PATH: &str = "/api/v1/config/reset";
const MEMORIES_PATH: &str = "/api/v1/memories/";
