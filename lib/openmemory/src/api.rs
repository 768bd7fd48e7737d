use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
    Llm,
    Embedder,
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigType::Llm => write!(f, "llm"),
            ConfigType::Embedder => write!(f, "embedder"),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProviderSetting {
    pub provider: String,
    pub config: Value,
}

// body of PUT /api/v1/config/, only the roles present are changed
#[derive(Serialize, Debug)]
pub struct ConfigUpdate {
    pub mem0: BTreeMap<ConfigType, ProviderSetting>,
}

impl ConfigUpdate {
    pub fn new(config_type: ConfigType, setting: ProviderSetting) -> Self {
        ConfigUpdate {
            mem0: BTreeMap::from([(config_type, setting)]),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CreateMemoryRequest {
    pub user_id: String,
    pub text: String,
    pub metadata: Value,
    pub app: String,
}

// entries are opaque to the caller, only counted
#[derive(Deserialize, Debug, Default)]
pub struct SupportedProviders {
    #[serde(default)]
    pub llm_providers: Vec<Value>,
    #[serde(default)]
    pub embedder_providers: Vec<Value>,
}
