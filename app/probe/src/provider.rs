use openmemory::api::ConfigType;
use serde_json::Value;
use serde_json::json;

// credentials are "env:NAME" references resolved by the service, never locally
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub name: &'static str,
    pub provider: &'static str,
    pub config_type: ConfigType,
    pub config: Value,
}

pub fn llm_providers() -> Vec<ProviderConfig> {
    vec![openai_llm(), ollama_llm(), anthropic_llm(), together_llm(), groq_llm()]
}

pub fn embedder_providers() -> Vec<ProviderConfig> {
    vec![openai_embedder(), ollama_embedder()]
}

pub fn openai_llm() -> ProviderConfig {
    ProviderConfig {
        name: "OpenAI",
        provider: "openai",
        config_type: ConfigType::Llm,
        config: json!({
            "model": "gpt-4o-mini",
            "temperature": 0.1,
            "max_tokens": 2000,
            "api_key": "env:OPENAI_API_KEY",
            "base_url": "https://api.openai.com/v1"
        }),
    }
}

pub fn ollama_llm() -> ProviderConfig {
    ProviderConfig {
        name: "Ollama",
        provider: "ollama",
        config_type: ConfigType::Llm,
        config: json!({
            "model": "llama3.1:latest",
            "temperature": 0.1,
            "max_tokens": 2000,
            "ollama_base_url": "http://host.docker.internal:11434"
        }),
    }
}

pub fn anthropic_llm() -> ProviderConfig {
    ProviderConfig {
        name: "Anthropic",
        provider: "anthropic",
        config_type: ConfigType::Llm,
        config: json!({
            "model": "claude-3-5-sonnet-20241022",
            "temperature": 0.1,
            "max_tokens": 2000,
            "anthropic_api_key": "env:ANTHROPIC_API_KEY"
        }),
    }
}

pub fn together_llm() -> ProviderConfig {
    ProviderConfig {
        name: "Together AI",
        provider: "together",
        config_type: ConfigType::Llm,
        config: json!({
            "model": "meta-llama/Llama-3.1-8B-Instruct-Turbo",
            "temperature": 0.1,
            "max_tokens": 2000,
            "together_api_key": "env:TOGETHER_API_KEY",
            "base_url": "https://api.together.xyz/v1"
        }),
    }
}

pub fn groq_llm() -> ProviderConfig {
    ProviderConfig {
        name: "Groq",
        provider: "groq",
        config_type: ConfigType::Llm,
        config: json!({
            "model": "llama-3.1-8b-instant",
            "temperature": 0.1,
            "max_tokens": 2000,
            "groq_api_key": "env:GROQ_API_KEY",
            "base_url": "https://api.groq.com/openai/v1"
        }),
    }
}

pub fn openai_embedder() -> ProviderConfig {
    ProviderConfig {
        name: "OpenAI",
        provider: "openai",
        config_type: ConfigType::Embedder,
        config: json!({
            "model": "text-embedding-3-small",
            "api_key": "env:OPENAI_API_KEY",
            "base_url": "https://api.openai.com/v1"
        }),
    }
}

pub fn ollama_embedder() -> ProviderConfig {
    ProviderConfig {
        name: "Ollama",
        provider: "ollama",
        config_type: ConfigType::Embedder,
        config: json!({
            "model": "nomic-embed-text:latest",
            "ollama_base_url": "http://host.docker.internal:11434"
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn llm_providers_keep_run_order() {
        let names: Vec<&str> = llm_providers().iter().map(|provider| provider.name).collect();
        assert_eq!(names, vec!["OpenAI", "Ollama", "Anthropic", "Together AI", "Groq"]);
        assert!(llm_providers().iter().all(|provider| provider.config_type == ConfigType::Llm));
    }

    #[test]
    fn llm_sampling_parameters_are_numbers() {
        for provider in llm_providers() {
            assert_eq!(provider.config["temperature"].as_f64(), Some(0.1), "{}", provider.name);
            assert_eq!(provider.config["max_tokens"].as_u64(), Some(2000), "{}", provider.name);
        }
    }

    #[test]
    fn embedders_carry_no_sampling_parameters() {
        for provider in embedder_providers() {
            assert_eq!(provider.config_type, ConfigType::Embedder);
            assert!(provider.config.get("temperature").is_none());
            assert!(provider.config.get("max_tokens").is_none());
        }
        assert_eq!(ollama_embedder().config["model"], "nomic-embed-text:latest");
    }

    #[test]
    fn credentials_stay_env_references() {
        assert_eq!(anthropic_llm().config["anthropic_api_key"], "env:ANTHROPIC_API_KEY");
        assert_eq!(together_llm().config["together_api_key"], "env:TOGETHER_API_KEY");
        assert_eq!(groq_llm().config["groq_api_key"], "env:GROQ_API_KEY");
        assert_eq!(openai_embedder().config["api_key"], "env:OPENAI_API_KEY");
    }
}
