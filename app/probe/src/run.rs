use std::fmt::Write;

use framework::json;
use tracing::debug;
use tracing::warn;

use crate::probe::Probe;
use crate::provider;

#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    pub name: &'static str,
    pub passed: bool,
}

// returns None when the service is unreachable, nothing else is attempted in that case
pub async fn run(probe: &Probe) -> Option<Vec<TestResult>> {
    println!("🚀 OpenMemory Provider Configuration Test");
    println!("{}", "=".repeat(50));

    if !probe.check_connection().await {
        println!("\n❌ Cannot proceed without API connection");
        return None;
    }

    println!("\n📋 Current Configuration:");
    if let Some(config) = probe.get_current_config().await {
        match json::to_json_pretty(&config) {
            Ok(config) => println!("{config}"),
            Err(err) => warn!("failed to print config, error={err:#}"),
        }
    }

    println!("\n📋 Supported Providers:");
    if let Some(providers) = probe.get_supported_providers().await {
        println!("LLM Providers: {}", providers.llm_providers.len());
        println!("Embedder Providers: {}", providers.embedder_providers.len());
    }

    println!("\n🧪 Testing LLM Configurations");
    println!("{}", "-".repeat(30));
    let mut results = vec![];
    for provider in provider::llm_providers() {
        debug!("test llm provider, name={}", provider.name);
        let passed = probe
            .test_provider_config(provider.provider, &provider.config, provider.config_type)
            .await;
        results.push(TestResult {
            name: provider.name,
            passed,
        });
    }

    println!("\n🧪 Testing Embedder Configurations");
    for provider in provider::embedder_providers() {
        debug!("test embedder provider, name={}", provider.name);
        probe
            .test_provider_config(provider.provider, &provider.config, provider.config_type)
            .await;
    }

    print!("{}", summary(&results));

    println!("\n🔄 Resetting to default configuration...");
    probe.reset_to_default().await;

    println!("\n✨ Test completed!");
    Some(results)
}

pub fn summary(results: &[TestResult]) -> String {
    let mut summary = String::new();
    summary.push_str("\n📊 Test Summary\n");
    summary.push_str(&"=".repeat(50));
    summary.push_str("\n\nLLM Provider Results:\n");
    for result in results {
        let status = if result.passed { "✅ PASS" } else { "❌ FAIL" };
        let _ = writeln!(summary, "  {}: {status}", result.name);
    }
    summary
}
