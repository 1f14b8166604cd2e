//! Exercise the built-in tool pipeline.
//!
//! Run with: cargo run -p pipeline-tools --example tool_demo
//!
//! Home Assistant and ipinfo.io credentials are read from the environment
//! (or a local .env): HOME_ASSISTANT_URL, HOME_ASSISTANT_TOKEN, IPINFO_TOKEN.

use pipeline_core::{Pipeline, ToolArgs};
use pipeline_tools::ToolsPipeline;
use serde_json::{json, Map, Value};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pipeline_tools=debug".parse().unwrap())
                .add_directive("pipeline_core=debug".parse().unwrap()),
        )
        .init();

    let mut overrides = Map::new();
    for (env, valve) in [
        ("HOME_ASSISTANT_URL", "home_assistant_url"),
        ("HOME_ASSISTANT_TOKEN", "home_assistant_token"),
        ("IPINFO_TOKEN", "ipinfo_token"),
    ] {
        if let Ok(value) = std::env::var(env) {
            overrides.insert(valve.to_string(), Value::String(value));
        }
    }

    let pipeline = ToolsPipeline::with_overrides(&overrides)?;

    println!("=== {} ===\n", pipeline.name());
    println!("Registered tools:");
    for (name, description) in pipeline.registry().descriptions() {
        println!("  - {}: {}", name, description);
    }
    println!();

    println!("Function schemas:");
    for schema in pipeline.registry().function_schemas() {
        println!("{}", serde_json::to_string_pretty(&schema)?);
    }
    println!();

    // Local tools always work
    run(&pipeline, "get_current_time", json!({})).await;
    run(&pipeline, "calculator", json!({"expression": "2 + 2 * 3"})).await;
    run(&pipeline, "calculator", json!({"expression": "2^10 / (4 - 2)"})).await;
    run(&pipeline, "calculator", json!({"expression": "2 +"})).await;

    // Network tools; lights also need the Home Assistant valves
    run(&pipeline, "get_location", json!({})).await;
    run(&pipeline, "list_lights", json!({})).await;

    Ok(())
}

async fn run(pipeline: &ToolsPipeline, name: &str, args: Value) {
    let args = ToolArgs::new(args.as_object().cloned().unwrap_or_default());
    let result = pipeline.dispatch(name, args).await;
    let status = if result.is_success() { "ok" } else { "failed" };
    println!("[{}] {} => {}", status, name, result.render());
}
