//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use tally_server::{parse_endpoints, ServerConfig};

pub async fn cmd_serve(
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
    no_latency: bool,
    fail: Option<&str>,
) -> Result<()> {
    let mut config = ServerConfig::from_env();
    if no_latency {
        config.latency_scale = 0.0;
    }
    if let Some(fail) = fail {
        config.failing.extend(parse_endpoints(fail));
    }

    println!("🚀 Starting Tally mock API...");
    println!("   Listening: http://{}:{}", host, port);
    println!(
        "   Customer routes: http://{}:{}/api/customers/{}/...",
        host,
        port,
        tally_core::CUSTOMER_ID
    );
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if config.latency_scale == 0.0 {
        println!("   ⚡ Latency: disabled");
    } else {
        println!("   🐢 Latency: x{}", config.latency_scale);
    }
    if !config.allowed_origins.is_empty() {
        println!(
            "   🌐 CORS origins: {} (TALLY_ALLOWED_ORIGINS)",
            config.allowed_origins.join(", ")
        );
    }
    if !config.failing.is_empty() {
        let mut names: Vec<&str> = config.failing.iter().map(|e| e.as_str()).collect();
        names.sort_unstable();
        println!("   ⚠️  Failing endpoints: {}", names.join(", "));
    }
    println!();

    let static_dir = static_dir.and_then(|p| p.to_str());
    tally_server::serve_with_config(host, port, static_dir, config)
        .await
        .context("Server failed")
}
