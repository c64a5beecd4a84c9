//! Info command - show version and effective settings

use anyhow::Result;

use crate::config::{self, Config, ENDPOINT_ENV, SITE_URL_ENV};

pub fn run(config: &Config) -> Result<()> {
    println!("capstone-search v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("System Information:");
    println!("  OS: {} {}", std::env::consts::OS, std::env::consts::ARCH);
    println!("  Live view: {}", if cfg!(feature = "tui") { "enabled" } else { "disabled (build with --features tui)" });

    println!();
    println!("Configuration:");
    println!("  Config file: {}", config_file());
    println!("  Endpoint: {}", config.search.endpoint);
    println!("  Site: {}", config.site.url);
    println!("  Debounce: {}ms", config.search.debounce_ms);
    println!("  Timeout: {}s", config.search.timeout_secs);

    println!();
    println!("Environment:");
    check_override(ENDPOINT_ENV);
    check_override(SITE_URL_ENV);

    Ok(())
}

fn config_file() -> String {
    config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}

fn check_override(env_var: &str) {
    let status = if std::env::var(env_var).is_ok() {
        "set"
    } else {
        "not set"
    };
    println!("  {}: {}", env_var, status);
}
