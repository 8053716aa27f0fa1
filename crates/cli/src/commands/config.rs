//! Config command - view configuration.

use anyhow::Result;
use lobby_core::{platform, Config};

pub fn execute(key: Option<String>) -> Result<()> {
    let config = Config::load_with_env()?;

    match key.as_deref() {
        None => {
            println!("Current Configuration");
            println!("=====================");
            println!("{}", serde_json::to_string_pretty(&config)?);
            println!();

            let config_file = platform::config_file_path();
            if config_file.exists() {
                println!("Config file: {:?}", config_file);
            } else {
                println!("Config file: Not found (using defaults)");
            }
        }
        Some("min_identity_len") => println!("{}", config.min_identity_len),
        Some("max_body_length") => println!("{}", config.max_body_length),
        Some(key) => println!("Unknown config key: {}", key),
    }

    Ok(())
}
