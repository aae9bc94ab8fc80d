use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSON document holding every medicine record.
    pub data_file: PathBuf,
    /// Static frontend mounted under `/frontend`.
    pub frontend_dir: PathBuf,
    /// Write the starter catalog when `data_file` does not exist yet.
    pub seed_if_missing: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            data_file: std::env::var("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| crate_dir.join("data.json")),
            frontend_dir: std::env::var("FRONTEND_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| crate_dir.join("..").join("frontend")),
            seed_if_missing: std::env::var("SEED_IF_MISSING")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
