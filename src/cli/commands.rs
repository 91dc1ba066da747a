//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use crate::api::{ApiServer, DefaultPiecesApi};
use crate::config::{EndpointConfig, ServerConfig};
use crate::observability::Logger;
use crate::pieces::PieceStore;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Dispatch a parsed command.
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
    }
}

/// Write a starter configuration with one example collection.
pub fn init(path: &Path) -> CliResult<()> {
    if path.exists() {
        return Err(CliError::ConfigExists(path.display().to_string()));
    }
    let config = ServerConfig {
        collections: vec![EndpointConfig::new("articles").with_safe_filters(&["topic"])],
        ..ServerConfig::default()
    };
    let raw = serde_json::to_string_pretty(&config).map_err(|e| CliError::Other(e.to_string()))?;
    std::fs::write(path, raw)?;
    Logger::info("CONFIG_WRITTEN", &[("path", path.display().to_string().as_str())]);
    Ok(())
}

/// Load configuration, wire up every enabled collection, and serve.
pub fn start(path: &Path) -> CliResult<()> {
    let config = ServerConfig::load(path)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(config))?;
    Ok(())
}

async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let mut server = ApiServer::new(config.clone());
    for endpoint in &config.collections {
        if !endpoint.enabled {
            Logger::warn(
                "COLLECTION_DISABLED",
                &[("collection", endpoint.collection.as_str())],
            );
            continue;
        }
        let store = Arc::new(PieceStore::new(endpoint.collection.clone()));
        let api = Arc::new(DefaultPiecesApi::with_defaults(
            endpoint.clone(),
            store,
            &config.base,
        ));
        Logger::info(
            "COLLECTION_MOUNTED",
            &[
                ("collection", endpoint.collection.as_str()),
                ("route", api.route_name()),
            ],
        );
        server = server.register(&api);
    }
    server.start().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = std::env::temp_dir().join(format!("piecebox-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("piecebox.json");

        init(&path).unwrap();
        assert!(path.exists());
        assert!(matches!(init(&path), Err(CliError::ConfigExists(_))));

        // The written file loads back as valid configuration.
        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.collections.len(), 1);
        assert_eq!(config.collections[0].collection, "articles");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
