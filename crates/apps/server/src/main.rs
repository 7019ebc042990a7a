use std::path::Path;

use catalog::{CatalogError, InMemoryArchive};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;

use api::AppState;
use config::ServerConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        error!("archive server failed: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let config = ServerConfig::from_env()?;
    let archive = load_archive(&config.data_path).await?;
    info!(
        photographers = archive.len(),
        "archive loaded from {}",
        config.data_path.display()
    );

    let app = api::router(AppState::new(archive));
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|e| format!("bind {}: {e}", config.addr))?;

    info!("archive server listening on http://{}", config.addr);
    axum::serve(listener, app)
        .await
        .map_err(|e| format!("server error: {e}"))
}

/// A missing snapshot starts the server with an empty archive.
async fn load_archive(path: &Path) -> Result<InMemoryArchive, String> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("no archive at {}, serving an empty one", path.display());
            return Ok(InMemoryArchive::new());
        }
        Err(e) => return Err(format!("read {}: {e}", path.display())),
    };
    InMemoryArchive::from_json_str(&raw).map_err(|e: CatalogError| {
        format!("load {}: {e}", path.display())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::ArchiveStore;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn missing_archive_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let archive = load_archive(&dir.path().join("absent.json")).await.unwrap();
        assert!(archive.is_empty());
    }

    #[tokio::test]
    async fn archive_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archive.json");
        std::fs::write(
            &path,
            r#"{"photographers": [{"name": "A", "number": 3, "photos": []}]}"#,
        )
        .unwrap();
        let archive = load_archive(&path).await.unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.photographer(3).unwrap().unwrap().name, "A");
    }

    #[tokio::test]
    async fn malformed_archive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archive.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_archive(&path).await.unwrap_err();
        assert!(err.contains("archive.json"));
    }
}
