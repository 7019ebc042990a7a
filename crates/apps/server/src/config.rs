use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_DATA_PATH: &str = "data/archive.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// JSON archive snapshot loaded at startup.
    pub data_path: PathBuf,
}

impl ServerConfig {
    /// Reads `ARCHIVE_ADDR` and `ARCHIVE_DATA`, falling back to the defaults.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let raw_addr = lookup("ARCHIVE_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = raw_addr
            .parse()
            .map_err(|e| format!("invalid ARCHIVE_ADDR {raw_addr:?}: {e}"))?;
        let data_path = lookup("ARCHIVE_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        Ok(Self { addr, data_path })
    }
}
