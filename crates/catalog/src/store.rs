use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{PhotoRecord, PhotographerRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    NotFound,
    Corrupt(String),
    Io(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::NotFound => write!(f, "archive entry not found"),
            CatalogError::Corrupt(msg) => write!(f, "archive data corrupt: {msg}"),
            CatalogError::Io(msg) => write!(f, "archive storage error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// On-disk archive layout: a flat list of photographers with their photos.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveSnapshot {
    #[serde(default)]
    pub photographers: Vec<PhotographerRecord>,
}

pub trait ArchiveStore {
    /// All photographers, ordered by number.
    fn photographers(&self) -> Result<Vec<PhotographerRecord>, CatalogError>;
    fn photographer(&self, number: u32) -> Result<Option<PhotographerRecord>, CatalogError>;
    /// Every photo filed under map square `number`, ordered by photo number.
    fn map_square_photos(&self, number: u32) -> Result<Vec<PhotoRecord>, CatalogError>;
    /// Photo addressed by `(map_square, number)`.
    fn photo(&self, map_square: u32, number: u32) -> Result<Option<PhotoRecord>, CatalogError>;
}

#[derive(Debug, Default)]
pub struct InMemoryArchive {
    photographers: BTreeMap<u32, PhotographerRecord>,
}

impl InMemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with `Corrupt` when two photographers share a number.
    pub fn from_snapshot(snapshot: ArchiveSnapshot) -> Result<Self, CatalogError> {
        let mut photographers = BTreeMap::new();
        for record in snapshot.photographers {
            let number = record.number;
            if photographers.insert(number, record).is_some() {
                return Err(CatalogError::Corrupt(format!(
                    "photographer {number} listed twice"
                )));
            }
        }
        Ok(Self { photographers })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let snapshot: ArchiveSnapshot =
            serde_json::from_str(raw).map_err(|e| CatalogError::Corrupt(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }

    pub fn load_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CatalogError::NotFound,
            _ => CatalogError::Io(format!("read {path:?}: {e}")),
        })?;
        Self::from_json_str(&raw)
    }

    pub fn len(&self) -> usize {
        self.photographers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photographers.is_empty()
    }
}

impl ArchiveStore for InMemoryArchive {
    fn photographers(&self) -> Result<Vec<PhotographerRecord>, CatalogError> {
        Ok(self.photographers.values().cloned().collect())
    }

    fn photographer(&self, number: u32) -> Result<Option<PhotographerRecord>, CatalogError> {
        Ok(self.photographers.get(&number).cloned())
    }

    fn map_square_photos(&self, number: u32) -> Result<Vec<PhotoRecord>, CatalogError> {
        let mut photos: Vec<PhotoRecord> = self
            .photographers
            .values()
            .flat_map(|p| p.photos.iter())
            .filter(|photo| photo.map_square_number == number)
            .cloned()
            .collect();
        photos.sort_by_key(|photo| photo.number);
        Ok(photos)
    }

    fn photo(&self, map_square: u32, number: u32) -> Result<Option<PhotoRecord>, CatalogError> {
        Ok(self
            .photographers
            .values()
            .flat_map(|p| p.photos.iter())
            .find(|photo| photo.map_square_number == map_square && photo.number == number)
            .cloned())
    }
}
