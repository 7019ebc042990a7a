use compute::{AggregationResult, AnalysisAggregator, AnalysisRecord, Analyzed, MetricSchema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSquareRef {
    pub number: u32,
}

/// A photo as listed under a photographer or a map square.
///
/// Photos are addressed by `(map_square_number, number)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub map_square_number: u32,
    pub number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_src: Option<String>,
    #[serde(default)]
    pub analyses: Vec<AnalysisRecord>,
}

impl Analyzed for PhotoRecord {
    fn analyses(&self) -> &[AnalysisRecord] {
        &self.analyses
    }
}

/// Body of `GET /api/photographer/{number}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotographerRecord {
    pub name: String,
    pub number: u32,
    /// Square the photographer was assigned to, if any.
    #[serde(default)]
    pub map_square: Option<MapSquareRef>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub photos: Vec<PhotoRecord>,
}

impl PhotographerRecord {
    pub fn summarize(&self, schema: &MetricSchema) -> AggregationResult {
        AnalysisAggregator::aggregate(schema, &self.photos)
    }
}
