use serde::ser::{Serialize, SerializeMap, Serializer};

use super::schema::{MetricSchema, MetricSpec, ReductionKind};
use super::value::AnalysisRecord;

/// Anything carrying per-photo analysis records.
pub trait Analyzed {
    fn analyses(&self) -> &[AnalysisRecord];
}

impl Analyzed for Vec<AnalysisRecord> {
    fn analyses(&self) -> &[AnalysisRecord] {
        self
    }
}

impl Analyzed for [AnalysisRecord] {
    fn analyses(&self) -> &[AnalysisRecord] {
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricValue {
    pub metric: MetricSpec,
    pub value: f64,
}

/// One value per schema metric, in schema order.
///
/// Serializes as a JSON object keyed by metric name; NaN and infinite values
/// come out as `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    values: Vec<MetricValue>,
}

impl AggregationResult {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|v| v.metric.name == name)
            .map(|v| v.value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[MetricValue] {
        &self.values
    }

    /// `(metric name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values.iter().map(|v| (v.metric.name, v.value))
    }

    /// `(display name, value)` pairs in schema order.
    pub fn labelled(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values.iter().map(|v| (v.metric.display_name, v.value))
    }
}

impl Serialize for AggregationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for v in &self.values {
            map.serialize_entry(v.metric.name, &v.value)?;
        }
        map.end()
    }
}

pub struct AnalysisAggregator;

impl AnalysisAggregator {
    /// Folds every photo's records into one value per schema metric.
    ///
    /// - Records whose name is not in `schema` are skipped.
    /// - `Average` sums the parsed results and divides by `photos.len()`, so an
    ///   unparseable result poisons the metric with NaN and an empty `photos`
    ///   yields `0.0 / 0.0` (NaN).
    /// - `Count` counts records regardless of their result.
    pub fn aggregate<P: Analyzed>(schema: &MetricSchema, photos: &[P]) -> AggregationResult {
        let mut acc = vec![0.0f64; schema.len()];

        for photo in photos {
            for record in photo.analyses() {
                let Some(idx) = schema.position(&record.name) else {
                    continue;
                };
                match schema.metrics()[idx].kind {
                    ReductionKind::Average => acc[idx] += record.result.as_f64(),
                    ReductionKind::Count => acc[idx] += 1.0,
                }
            }
        }

        let n = photos.len() as f64;
        let values = schema
            .metrics()
            .iter()
            .zip(acc)
            .map(|(metric, sum)| MetricValue {
                metric: *metric,
                value: match metric.kind {
                    ReductionKind::Average => sum / n,
                    ReductionKind::Count => sum,
                },
            })
            .collect();

        AggregationResult { values }
    }
}
