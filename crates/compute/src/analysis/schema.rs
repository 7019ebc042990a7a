use serde::Serialize;

/// How all records sharing a metric name are folded into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionKind {
    /// Sum of parsed results divided by the number of photos.
    Average,
    /// Number of records, whatever their result.
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpec {
    pub name: &'static str,
    pub display_name: &'static str,
    pub kind: ReductionKind,
}

impl MetricSpec {
    pub const fn new(name: &'static str, display_name: &'static str, kind: ReductionKind) -> Self {
        Self {
            name,
            display_name,
            kind,
        }
    }
}

/// Compile-time table of the metrics a view summarises.
///
/// Ordering contract:
/// - Declaration order is the order of every aggregation result and listing.
/// - Names are expected to be unique; on a duplicate the first entry wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSchema {
    metrics: &'static [MetricSpec],
}

impl MetricSchema {
    pub const fn new(metrics: &'static [MetricSpec]) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &'static [MetricSpec] {
        self.metrics
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.metrics.iter().position(|m| m.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&'static MetricSpec> {
        self.position(name).map(|idx| &self.metrics[idx])
    }

    pub fn kind_of(&self, name: &str) -> Option<ReductionKind> {
        self.get(name).map(|m| m.kind)
    }

    pub fn has_unique_names(&self) -> bool {
        self.metrics
            .iter()
            .enumerate()
            .all(|(i, m)| self.position(m.name) == Some(i))
    }
}

const PHOTOGRAPHER_METRICS: &[MetricSpec] = &[
    MetricSpec::new(
        "whitespace_percentage",
        "Average Whitespace Percentage",
        ReductionKind::Average,
    ),
    MetricSpec::new(
        "portrait_detection",
        "Percentage of Portraits",
        ReductionKind::Count,
    ),
    MetricSpec::new("mean_detail", "Average Mean Detail", ReductionKind::Average),
];

/// Metrics shown in the photographer summary panel.
pub const PHOTOGRAPHER_SCHEMA: MetricSchema = MetricSchema::new(PHOTOGRAPHER_METRICS);
