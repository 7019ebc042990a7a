use std::str::FromStr;

/// Page kinds a server-rendered shell can mount, keyed by component name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Index,
    About,
    Search,
    Photo,
    Similarity,
    Photographer,
    MapSquare,
    AllAnalysis,
    Analysis,
    AllPhotos,
    Cluster,
}

impl ViewKind {
    pub const ALL: [ViewKind; 11] = [
        ViewKind::Index,
        ViewKind::About,
        ViewKind::Search,
        ViewKind::Photo,
        ViewKind::Similarity,
        ViewKind::Photographer,
        ViewKind::MapSquare,
        ViewKind::AllAnalysis,
        ViewKind::Analysis,
        ViewKind::AllPhotos,
        ViewKind::Cluster,
    ];

    pub fn component_name(&self) -> &'static str {
        match self {
            ViewKind::Index => "IndexView",
            ViewKind::About => "About",
            ViewKind::Search => "Search",
            ViewKind::Photo => "PhotoView",
            ViewKind::Similarity => "SimilarityView",
            ViewKind::Photographer => "PhotographerView",
            ViewKind::MapSquare => "MapSquareView",
            ViewKind::AllAnalysis => "AllAnalysisView",
            ViewKind::Analysis => "AnalysisView",
            ViewKind::AllPhotos => "AllPhotosView",
            ViewKind::Cluster => "ClusterView",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownView(pub String);

impl std::fmt::Display for UnknownView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown view component {:?}", self.0)
    }
}

impl std::error::Error for UnknownView {}

impl FromStr for ViewKind {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewKind::ALL
            .into_iter()
            .find(|kind| kind.component_name() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}
