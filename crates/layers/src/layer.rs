use crate::visibility::VisibilitySelection;

/// Opaque layer identifier, unique within one [`LayerSet`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerName(String);

impl LayerName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LayerName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for LayerName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for LayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerSetError {
    Duplicate(LayerName),
}

impl std::fmt::Display for LayerSetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerSetError::Duplicate(name) => write!(f, "layer {name:?} declared twice"),
        }
    }
}

impl std::error::Error for LayerSetError {}

/// Layers offered to one map view.
///
/// Ordering contract:
/// - Iteration yields names in declaration order; rendering and the layer
///   checkbox list both rely on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerSet {
    names: Vec<LayerName>,
}

impl LayerSet {
    pub fn new<I, N>(names: I) -> Result<Self, LayerSetError>
    where
        I: IntoIterator<Item = N>,
        N: Into<LayerName>,
    {
        let mut out = Self::default();
        for name in names {
            let name = name.into();
            if out.contains(&name) {
                return Err(LayerSetError::Duplicate(name));
            }
            out.names.push(name);
        }
        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn first(&self) -> Option<&LayerName> {
        self.names.first()
    }

    pub fn contains(&self, name: &LayerName) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerName> + '_ {
        self.names.iter()
    }
}

/// Ordered name -> descriptor mapping handed in by the map view.
///
/// `D` is whatever the rendering side draws; this crate never looks inside it.
#[derive(Debug, Clone)]
pub struct Layers<D> {
    set: LayerSet,
    descriptors: Vec<D>,
}

impl<D> Layers<D> {
    pub fn new<I, N>(entries: I) -> Result<Self, LayerSetError>
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<LayerName>,
    {
        let mut set = LayerSet::default();
        let mut descriptors = Vec::new();
        for (name, descriptor) in entries {
            let name = name.into();
            if set.contains(&name) {
                return Err(LayerSetError::Duplicate(name));
            }
            set.names.push(name);
            descriptors.push(descriptor);
        }
        Ok(Self { set, descriptors })
    }

    pub fn layer_set(&self) -> &LayerSet {
        &self.set
    }

    pub fn get(&self, name: &LayerName) -> Option<&D> {
        let idx = self.set.names.iter().position(|n| n == name)?;
        self.descriptors.get(idx)
    }

    /// Descriptors to draw for `selection`, in declaration order.
    ///
    /// Selection entries with no matching layer are skipped.
    pub fn rendered<'a>(
        &'a self,
        selection: &'a VisibilitySelection,
    ) -> impl Iterator<Item = (&'a LayerName, &'a D)> + 'a {
        self.set
            .names
            .iter()
            .zip(self.descriptors.iter())
            .filter(move |(name, _)| selection.contains(name))
    }
}
