use crate::layer::{LayerName, LayerSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Any subset of layers may be visible.
    #[default]
    Multi,
    /// Exactly one layer is visible once the view is initialised.
    Single,
}

/// Options a map view is created with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityConfig {
    /// Single-select mode. Takes precedence over `visible_layers`.
    pub single_layer: bool,
    /// Initial selection override; not validated against the layer set.
    pub visible_layers: Option<Vec<String>>,
    /// Whether the layer checkbox list is shown. Rendering only.
    pub layer_select_visible: bool,
}

impl VisibilityConfig {
    pub fn mode(&self) -> SelectionMode {
        if self.single_layer {
            SelectionMode::Single
        } else {
            SelectionMode::Multi
        }
    }
}

/// Set of visible layer names.
///
/// Insertion order is kept for listing; equality is set equality.
/// Members not in the view's [`LayerSet`] are allowed and never render.
#[derive(Debug, Clone, Default, Eq)]
pub struct VisibilitySelection {
    names: Vec<LayerName>,
}

impl PartialEq for VisibilitySelection {
    fn eq(&self, other: &Self) -> bool {
        self.names.len() == other.names.len() && self.names.iter().all(|n| other.contains(n))
    }
}

impl VisibilitySelection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_names<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<LayerName>,
    {
        let mut out = Self::default();
        for name in names {
            let name = name.into();
            if !out.contains(&name) {
                out.names.push(name);
            }
        }
        out
    }

    /// Initial selection for a freshly created view.
    ///
    /// Priority: single-select picks the first declared layer, then an
    /// explicit `visible_layers` list, then every declared layer.
    pub fn initialize(layers: &LayerSet, config: &VisibilityConfig) -> Self {
        if config.single_layer {
            return Self::from_names(layers.first().cloned());
        }
        if let Some(explicit) = &config.visible_layers {
            return Self::from_names(explicit.iter().map(String::as_str));
        }
        Self::from_names(layers.iter().cloned())
    }

    /// Selection after the user clicks `name`.
    pub fn toggle(&self, mode: SelectionMode, name: &LayerName) -> Self {
        match mode {
            // Clicking the sole visible layer re-selects it: single-select
            // never becomes empty through a toggle.
            SelectionMode::Single => Self {
                names: vec![name.clone()],
            },
            SelectionMode::Multi => {
                let mut names = self.names.clone();
                match names.iter().position(|n| n == name) {
                    Some(idx) => {
                        names.remove(idx);
                    }
                    None => names.push(name.clone()),
                }
                Self { names }
            }
        }
    }

    pub fn contains(&self, name: &LayerName) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerName> + '_ {
        self.names.iter()
    }
}

/// One row of the layer checkbox list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerToggle<'a> {
    pub name: &'a LayerName,
    pub checked: bool,
}

/// Visibility state owned by one map view.
#[derive(Debug, Clone)]
pub struct LayerVisibility {
    layers: LayerSet,
    mode: SelectionMode,
    layer_select_visible: bool,
    selection: VisibilitySelection,
}

impl LayerVisibility {
    pub fn new(layers: LayerSet, config: &VisibilityConfig) -> Self {
        let selection = VisibilitySelection::initialize(&layers, config);
        Self {
            layers,
            mode: config.mode(),
            layer_select_visible: config.layer_select_visible,
            selection,
        }
    }

    pub fn layer_set(&self) -> &LayerSet {
        &self.layers
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn selection(&self) -> &VisibilitySelection {
        &self.selection
    }

    pub fn is_visible(&self, name: &LayerName) -> bool {
        self.selection.contains(name)
    }

    /// Applies a click on `name` and returns the new selection.
    ///
    /// Unknown names are accepted; they end up as dead selection entries.
    pub fn toggle(&mut self, name: impl Into<LayerName>) -> &VisibilitySelection {
        let name = name.into();
        self.selection = self.selection.toggle(self.mode, &name);
        &self.selection
    }

    /// Declared layers that are currently visible, in declaration order.
    pub fn visible_layers(&self) -> impl Iterator<Item = &LayerName> + '_ {
        self.layers.iter().filter(|n| self.selection.contains(n))
    }

    /// Checkbox rows in declaration order, or `None` when the list is hidden.
    pub fn layer_select(&self) -> Option<Vec<LayerToggle<'_>>> {
        if !self.layer_select_visible {
            return None;
        }
        Some(
            self.layers
                .iter()
                .map(|name| LayerToggle {
                    name,
                    checked: self.selection.contains(name),
                })
                .collect(),
        )
    }
}
