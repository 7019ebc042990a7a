use crate::bounds::{BoundingRectangle, LatLng, PARIS_BOUNDS};

/// Map square width in longitude degrees.
pub const MAPSQUARE_WIDTH: f64 = 0.00340325568;
/// Map square height in latitude degrees.
pub const MAPSQUARE_HEIGHT: f64 = 0.0022358;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridError {
    /// Width or height is zero, negative or not finite.
    InvalidCellSize { width: f64, height: f64 },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::InvalidCellSize { width, height } => write!(
                f,
                "grid cell size must be strictly positive, got {width} x {height}"
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// Per-cell deltas: `width` in longitude degrees, `height` in latitude degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCellSize {
    width: f64,
    height: f64,
}

impl GridCellSize {
    pub fn new(width: f64, height: f64) -> Result<Self, GridError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(GridError::InvalidCellSize { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

pub const MAPSQUARE_CELL: GridCellSize = GridCellSize {
    width: MAPSQUARE_WIDTH,
    height: MAPSQUARE_HEIGHT,
};

/// One addressable cell of a [`GeoGrid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    /// South-west corner of the cell.
    pub origin: LatLng,
}

/// Regular lat/lng grid anchored at a fixed origin corner.
///
/// Rows advance northwards by the cell height, columns eastwards by the cell
/// width. `cell_coordinate` is total: indices past `rows()`/`cols()` simply
/// extrapolate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoGrid {
    origin: LatLng,
    cell: GridCellSize,
    rows: u32,
    cols: u32,
}

impl GeoGrid {
    pub const fn new(origin: LatLng, cell: GridCellSize, rows: u32, cols: u32) -> Self {
        Self {
            origin,
            cell,
            rows,
            cols,
        }
    }

    /// Grid covering `bounds`, anchored at its south-west corner.
    ///
    /// The last row/column may overhang the north/east edge.
    pub fn over(bounds: &BoundingRectangle, cell: GridCellSize) -> Self {
        let rows = (bounds.lat_span() / cell.height).ceil() as u32;
        let cols = (bounds.lng_span() / cell.width).ceil() as u32;
        Self::new(bounds.south_west(), cell, rows, cols)
    }

    /// Paris map squares.
    pub fn paris() -> Self {
        Self::over(&PARIS_BOUNDS, MAPSQUARE_CELL)
    }

    pub fn origin(&self) -> LatLng {
        self.origin
    }

    pub fn cell_size(&self) -> GridCellSize {
        self.cell
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn cell_count(&self) -> u64 {
        self.rows as u64 * self.cols as u64
    }

    /// `origin + (row * height, col * width)`.
    pub fn cell_coordinate(&self, row: u32, col: u32) -> LatLng {
        LatLng::new(
            self.origin.lat + row as f64 * self.cell.height,
            self.origin.lng + col as f64 * self.cell.width,
        )
    }

    /// Cell whose area contains `p`, or `None` when `p` falls outside the grid.
    pub fn cell_containing(&self, p: LatLng) -> Option<(u32, u32)> {
        let dy = (p.lat - self.origin.lat) / self.cell.height;
        let dx = (p.lng - self.origin.lng) / self.cell.width;
        if !(dy >= 0.0 && dx >= 0.0) {
            return None;
        }
        let (row, col) = (dy.floor(), dx.floor());
        if row >= self.rows as f64 || col >= self.cols as f64 {
            return None;
        }
        Some((row as u32, col as u32))
    }

    /// Iterates all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| GridCell {
                row,
                col,
                origin: self.cell_coordinate(row, col),
            })
        })
    }
}
