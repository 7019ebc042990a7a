/// Geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsError {
    /// South-west corner is not strictly south-west of the north-east corner.
    Inverted { south_west: LatLng, north_east: LatLng },
    NotFinite,
}

impl std::fmt::Display for BoundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundsError::Inverted {
                south_west,
                north_east,
            } => write!(
                f,
                "south-west corner ({}, {}) must lie below and left of north-east corner ({}, {})",
                south_west.lat, south_west.lng, north_east.lat, north_east.lng
            ),
            BoundsError::NotFinite => write!(f, "bounding rectangle corners must be finite"),
        }
    }
}

impl std::error::Error for BoundsError {}

/// Axis-aligned lat/lng rectangle.
///
/// Invariant: `south_west.lat < north_east.lat` and `south_west.lng < north_east.lng`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingRectangle {
    south_west: LatLng,
    north_east: LatLng,
}

impl BoundingRectangle {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Result<Self, BoundsError> {
        let corners = [south_west.lat, south_west.lng, north_east.lat, north_east.lng];
        if corners.iter().any(|v| !v.is_finite()) {
            return Err(BoundsError::NotFinite);
        }
        if south_west.lat >= north_east.lat || south_west.lng >= north_east.lng {
            return Err(BoundsError::Inverted {
                south_west,
                north_east,
            });
        }
        Ok(Self {
            south_west,
            north_east,
        })
    }

    /// Caller guarantees the corner ordering; used for compile-time constants.
    const fn from_corners(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    pub fn south_west(&self) -> LatLng {
        self.south_west
    }

    pub fn north_east(&self) -> LatLng {
        self.north_east
    }

    /// Latitude extent in degrees.
    pub fn lat_span(&self) -> f64 {
        self.north_east.lat - self.south_west.lat
    }

    /// Longitude extent in degrees.
    pub fn lng_span(&self) -> f64 {
        self.north_east.lng - self.south_west.lng
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south_west.lat
            && p.lat <= self.north_east.lat
            && p.lng >= self.south_west.lng
            && p.lng <= self.north_east.lng
    }

    /// `[[sw.lat, sw.lng], [ne.lat, ne.lng]]`, the corner-pair shape map widgets take.
    pub fn as_corner_array(&self) -> [[f64; 2]; 2] {
        [
            [self.south_west.lat, self.south_west.lng],
            [self.north_east.lat, self.north_east.lng],
        ]
    }
}

/// The navigable area of a map view.
///
/// The map surface performs the actual drag clamping; this type only owns the
/// rectangle and zoom floor it clamps against.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportBounds {
    bounds: BoundingRectangle,
    min_zoom: u8,
}

impl ViewportBounds {
    pub const fn new(bounds: BoundingRectangle, min_zoom: u8) -> Self {
        Self { bounds, min_zoom }
    }

    pub fn bounds(&self) -> &BoundingRectangle {
        &self.bounds
    }

    pub fn min_zoom(&self) -> u8 {
        self.min_zoom
    }
}

pub const PARIS_BOUNDS: BoundingRectangle = BoundingRectangle::from_corners(
    LatLng::new(48.8030, 2.1330),
    LatLng::new(48.9608, 2.6193),
);

pub const PARIS_MIN_ZOOM: u8 = 12;

pub const PARIS_VIEWPORT: ViewportBounds = ViewportBounds::new(PARIS_BOUNDS, PARIS_MIN_ZOOM);

/// Centre used when a map view is opened without an explicit position.
pub const PARIS_DEFAULT_CENTER: LatLng = LatLng::new(48.858859, 2.3470599);
