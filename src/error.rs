use thiserror::Error;

/// Raised by the area and centroid calculators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Why a GeoJSON-like value was rejected at the boundary.
#[derive(Debug, Error)]
pub enum AoiError {
    #[error("not a geojson geometry: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("unsupported geometry type: {0}")]
    UnsupportedType(String),
    #[error("polygon has no outer ring")]
    MissingRing,
    #[error("outer ring has {0} positions, at least 4 are required")]
    RingTooShort(usize),
    #[error("outer ring is not closed: last position differs from the first")]
    RingNotClosed,
    #[error("position has {0} values, exactly 2 are required")]
    PositionArity(usize),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeRange(f64),
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeRange(f64),
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("geojson error: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("kml error: {0}")]
    Kml(#[from] kml::Error),
    #[error("{0}")]
    Aoi(#[from] AoiError),
    #[error("unsupported file: {0}")]
    UnsupportedFile(String),
    #[error("no polygon or point found in {0}")]
    NoGeometry(String),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}
