use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AoiError;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WGS84Point {
    pub lon: f64,
    pub lat: f64,
}

impl WGS84Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Builds a point from a GeoJSON position, which must be exactly
    /// `[lon, lat]` inside the WGS84 ranges.
    pub fn from_position(position: &[f64]) -> Result<Self, AoiError> {
        match position {
            [lon, lat] => {
                let p = WGS84Point::new(*lon, *lat);
                p.check_range()?;
                Ok(p)
            }
            _ => Err(AoiError::PositionArity(position.len())),
        }
    }

    pub fn check_range(&self) -> Result<(), AoiError> {
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(AoiError::LongitudeRange(self.lon));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(AoiError::LatitudeRange(self.lat));
        }
        Ok(())
    }

    pub fn lon_lat(&self) -> (f64, f64) {
        (self.lon, self.lat)
    }
}

impl From<(f64, f64)> for WGS84Point {
    fn from((lon, lat): (f64, f64)) -> Self {
        WGS84Point { lon, lat }
    }
}

impl fmt::Display for WGS84Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wgs(lat: {:.5}, lon: {:.5})", self.lat, self.lon)
    }
}

/// Vertex-mean anchor of a ring, used to place an AOI on a map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub lat: f64,
    pub lng: f64,
}

impl fmt::Display for Centroid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "centroid(lat: {:.6}, lng: {:.6})", self.lat, self.lng)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WGS84BoundingBox {
    pub min: WGS84Point,
    pub max: WGS84Point,
}

impl WGS84BoundingBox {
    pub fn from(p1: &WGS84Point, p2: &WGS84Point) -> Self {
        let min = WGS84Point {
            lon: p1.lon.min(p2.lon),
            lat: p1.lat.min(p2.lat),
        };
        let max = WGS84Point {
            lon: p1.lon.max(p2.lon),
            lat: p1.lat.max(p2.lat),
        };
        Self { min, max }
    }
    pub fn contains(&self, w: &WGS84Point) -> bool {
        w.lon >= self.min.lon
            && w.lon <= self.max.lon
            && w.lat >= self.min.lat
            && w.lat <= self.max.lat
    }
    pub fn width(&self) -> f64 {
        self.max.lon - self.min.lon
    }
    pub fn height(&self) -> f64 {
        self.max.lat - self.min.lat
    }
}

impl fmt::Display for WGS84BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wgsbbox(min: {}, max: {})", self.min, self.max)
    }
}
