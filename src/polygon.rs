use serde_json::Value;

use crate::{
    error::GeometryError,
    point::{Centroid, WGS84BoundingBox, WGS84Point},
};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const MIN_RING_LEN: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub wgs: Vec<WGS84Point>,
}

impl Polygon {
    pub fn new(wgs: Vec<WGS84Point>) -> Self {
        Polygon { wgs }
    }

    pub fn info(&self) {
        log::info!("polygon: len: {}", self.wgs.len());
        log::info!("polygon: closed: {}", self.is_closed());
        if let Some(b) = self.wgsbbox() {
            log::info!("polygon: wgs bbox: {}", b);
            log::info!("polygon: width: {:.5} deg", b.width());
            log::info!("polygon: height: {:.5} deg", b.height());
        }
    }

    pub fn is_closed(&self) -> bool {
        match (self.wgs.first(), self.wgs.last()) {
            (Some(first), Some(last)) => self.wgs.len() > 1 && first == last,
            _ => false,
        }
    }

    pub fn wgsbbox(&self) -> Option<WGS84BoundingBox> {
        let first = self.wgs.first()?;
        let b = self
            .wgs
            .iter()
            .fold(WGS84BoundingBox::from(first, first), |b, curr| {
                WGS84BoundingBox::from(
                    &WGS84Point {
                        lon: b.min.lon.min(curr.lon),
                        lat: b.min.lat.min(curr.lat),
                    },
                    &WGS84Point {
                        lon: b.max.lon.max(curr.lon),
                        lat: b.max.lat.max(curr.lat),
                    },
                )
            });
        Some(b)
    }

    pub fn area(&self) -> Result<f64, GeometryError> {
        calculate_area(&self.wgs)
    }

    pub fn centroid(&self) -> Result<Centroid, GeometryError> {
        calculate_centroid(&self.wgs)
    }
}

/// Rounds half-way values upward, so `-0.5` becomes `0` and `0.5` becomes `1`.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor + 0.5).floor() / factor
}

fn check_ring(ring: &[WGS84Point]) -> Result<(), GeometryError> {
    if ring.is_empty() {
        return Err(GeometryError::InvalidGeometry("ring is missing".to_string()));
    }
    if ring.len() < MIN_RING_LEN {
        return Err(GeometryError::InvalidGeometry(format!(
            "ring has {} positions, at least {} are required",
            ring.len(),
            MIN_RING_LEN
        )));
    }
    Ok(())
}

/// Approximate area in km² of a closed ring on a sphere of radius
/// [`EARTH_RADIUS_KM`], rounded to 2 decimals.
///
/// This is a first-order spherical-excess estimate, not an exact geodesic
/// area. Consecutive pairs are walked without wrapping, so the ring must
/// already repeat its first vertex at the end.
pub fn calculate_area(ring: &[WGS84Point]) -> Result<f64, GeometryError> {
    check_ring(ring)?;
    if ring.first() != ring.last() {
        log::warn!(
            "area: ring is not closed (first: {}, last: {})",
            ring[0],
            ring[ring.len() - 1]
        );
    }

    let mut total = 0.0;
    for pair in ring.windows(2) {
        let (p1, p2) = (&pair[0], &pair[1]);
        let lat1 = p1.lat.to_radians();
        let lat2 = p2.lat.to_radians();
        let dlon = (p2.lon - p1.lon).to_radians();
        total += dlon * (2.0 + lat1.sin() + lat2.sin());
    }

    let area = total.abs() * EARTH_RADIUS_KM * EARTH_RADIUS_KM / 2.0;
    log::trace!("area: {} positions, raw {:.6} km2", ring.len(), area);
    if area == 0.0 {
        log::warn!("area: degenerate ring of {} positions", ring.len());
    }
    Ok(round_to(area, 2))
}

/// Unweighted mean of the ring's vertices, leaving out the closing repeat.
pub fn calculate_centroid(ring: &[WGS84Point]) -> Result<Centroid, GeometryError> {
    check_ring(ring)?;
    let vertices = &ring[..ring.len() - 1];
    let n = vertices.len() as f64;
    let (sum_lon, sum_lat) = vertices
        .iter()
        .fold((0.0, 0.0), |(lon, lat), p| (lon + p.lon, lat + p.lat));
    Ok(Centroid {
        lat: round_to(sum_lat / n, 6),
        lng: round_to(sum_lon / n, 6),
    })
}

/// Converts a raw JSON ring (`[[lng, lat], ...]`) for callers that hold the
/// request body rather than a parsed geometry.
pub fn ring_from_json(value: &Value) -> Result<Vec<WGS84Point>, GeometryError> {
    let entries = match value {
        Value::Null => return Err(GeometryError::InvalidGeometry("ring is missing".to_string())),
        Value::Array(entries) => entries,
        _ => {
            return Err(GeometryError::InvalidGeometry(
                "ring is not an array".to_string(),
            ));
        }
    };
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let lon = entry.get(0).and_then(Value::as_f64);
            let lat = entry.get(1).and_then(Value::as_f64);
            match (lon, lat) {
                (Some(lon), Some(lat)) => Ok(WGS84Point { lon, lat }),
                _ => Err(GeometryError::InvalidGeometry(format!(
                    "position {} is not a [lng, lat] pair",
                    i
                ))),
            }
        })
        .collect()
}
