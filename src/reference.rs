use geo::algorithm::geodesic_area::GeodesicArea;
use geo::orient::Direction;
use geo::{Coord, LineString, Orient, Polygon};

use crate::point::WGS84Point;

fn to_geo_polygon(ring: &[WGS84Point]) -> Polygon {
    let coords: Vec<Coord<f64>> = ring.iter().map(|p| Coord { x: p.lon, y: p.lat }).collect();
    Polygon::new(LineString::from(coords), vec![])
}

/// Ellipsoidal geodesic area in km², for comparison with the spherical
/// estimate only.
pub fn geodesic_area_km2(ring: &[WGS84Point]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let geo_polygon = to_geo_polygon(ring).orient(Direction::Default);
    const M2_PER_KM2: f64 = 1.0e6;
    geo_polygon.geodesic_area_unsigned() / M2_PER_KM2
}
