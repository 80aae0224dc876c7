//! Boundary parsing of GeoJSON-like AOI geometries.
//!
//! Request handlers receive `{ "type": ..., "coordinates": ... }` objects.
//! [`Aoi::parse`] turns them into a typed polygon ring or point, and
//! [`validate_coordinates`] reduces that to the yes/no answer the intake
//! handlers branch on.

use geojson::{Geometry, Value};
use serde_json::Value as JsonValue;

use crate::{
    error::{AoiError, GeometryError},
    point::{Centroid, WGS84Point},
    polygon::Polygon,
};

const MIN_POLYGON_POSITIONS: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub enum Aoi {
    Polygon(Polygon),
    /// Center of a circle-shaped AOI.
    Point(WGS84Point),
}

impl Aoi {
    /// Parses a borrowed value. The geometry is copied out of `value`; a
    /// caller that owns the request body should use [`Aoi::from_json`].
    pub fn parse(value: &JsonValue) -> Result<Aoi, AoiError> {
        Self::from_json(value.clone())
    }

    pub fn from_json(value: JsonValue) -> Result<Aoi, AoiError> {
        let geometry = Geometry::from_json_value(value)?;
        Self::from_geometry(&geometry)
    }

    pub fn from_geometry(geometry: &Geometry) -> Result<Aoi, AoiError> {
        match &geometry.value {
            Value::Polygon(rings) => {
                let outer = rings.first().ok_or(AoiError::MissingRing)?;
                Ok(Aoi::Polygon(polygon_from_positions(outer)?))
            }
            Value::Point(position) => Ok(Aoi::Point(WGS84Point::from_position(position)?)),
            other => Err(AoiError::UnsupportedType(type_name(other).to_string())),
        }
    }

    pub fn area(&self) -> Result<Option<f64>, GeometryError> {
        match self {
            Aoi::Polygon(p) => p.area().map(Some),
            Aoi::Point(_) => Ok(None),
        }
    }

    /// Map anchor: the vertex mean for polygons, the point itself otherwise.
    pub fn anchor(&self) -> Result<Centroid, GeometryError> {
        match self {
            Aoi::Polygon(p) => p.centroid(),
            Aoi::Point(w) => Ok(Centroid {
                lat: w.lat,
                lng: w.lon,
            }),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

pub(crate) fn polygon_from_positions(ring: &[Vec<f64>]) -> Result<Polygon, AoiError> {
    if ring.len() < MIN_POLYGON_POSITIONS {
        return Err(AoiError::RingTooShort(ring.len()));
    }
    let wgs = ring
        .iter()
        .map(|p| WGS84Point::from_position(p))
        .collect::<Result<Vec<_>, _>>()?;
    let polygon = Polygon::new(wgs);
    if !polygon.is_closed() {
        return Err(AoiError::RingNotClosed);
    }
    Ok(polygon)
}

/// True when `value` is a well-formed Polygon or Point inside WGS84 ranges.
pub fn validate_coordinates(value: &JsonValue) -> bool {
    match Aoi::parse(value) {
        Ok(_) => true,
        Err(e) => {
            log::debug!("aoi: rejected: {}", e);
            false
        }
    }
}
