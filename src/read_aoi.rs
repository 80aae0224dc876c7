use crate::aoi::{Aoi, polygon_from_positions};
use crate::error::ReadError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

mod lockml {
    use super::*;
    use crate::point::WGS84Point;
    use kml::Kml;
    use kml::types::Geometry;

    fn find_first_geometry(kml: &Kml) -> Option<Geometry> {
        match kml {
            Kml::KmlDocument(doc) => doc.elements.iter().find_map(find_first_geometry),
            Kml::Document { elements, .. } => elements.iter().find_map(find_first_geometry),
            Kml::Folder(z) => z.elements.iter().find_map(find_first_geometry),
            Kml::Placemark(p) => match &p.geometry {
                Some(g @ Geometry::Polygon(_)) | Some(g @ Geometry::Point(_)) => Some(g.clone()),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn read(content: &str, name: &str) -> Result<Vec<Aoi>, ReadError> {
        let kml: Kml = content.parse()?;
        match find_first_geometry(&kml) {
            Some(Geometry::Polygon(ls)) => {
                let polygon = geo::Polygon::from(ls);
                let positions: Vec<Vec<f64>> = polygon
                    .exterior()
                    .0
                    .iter()
                    .map(|p| vec![p.x, p.y])
                    .collect();
                Ok(vec![Aoi::Polygon(polygon_from_positions(&positions)?)])
            }
            Some(Geometry::Point(pt)) => {
                let w = WGS84Point::new(pt.coord.x, pt.coord.y);
                w.check_range()?;
                Ok(vec![Aoi::Point(w)])
            }
            _ => Err(ReadError::NoGeometry(name.to_string())),
        }
    }
}

mod locjson {
    use super::*;
    use geojson::{GeoJson, Geometry, Value};

    pub fn read(content: &str) -> Result<Vec<Aoi>, ReadError> {
        let geojson: GeoJson = content.parse()?;
        let geometries: Vec<Geometry> = match geojson {
            GeoJson::FeatureCollection(collection) => collection
                .features
                .into_iter()
                .filter_map(|feature| feature.geometry)
                .collect(),
            GeoJson::Feature(feature) => feature.geometry.into_iter().collect(),
            GeoJson::Geometry(geometry) => vec![geometry],
        };
        geometries
            .iter()
            .filter_map(|g| geometry_to_aoi(g).transpose())
            .collect()
    }

    fn geometry_to_aoi(geometry: &Geometry) -> Result<Option<Aoi>, ReadError> {
        match &geometry.value {
            Value::Polygon(_) | Value::Point(_) => Ok(Some(Aoi::from_geometry(geometry)?)),
            Value::MultiPolygon(multi_coords) => {
                // Only the first polygon's outer ring is kept
                match multi_coords.first().and_then(|rings| rings.first()) {
                    Some(outer) => Ok(Some(Aoi::Polygon(polygon_from_positions(outer)?))),
                    None => Ok(None),
                }
            }
            other => {
                log::debug!("skipping geometry: {:?}", other);
                Ok(None)
            }
        }
    }
}

fn is_aoi_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("geojson") | Some("json") | Some("kml")
    )
}

/// Reads every polygon and point AOI in a `.geojson`, `.json` or `.kml` file.
pub fn read_aois(path: &Path) -> Result<Vec<Aoi>, ReadError> {
    let name = path.display().to_string();
    let content = fs::read_to_string(path)?;
    let aois = match path.extension().and_then(|e| e.to_str()) {
        Some("kml") => lockml::read(&content, &name)?,
        Some("geojson") | Some("json") => locjson::read(&content)?,
        _ => return Err(ReadError::UnsupportedFile(name)),
    };
    if aois.is_empty() {
        return Err(ReadError::NoGeometry(name));
    }
    log::trace!("{}: {} aois", name, aois.len());
    Ok(aois)
}

/// Expands directories into the AOI files below them.
pub fn collect_files(paths: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>, ReadError> {
    let mut ret = Vec::new();
    for path in paths {
        if !path.is_dir() {
            ret.push(path.clone());
            continue;
        }
        let walker = if recursive {
            WalkDir::new(path)
        } else {
            WalkDir::new(path).max_depth(1)
        };
        for entry in walker.sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && is_aoi_file(entry.path()) {
                ret.push(entry.into_path());
            }
        }
    }
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::WGS84Point;

    const SQUARE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"name": "square"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"name": "site"},
                "geometry": {"type": "Point", "coordinates": [12.5, 41.9]}
            },
            {
                "type": "Feature",
                "properties": {"name": "road"},
                "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}
            }
        ]
    }"#;

    const KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark>
      <name>aoi</name>
      <Polygon>
        <outerBoundaryIs>
          <LinearRing>
            <coordinates>0,0,0 2,0,0 2,2,0 0,2,0 0,0,0</coordinates>
          </LinearRing>
        </outerBoundaryIs>
      </Polygon>
    </Placemark>
  </Document>
</kml>"#;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_geojson_feature_collection() {
        let aois = locjson::read(SQUARE).unwrap();
        assert_eq!(aois.len(), 2);
        assert!(matches!(&aois[0], Aoi::Polygon(p) if p.wgs.len() == 5));
        assert_eq!(aois[1], Aoi::Point(WGS84Point::new(12.5, 41.9)));
    }

    #[test]
    fn test_geojson_multipolygon() {
        let content = r#"{"type": "MultiPolygon", "coordinates": [
            [[[0, 0], [1, 0], [1, 1], [0, 0]]],
            [[[5, 5], [6, 5], [6, 6], [5, 5]]]
        ]}"#;
        let aois = locjson::read(content).unwrap();
        assert_eq!(aois.len(), 1);
        match &aois[0] {
            Aoi::Polygon(p) => assert_eq!(p.wgs[1], WGS84Point::new(1.0, 0.0)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_geojson_invalid_ring() {
        let content = r#"{"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [0, 0]]]}"#;
        assert!(matches!(locjson::read(content), Err(ReadError::Aoi(_))));
    }

    #[test]
    fn test_kml_polygon() {
        let aois = lockml::read(KML, "test.kml").unwrap();
        assert_eq!(aois.len(), 1);
        let centroid = aois[0].anchor().unwrap();
        assert_eq!(centroid.lat, 1.0);
        assert_eq!(centroid.lng, 1.0);
    }

    #[test]
    fn test_read_files() {
        let tmpdir = tempfile::tempdir().unwrap();
        let geojson = write(tmpdir.path(), "square.geojson", SQUARE);
        let kml = write(tmpdir.path(), "square.kml", KML);
        let txt = write(tmpdir.path(), "notes.txt", "nothing");
        assert_eq!(read_aois(&geojson).unwrap().len(), 2);
        assert_eq!(read_aois(&kml).unwrap().len(), 1);
        assert!(matches!(
            read_aois(&txt),
            Err(ReadError::UnsupportedFile(_))
        ));

        let files = collect_files(&[tmpdir.path().to_path_buf()], false).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains(&geojson));
        assert!(files.contains(&kml));
        assert!(!files.contains(&txt));
    }

    #[test]
    fn test_collect_files_recursive() {
        let tmpdir = tempfile::tempdir().unwrap();
        let nested = tmpdir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        let top = write(tmpdir.path(), "top.geojson", SQUARE);
        let deep = write(&nested, "deep.kml", KML);

        let shallow = collect_files(&[tmpdir.path().to_path_buf()], false).unwrap();
        assert_eq!(shallow, vec![top.clone()]);
        let all = collect_files(&[tmpdir.path().to_path_buf()], true).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.contains(&top));
        assert!(all.contains(&deep));
    }
}
