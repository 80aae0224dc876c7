use aoi_geometry::aoi::Aoi;
use aoi_geometry::check::{self, AreaCheck};
use aoi_geometry::point::{Centroid, WGS84BoundingBox};
use aoi_geometry::{read_aoi, reference};
use clap::Parser;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

/// Area and centroid of the AOIs found in GeoJSON and KML files.
#[derive(Parser)]
struct Cli {
    /// Files or directories to read
    #[arg(required = true)]
    paths: Vec<PathBuf>,
    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,
    /// Client-supplied area estimate in km², checked against each polygon
    #[arg(long)]
    estimate: Option<f64>,
    /// Accepted relative difference for --estimate [env: AOI_AREA_TOLERANCE]
    #[arg(long)]
    tolerance: Option<f64>,
    /// Print one JSON report per line
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    file: String,
    kind: &'static str,
    area_km2: Option<f64>,
    centroid: Centroid,
    bbox: Option<WGS84BoundingBox>,
    geodesic_km2: Option<f64>,
    check: Option<AreaCheck>,
}

fn tolerance(cli: &Cli) -> f64 {
    if let Some(t) = cli.tolerance {
        return t;
    }
    match env::var("AOI_AREA_TOLERANCE").map(|v| v.parse::<f64>()) {
        Ok(Ok(t)) => t,
        Ok(Err(e)) => {
            log::warn!("ignoring AOI_AREA_TOLERANCE: {}", e);
            check::DEFAULT_TOLERANCE
        }
        Err(_) => check::DEFAULT_TOLERANCE,
    }
}

fn report(file: &str, aoi: &Aoi, cli: &Cli) -> Result<Report, aoi_geometry::error::GeometryError> {
    let centroid = aoi.anchor()?;
    let ret = match aoi {
        Aoi::Polygon(polygon) => {
            polygon.info();
            let check = match cli.estimate {
                Some(estimate) => Some(check::cross_check(&polygon.wgs, estimate, tolerance(cli))?),
                None => None,
            };
            Report {
                file: file.to_string(),
                kind: "Polygon",
                area_km2: Some(polygon.area()?),
                centroid,
                bbox: polygon.wgsbbox(),
                geodesic_km2: Some(reference::geodesic_area_km2(&polygon.wgs)),
                check,
            }
        }
        Aoi::Point(_) => Report {
            file: file.to_string(),
            kind: "Point",
            area_km2: None,
            centroid,
            bbox: None,
            geodesic_km2: None,
            check: None,
        },
    };
    Ok(ret)
}

fn print(r: &Report) {
    println!("{} ({})", r.file, r.kind);
    if let Some(area) = r.area_km2 {
        println!("    area: {:.2} km2", area);
    }
    if let Some(geodesic) = r.geodesic_km2 {
        println!("geodesic: {:.2} km2 (geo crate)", geodesic);
    }
    println!("  anchor: {}", r.centroid);
    if let Some(bbox) = &r.bbox {
        println!("    bbox: {}", bbox);
    }
    if let Some(check) = &r.check {
        let verdict = if check.within_tolerance { "ok" } else { "MISMATCH" };
        println!("   check: {} [{}]", check, verdict);
    }
    println!();
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let files = match read_aoi::collect_files(&cli.paths, cli.recursive) {
        Ok(files) => files,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut failures = 0;
    for path in &files {
        let file = path.display().to_string();
        let aois = match read_aoi::read_aois(path) {
            Ok(aois) => aois,
            Err(e) => {
                log::error!("{}: {}", file, e);
                failures += 1;
                continue;
            }
        };
        for aoi in &aois {
            let r = match report(&file, aoi, &cli) {
                Ok(r) => r,
                Err(e) => {
                    log::error!("{}: {}", file, e);
                    failures += 1;
                    continue;
                }
            };
            if cli.json {
                match serde_json::to_string(&r) {
                    Ok(line) => println!("{}", line),
                    Err(e) => {
                        log::error!("{}: {}", file, e);
                        failures += 1;
                    }
                }
            } else {
                print(&r);
            }
        }
    }

    log::info!("{} files, {} failures", files.len(), failures);
    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
