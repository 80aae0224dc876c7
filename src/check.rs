use core::fmt;

use serde::Serialize;

use crate::{error::GeometryError, point::WGS84Point, polygon::calculate_area};

pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Server-side area compared against the estimate a client sent along.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AreaCheck {
    pub computed_km2: f64,
    pub client_km2: f64,
    /// `|client - computed| / computed`, infinite when only one side is zero.
    pub relative_diff: f64,
    pub within_tolerance: bool,
}

impl fmt::Display for AreaCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "computed: {:.2} km2, client: {:.2} km2, diff: {:.1}%",
            self.computed_km2,
            self.client_km2,
            self.relative_diff * 100.0
        )
    }
}

pub fn cross_check(
    ring: &[WGS84Point],
    client_km2: f64,
    tolerance: f64,
) -> Result<AreaCheck, GeometryError> {
    let computed_km2 = calculate_area(ring)?;
    let relative_diff = if computed_km2 == 0.0 {
        if client_km2 == 0.0 { 0.0 } else { f64::INFINITY }
    } else {
        (client_km2 - computed_km2).abs() / computed_km2
    };
    let check = AreaCheck {
        computed_km2,
        client_km2,
        relative_diff,
        within_tolerance: relative_diff <= tolerance,
    };
    if !check.within_tolerance {
        log::warn!("area estimate outside {:.1}%: {}", tolerance * 100.0, check);
    }
    Ok(check)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<WGS84Point> {
        [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]
            .iter()
            .map(|c| WGS84Point::from(*c))
            .collect()
    }

    #[test]
    fn test_close_estimate() {
        let c = cross_check(&square(), 12000.0, DEFAULT_TOLERANCE).unwrap();
        assert!(c.within_tolerance);
        assert!(c.relative_diff < 0.03);
        assert_eq!(c.client_km2, 12000.0);
    }

    #[test]
    fn test_far_estimate() {
        let c = cross_check(&square(), 100.0, DEFAULT_TOLERANCE).unwrap();
        assert!(!c.within_tolerance);
        assert!(c.relative_diff > 0.9);
    }

    #[test]
    fn test_degenerate_ring() {
        let flat: Vec<WGS84Point> = vec![WGS84Point::new(1.0, 1.0); 4];
        assert!(cross_check(&flat, 0.0, DEFAULT_TOLERANCE).unwrap().within_tolerance);
        let c = cross_check(&flat, 5.0, DEFAULT_TOLERANCE).unwrap();
        assert!(c.relative_diff.is_infinite());
        assert!(!c.within_tolerance);
    }

    #[test]
    fn test_invalid_ring() {
        assert!(cross_check(&square()[..2], 10.0, DEFAULT_TOLERANCE).is_err());
    }
}
