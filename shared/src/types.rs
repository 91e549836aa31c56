//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// GPS coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Rectangular latitude/longitude range, bounds inclusive
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBox {
    pub const fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    pub fn contains(&self, point: &GpsCoordinates) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lon
            && point.longitude <= self.max_lon
    }
}

/// A named geographic rule: one or more boxes mapped to a classification value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedRegion<T> {
    pub name: String,
    pub boxes: Vec<GeoBox>,
    pub value: T,
}

impl<T> NamedRegion<T> {
    pub fn new(name: impl Into<String>, boxes: Vec<GeoBox>, value: T) -> Self {
        Self {
            name: name.into(),
            boxes,
            value,
        }
    }

    pub fn contains(&self, point: &GpsCoordinates) -> bool {
        self.boxes.iter().any(|b| b.contains(point))
    }
}

/// First region in priority order containing the point
pub fn first_match<'a, T>(
    regions: &'a [NamedRegion<T>],
    point: &GpsCoordinates,
) -> Option<&'a NamedRegion<T>> {
    regions.iter().find(|r| r.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geobox_bounds_inclusive() {
        let b = GeoBox::new(8.0, 37.0, 68.0, 97.0);
        assert!(b.contains(&GpsCoordinates::new(8.0, 68.0)));
        assert!(b.contains(&GpsCoordinates::new(37.0, 97.0)));
        assert!(!b.contains(&GpsCoordinates::new(7.99, 80.0)));
        assert!(!b.contains(&GpsCoordinates::new(20.0, 97.01)));
    }

    #[test]
    fn test_first_match_respects_order() {
        let regions = vec![
            NamedRegion::new("wide", vec![GeoBox::new(0.0, 10.0, 0.0, 10.0)], 1),
            NamedRegion::new("narrow", vec![GeoBox::new(4.0, 6.0, 4.0, 6.0)], 2),
        ];
        let hit = first_match(&regions, &GpsCoordinates::new(5.0, 5.0)).map(|r| r.value);
        assert_eq!(hit, Some(1));
        assert!(first_match(&regions, &GpsCoordinates::new(20.0, 5.0)).is_none());
    }

    #[test]
    fn test_multi_box_region() {
        let region = NamedRegion::new(
            "split",
            vec![GeoBox::new(0.0, 1.0, 0.0, 1.0), GeoBox::new(5.0, 6.0, 5.0, 6.0)],
            (),
        );
        assert!(region.contains(&GpsCoordinates::new(5.5, 5.5)));
        assert!(!region.contains(&GpsCoordinates::new(3.0, 3.0)));
    }
}
