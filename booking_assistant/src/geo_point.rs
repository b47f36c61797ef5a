// Coordinates come back from the mapping provider in degrees but the dispatch
// api only accepts integer micro-degrees.  Keeping the two as separate types
// means a degree value can't end up in the booking document by accident.

use geo::{Distance, Haversine};
use geo_types::Point;
use serde::{Deserialize, Serialize};

const MICRO_DEGREES: f64 = 1_000_000.0;

/// A longitude/latitude pair in degrees, as returned by geocoding and
/// directions lookups.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Degrees {
    pub lng: f64,
    pub lat: f64,
}

/// A longitude/latitude pair in micro-degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lng: i64,
    pub lat: i64,
}

/// Scales a single degree value to micro-degrees.
///
/// Rounds half away from zero rather than truncating, truncation drags
/// negative coordinates (everything south or west) a step off.
pub fn scale(degrees: f64) -> i64 {
    (degrees * MICRO_DEGREES).round() as i64
}

pub fn unscale(micro_degrees: i64) -> f64 {
    micro_degrees as f64 / MICRO_DEGREES
}

impl Degrees {
    pub fn new(lng: f64, lat: f64) -> Self {
        Degrees { lng, lat }
    }

    pub fn scaled(&self) -> GeoPoint {
        GeoPoint {
            lng: scale(self.lng),
            lat: scale(self.lat),
        }
    }
}

impl GeoPoint {
    pub fn new(lng: i64, lat: i64) -> Self {
        GeoPoint { lng, lat }
    }

    pub fn degrees(&self) -> Degrees {
        Degrees {
            lng: unscale(self.lng),
            lat: unscale(self.lat),
        }
    }

    // Great-circle distance in metres, only used to apportion a route's
    // distance across its legs.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        Haversine.distance(Point::from(*self), Point::from(*other))
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        let degrees = point.degrees();
        Point::new(degrees.lng, degrees.lat)
    }
}

impl From<Degrees> for GeoPoint {
    fn from(degrees: Degrees) -> Self {
        degrees.scaled()
    }
}

impl From<geo_types::Coord<f64>> for Degrees {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        Degrees {
            lng: coord.x,
            lat: coord.y,
        }
    }
}

impl From<GeoPoint> for geo_types::Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        let degrees = point.degrees();
        geo_types::Coord {
            x: degrees.lng,
            y: degrees.lat,
        }
    }
}

/// Flattens a sequence of points into `[lng, lat, lng, lat, ...]`.
pub fn flatten(points: &[GeoPoint]) -> Vec<i64> {
    points.iter().flat_map(|p| [p.lng, p.lat]).collect()
}

/// Inverse of [`flatten`]; a trailing odd value is dropped.
pub fn pair(values: &[i64]) -> Vec<GeoPoint> {
    values
        .chunks_exact(2)
        .map(|c| GeoPoint::new(c[0], c[1]))
        .collect()
}
