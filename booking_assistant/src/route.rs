// Builds the node/leg structure the dispatch api uses to describe a trip.
//
// A route is an ordered list of nodes (stops), starting with the pickup and
// finishing with the drop-off, joined by legs.  Passengers get on at the
// first node and off at the last, anything in between is a pass-through
// waypoint.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

use crate::geo_point::{self, GeoPoint};

/// The passenger item every action refers to; the tools only ever book a
/// single passenger per order.
pub const PASSENGER_ITEM: usize = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Board,
    Alight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub action: ActionKind,
    pub item_seq: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteNode {
    pub seq: usize,
    pub name: String,
    pub location: GeoPoint,
    /// Arrival target in epoch seconds, 0 when unset.
    pub time: i64,
    pub info: String,
    pub actions: Vec<Action>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// metres
    pub dist: u64,
    /// seconds
    pub dur: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteLeg {
    pub from_seq: usize,
    pub to_seq: usize,
    pub meta: Meta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pts: Option<Trace>,
}

// How a leg's geometry trace is written out.  It isn't known which of these
// the order endpoint actually accepts so it's left up to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PtsEncoding {
    /// `[lng, lat, lng, lat, ...]`
    #[default]
    Flat,
    /// `[[lng, lat], [lng, lat], ...]`
    Pairs,
    /// `[{"lng": .., "lat": ..}, ...]`
    Objects,
    /// An encoded polyline string at micro-degree precision.
    Polyline,
    /// Leave `pts` off altogether.
    None,
}

impl FromStr for PtsEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(PtsEncoding::Flat),
            "pairs" => Ok(PtsEncoding::Pairs),
            "objects" => Ok(PtsEncoding::Objects),
            "polyline" => Ok(PtsEncoding::Polyline),
            "none" => Ok(PtsEncoding::None),
            other => Err(format!(
                "unknown pts encoding '{}', expected one of flat, pairs, objects, polyline, none",
                other
            )),
        }
    }
}

impl fmt::Display for PtsEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PtsEncoding::Flat => "flat",
            PtsEncoding::Pairs => "pairs",
            PtsEncoding::Objects => "objects",
            PtsEncoding::Polyline => "polyline",
            PtsEncoding::None => "none",
        };
        f.write_str(name)
    }
}

/// Polyline precision used for [`PtsEncoding::Polyline`], matches the
/// micro-degree scale so nothing is lost.
pub const TRACE_POLYLINE_PRECISION: u32 = 6;

/// A leg's geometry, serialized according to its encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    pub points: Vec<GeoPoint>,
    pub encoding: PtsEncoding,
}

impl Trace {
    pub fn new(points: Vec<GeoPoint>, encoding: PtsEncoding) -> Option<Trace> {
        if points.is_empty() || encoding == PtsEncoding::None {
            return None;
        }
        Some(Trace { points, encoding })
    }
}

impl Serialize for Trace {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.encoding {
            PtsEncoding::Flat => geo_point::flatten(&self.points).serialize(serializer),
            PtsEncoding::Pairs => {
                let mut seq = serializer.serialize_seq(Some(self.points.len()))?;
                for p in &self.points {
                    seq.serialize_element(&[p.lng, p.lat])?;
                }
                seq.end()
            }
            PtsEncoding::Objects => {
                let mut seq = serializer.serialize_seq(Some(self.points.len()))?;
                for p in &self.points {
                    seq.serialize_element(&LngLat(p))?;
                }
                seq.end()
            }
            PtsEncoding::Polyline => {
                let coords = self.points.iter().map(|p| geo_types::Coord::from(*p));
                let encoded = polyline::encode_coordinates(coords, TRACE_POLYLINE_PRECISION)
                    .map_err(|e| S::Error::custom(e.to_string()))?;
                serializer.serialize_str(&encoded)
            }
            PtsEncoding::None => serializer.serialize_none(),
        }
    }
}

struct LngLat<'a>(&'a GeoPoint);

impl<'a> Serialize for LngLat<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("lng", &self.0.lng)?;
        map.serialize_entry("lat", &self.0.lat)?;
        map.end()
    }
}

/// Builds the route nodes for a single passenger trip.
///
/// The pickup boards passenger item 0 and carries the requested pickup time
/// and the driver instructions.  When `route_points` has more than the two
/// endpoints every interior point becomes a pass-through node.  The
/// destination alights passenger item 0.
pub fn build(
    pickup_name: &str,
    destination_name: &str,
    pickup_point: GeoPoint,
    destination_point: GeoPoint,
    pickup_epoch: i64,
    instructions: &str,
    route_points: &[GeoPoint],
) -> Vec<RouteNode> {
    let interior: &[GeoPoint] = if route_points.len() > 2 {
        &route_points[1..route_points.len() - 1]
    } else {
        &[]
    };

    let mut nodes = Vec::with_capacity(interior.len() + 2);
    nodes.push(RouteNode {
        seq: 0,
        name: pickup_name.to_string(),
        location: pickup_point,
        time: pickup_epoch,
        info: instructions.to_string(),
        actions: vec![Action {
            action: ActionKind::Board,
            item_seq: PASSENGER_ITEM,
        }],
    });

    for point in interior {
        nodes.push(RouteNode {
            seq: nodes.len(),
            name: String::new(),
            location: *point,
            time: 0,
            info: String::new(),
            actions: Vec::new(),
        });
    }

    nodes.push(RouteNode {
        seq: nodes.len(),
        name: destination_name.to_string(),
        location: destination_point,
        time: 0,
        info: String::new(),
        actions: vec![Action {
            action: ActionKind::Alight,
            item_seq: PASSENGER_ITEM,
        }],
    });

    nodes
}

/// Joins consecutive nodes with legs.
///
/// With just the two endpoints there is a single leg carrying the whole
/// route and its full geometry trace.  Otherwise `total` is shared between
/// the legs by straight-line length, with any rounding left over put on the
/// last leg so the legs always add up to `total`.
pub fn build_legs(
    nodes: &[RouteNode],
    route_points: &[GeoPoint],
    total: Meta,
    encoding: PtsEncoding,
) -> Vec<RouteLeg> {
    if nodes.len() < 2 {
        return Vec::new();
    }

    if nodes.len() == 2 {
        return vec![RouteLeg {
            from_seq: nodes[0].seq,
            to_seq: nodes[1].seq,
            meta: total,
            pts: Trace::new(route_points.to_vec(), encoding),
        }];
    }

    let lengths = nodes
        .windows(2)
        .map(|w| w[0].location.distance_to(&w[1].location))
        .collect::<Vec<_>>();
    let dist = apportion(total.dist, &lengths);
    let dur = apportion(total.dur, &lengths);

    nodes
        .windows(2)
        .enumerate()
        .map(|(i, w)| RouteLeg {
            from_seq: w[0].seq,
            to_seq: w[1].seq,
            meta: Meta {
                dist: dist[i],
                dur: dur[i],
            },
            pts: Trace::new(vec![w[0].location, w[1].location], encoding),
        })
        .collect()
}

// Splits `total` in proportion to `weights`.  The result always sums to
// `total`; if every weight is zero the split is even.
fn apportion(total: u64, weights: &[f64]) -> Vec<u64> {
    if weights.is_empty() {
        return Vec::new();
    }

    let sum: f64 = weights.iter().sum();
    let mut shares = if sum > 0.0 {
        weights
            .iter()
            .map(|w| (total as f64 * w / sum).floor() as u64)
            .collect::<Vec<_>>()
    } else {
        vec![total / weights.len() as u64; weights.len()]
    };

    let assigned: u64 = shares.iter().sum();
    if let Some(last) = shares.last_mut() {
        *last += total.saturating_sub(assigned);
    }
    shares
}

/// Total distance and duration across a set of legs.
pub fn total(legs: &[RouteLeg]) -> Meta {
    legs.iter().fold(Meta::default(), |acc, leg| Meta {
        dist: acc.dist + leg.meta.dist,
        dur: acc.dur + leg.meta.dur,
    })
}
