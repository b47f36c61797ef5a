// Geocoding and driving directions, both from mapbox.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info};

use crate::authentication;
use crate::config::Config;
use crate::endpoints::mapbox;
use crate::error::{Error, Result};
use crate::geo_point::{Degrees, GeoPoint};
use crate::retrieve::authentication::KeyAuthentication;
use crate::retrieve::fetch;

/// Mapbox returns polylines at 5 decimal places unless asked otherwise.
pub const POLYLINE_PRECISION: u32 = 5;

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub place_name: Option<String>,
    pub center: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
pub struct DirectionsRoute {
    pub distance: f64,
    pub duration: f64,
    pub geometry: String,
}

/// A geocoded address.
#[derive(Clone, Debug, PartialEq)]
pub struct Place {
    pub name: String,
    pub location: Degrees,
}

/// The first route mapbox suggests between two points.
#[derive(Clone, Debug, PartialEq)]
pub struct Directions {
    /// metres
    pub distance: u64,
    /// seconds
    pub duration: u64,
    pub points: Vec<GeoPoint>,
}

impl Directions {
    // A route with no geometry for when directions aren't available.
    pub fn straight(from: GeoPoint, to: GeoPoint) -> Self {
        Directions {
            distance: 0,
            duration: 0,
            points: vec![from, to],
        }
    }
}

pub struct Mapbox<'a> {
    client: &'a Client,
    base_url: String,
    country: Option<String>,
    authentication: KeyAuthentication,
}

impl<'a> Mapbox<'a> {
    pub fn new(client: &'a Client, config: &Config) -> Self {
        Mapbox {
            client,
            base_url: config.mapbox_url.clone(),
            country: config.geocode_country.clone(),
            authentication: authentication::mapbox(config),
        }
    }

    pub fn locate(&self, address: &str) -> Result<Place> {
        let endpoint = mapbox::geocoding(&self.base_url, address, self.country.as_deref());
        let response: GeocodeResponse =
            fetch::get_json(self.client, &endpoint, &self.authentication)?;
        let place = place_from_response(address, response)?;
        info!(
            "located '{}' at {}, {}",
            address, place.location.lng, place.location.lat
        );
        Ok(place)
    }

    pub fn directions(&self, from: Degrees, to: Degrees) -> Result<Directions> {
        let endpoint = mapbox::directions(&self.base_url, &[from, to]);
        let response = fetch::get(self.client, &endpoint, &self.authentication)?;
        let status = response.status();
        let body = response.text()?;
        let directions = directions_from_reply(status, &body)?;
        info!(
            "route is {}m, {}s with {} points",
            directions.distance,
            directions.duration,
            directions.points.len()
        );
        Ok(directions)
    }
}

// Features is an array!  Assume the first element is the one we want.
pub fn place_from_response(address: &str, response: GeocodeResponse) -> Result<Place> {
    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or_else(|| Error::NoGeocode(address.to_string()))?;

    if feature.center.len() < 2 {
        return Err(Error::NoGeocode(address.to_string()));
    }

    Ok(Place {
        name: feature.place_name.unwrap_or_else(|| address.to_string()),
        location: Degrees::new(feature.center[0], feature.center[1]),
    })
}

// Mapbox answers "no route" with a 422 and a NoRoute or NoSegment code
// rather than an empty 200, both end up as Error::NoRoute.
pub fn directions_from_reply(status: StatusCode, body: &str) -> Result<Directions> {
    if status.is_success() {
        let response: DirectionsResponse = serde_json::from_str(body)?;
        return directions_from_response(response);
    }

    let code = serde_json::from_str::<DirectionsResponse>(body)
        .ok()
        .and_then(|response| response.code);
    match code.as_deref() {
        Some("NoRoute") | Some("NoSegment") => Err(Error::NoRoute),
        _ if status == StatusCode::UNPROCESSABLE_ENTITY => Err(Error::NoRoute),
        _ => Err(Error::Mapbox {
            status: status.as_u16(),
            body: body.to_string(),
        }),
    }
}

// Only the first route is used, alternatives aren't requested.
pub fn directions_from_response(response: DirectionsResponse) -> Result<Directions> {
    let route = response.routes.into_iter().next().ok_or(Error::NoRoute)?;
    let points = decode(&route.geometry, POLYLINE_PRECISION)?;
    debug!("decoded {} points from route geometry", points.len());
    Ok(Directions {
        distance: route.distance.max(0.0).round() as u64,
        duration: route.duration.max(0.0).round() as u64,
        points,
    })
}

/// Decodes a polyline straight into micro-degrees.
pub fn decode(geometry: &str, precision: u32) -> Result<Vec<GeoPoint>> {
    let line = polyline::decode_polyline(geometry, precision)
        .map_err(|e| Error::Polyline(e.to_string()))?;
    Ok(line
        .0
        .into_iter()
        .map(|coord| Degrees::from(coord).scaled())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_the_first_feature() {
        let response: GeocodeResponse = serde_json::from_str(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"place_name": "1 Lambton Quay, Wellington", "center": [174.776, -41.279]},
                    {"place_name": "Lambton, Auckland", "center": [174.7, -36.8]}
                ]
            }"#,
        )
        .unwrap();
        let place = place_from_response("1 Lambton Quay", response).unwrap();
        assert_eq!(place.name, "1 Lambton Quay, Wellington");
        assert_eq!(place.location, Degrees::new(174.776, -41.279));
    }

    #[test]
    fn no_features_is_an_error() {
        let response: GeocodeResponse = serde_json::from_str(r#"{"features": []}"#).unwrap();
        match place_from_response("nowhere", response) {
            Err(Error::NoGeocode(address)) => assert_eq!(address, "nowhere"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn decodes_the_route_geometry() {
        // The example from the polyline algorithm documentation.
        let response: DirectionsResponse = serde_json::from_str(
            r#"{
                "code": "Ok",
                "routes": [{
                    "distance": 15230.4,
                    "duration": 1139.6,
                    "geometry": "_p~iF~ps|U_ulLnnqC_mqNvxq`@"
                }]
            }"#,
        )
        .unwrap();
        let directions = directions_from_response(response).unwrap();
        assert_eq!(directions.distance, 15230);
        assert_eq!(directions.duration, 1140);
        assert_eq!(
            directions.points,
            vec![
                GeoPoint::new(-120200000, 38500000),
                GeoPoint::new(-120950000, 40700000),
                GeoPoint::new(-126453000, 43252000),
            ]
        );
    }

    #[test]
    fn no_routes_is_an_error() {
        let response: DirectionsResponse =
            serde_json::from_str(r#"{"code": "NoRoute", "routes": []}"#).unwrap();
        assert!(matches!(directions_from_response(response), Err(Error::NoRoute)));

        let response: DirectionsResponse =
            serde_json::from_str(r#"{"code": "NoSegment", "message": "x"}"#).unwrap();
        assert!(matches!(directions_from_response(response), Err(Error::NoRoute)));
    }

    #[test]
    fn unroutable_replies_are_no_route() {
        let no_segment = r#"{"code": "NoSegment", "message": "No suitable edges near location"}"#;
        assert!(matches!(
            directions_from_reply(StatusCode::UNPROCESSABLE_ENTITY, no_segment),
            Err(Error::NoRoute)
        ));

        let no_route = r#"{"code": "NoRoute", "message": "No route found"}"#;
        assert!(matches!(
            directions_from_reply(StatusCode::UNPROCESSABLE_ENTITY, no_route),
            Err(Error::NoRoute)
        ));

        assert!(matches!(
            directions_from_reply(StatusCode::OK, r#"{"code": "Ok", "routes": []}"#),
            Err(Error::NoRoute)
        ));
    }

    #[test]
    fn other_failures_keep_the_status() {
        let body = r#"{"message": "Not Authorized - Invalid Token"}"#;
        match directions_from_reply(StatusCode::UNAUTHORIZED, body) {
            Err(Error::Mapbox { status, body: text }) => {
                assert_eq!(status, 401);
                assert_eq!(text, body);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn successful_reply_is_decoded() {
        let body = r#"{"code": "Ok", "routes": [{"distance": 10.0, "duration": 2.0, "geometry": "_p~iF~ps|U_ulLnnqC"}]}"#;
        let directions = directions_from_reply(StatusCode::OK, body).unwrap();
        assert_eq!(directions.distance, 10);
        assert_eq!(directions.points.len(), 2);
    }

    #[test]
    fn straight_route_has_just_the_endpoints() {
        let a = GeoPoint::new(1, 2);
        let b = GeoPoint::new(3, 4);
        let directions = Directions::straight(a, b);
        assert_eq!(directions.points, vec![a, b]);
        assert_eq!(directions.distance, 0);
    }
}
