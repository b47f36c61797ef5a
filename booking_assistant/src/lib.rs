mod authentication;
mod endpoints;
mod retrieve;

pub mod booking;
pub mod config;
pub mod error;
pub mod geo_point;
pub mod geolocate;
pub mod json;
pub mod order;
pub mod phone;
pub mod pickup_time;
pub mod route;
pub mod token;

pub use config::Config;
pub use error::{Error, Result};
pub use retrieve::fetch::client;

use reqwest::blocking::Client;
use tracing::warn;

use booking::Receipt;
use geo_point::GeoPoint;
use geolocate::{Directions, Mapbox, Place};
use order::{BookingOrder, Passenger, Requirements};
use route::{Meta, PtsEncoding};

/// Everything needed to turn two addresses into a booking.
#[derive(Clone, Debug)]
pub struct Request {
    pub pickup: String,
    pub destination: String,
    pub passenger: Passenger,
    pub requirements: Requirements,
    /// epoch seconds, 0 for as soon as possible
    pub pickup_time: i64,
    pub instructions: String,
    /// Turn every point along the route into a pass-through node rather than
    /// sending it as the leg's trace.
    pub waypoints: bool,
    pub pts_encoding: PtsEncoding,
    /// Book a direct pickup to destination route when mapbox can't find one.
    pub straight_line_fallback: bool,
}

/// Geocodes both ends of the trip, looks up the route between them and
/// builds the order document.
pub fn prepare(mapbox: &Mapbox, request: &Request) -> Result<BookingOrder> {
    let pickup = mapbox.locate(&request.pickup)?;
    let destination = mapbox.locate(&request.destination)?;

    let directions = match mapbox.directions(pickup.location, destination.location) {
        Ok(directions) => directions,
        Err(Error::NoRoute) if request.straight_line_fallback => {
            warn!("no route found, booking a direct trip instead");
            Directions::straight(pickup.location.scaled(), destination.location.scaled())
        }
        Err(e) => return Err(e),
    };

    Ok(assemble(&pickup, &destination, &directions, request))
}

/// Builds the order document from already resolved places and directions.
pub fn assemble(
    pickup: &Place,
    destination: &Place,
    directions: &Directions,
    request: &Request,
) -> BookingOrder {
    let pickup_point = pickup.location.scaled();
    let destination_point = destination.location.scaled();

    let node_points: &[GeoPoint] = if request.waypoints {
        &directions.points
    } else {
        &[]
    };
    let nodes = route::build(
        &pickup.name,
        &destination.name,
        pickup_point,
        destination_point,
        request.pickup_time,
        &request.instructions,
        node_points,
    );

    let meta = Meta {
        dist: directions.distance,
        dur: directions.duration,
    };
    let legs = route::build_legs(&nodes, &directions.points, meta, request.pts_encoding);

    BookingOrder::new(
        request.passenger.clone(),
        request.requirements,
        nodes,
        legs,
        meta,
    )
}

/// Gets a fresh token and submits the order with it.
pub fn book(client: &Client, config: &Config, order: &BookingOrder) -> Result<Receipt> {
    let token = token::acquire(client, config)?;
    booking::submit(client, config, &token, order)
}
