// The document posted to the dispatch order endpoint.

use serde::Serialize;

use crate::phone;
use crate::route::{Meta, RouteLeg, RouteNode, PASSENGER_ITEM};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Passenger {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Passenger {
    // Phone numbers are always stored in local format.
    pub fn new(name: &str, phone: &str, email: Option<&str>) -> Self {
        Passenger {
            name: name.to_string(),
            phone: phone::normalize(phone),
            email: email.map(String::from),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Requirements {
    pub seats: u32,
    pub wheelchairs: u32,
    pub luggage: u32,
}

impl Default for Requirements {
    fn default() -> Self {
        Requirements {
            seats: 1,
            wheelchairs: 0,
            luggage: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Item {
    pub seq: usize,
    pub passenger: Passenger,
    pub requirements: Requirements,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Route {
    pub nodes: Vec<RouteNode>,
    pub legs: Vec<RouteLeg>,
    pub meta: Meta,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BookingOrder {
    pub items: Vec<Item>,
    pub route: Route,
}

impl BookingOrder {
    pub fn new(
        passenger: Passenger,
        requirements: Requirements,
        nodes: Vec<RouteNode>,
        legs: Vec<RouteLeg>,
        meta: Meta,
    ) -> Self {
        BookingOrder {
            items: vec![Item {
                seq: PASSENGER_ITEM,
                passenger,
                requirements,
            }],
            route: Route { nodes, legs, meta },
        }
    }
}
