pub mod dispatch {
    use crate::retrieve::endpoint::{BasicEndpoint, QueryEndpoint};

    // The token service issues a token for any subject.
    static SUBJECT_WILDCARD: &str = "*";

    pub fn token(token_url: &str, ttl: Option<u64>) -> QueryEndpoint {
        let endpoint = QueryEndpoint::new(token_url).param("sub", SUBJECT_WILDCARD);
        match ttl {
            Some(ttl) => endpoint.param("ttl", &ttl.to_string()),
            None => endpoint,
        }
    }

    pub fn orders(order_url: &str) -> BasicEndpoint {
        BasicEndpoint {
            base_url: order_url.to_string(),
        }
    }
}

pub mod mapbox {
    use crate::geo_point::Degrees;
    use crate::retrieve::endpoint::QueryEndpoint;

    pub fn geocoding(base_url: &str, address: &str, country: Option<&str>) -> QueryEndpoint {
        let endpoint = QueryEndpoint::new(base_url)
            .segment("geocoding")
            .segment("v5")
            .segment("mapbox.places")
            .segment(&format!("{}.json", address))
            .param("limit", "1");
        match country {
            Some(country) => endpoint.param("country", country),
            None => endpoint,
        }
    }

    pub fn directions(base_url: &str, coordinates: &[Degrees]) -> QueryEndpoint {
        let coords = coordinates
            .iter()
            .map(|x| format!("{},{}", x.lng, x.lat))
            .collect::<Vec<_>>()
            .join(";");
        QueryEndpoint::new(base_url)
            .segment("directions")
            .segment("v5")
            .segment("mapbox")
            .segment("driving")
            .segment(&coords)
            .param("alternatives", "false")
            .param("steps", "false")
            .param("geometries", "polyline")
            .param("overview", "full")
    }
}
