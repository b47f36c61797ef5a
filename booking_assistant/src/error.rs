use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("token request failed with status {status}: {body}")]
    Auth { status: u16, body: String },

    #[error("token response did not contain a token")]
    MissingToken,

    #[error("booking failed with status {status}: {body}")]
    Booking { status: u16, body: String },

    #[error("booking response did not contain an order id: {0}")]
    MissingOrderId(String),

    // Holds the error with its url stripped, the url carries api keys.
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("failed to parse json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unable to find a location for '{0}'")]
    NoGeocode(String),

    #[error("no route found between pickup and destination")]
    NoRoute,

    #[error("mapbox request failed with status {status}: {body}")]
    Mapbox { status: u16, body: String },

    #[error("unable to decode route geometry: {0}")]
    Polyline(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unable to understand pickup time '{0}'")]
    PickupTime(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::Network(error.without_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::blocking::Client;

    #[test]
    fn network_errors_leave_out_the_url() {
        // Nothing listens on the discard port so this fails without leaving
        // the machine.
        let error = Client::new()
            .get("http://127.0.0.1:9/directions?access_token=pk.secret-token")
            .send()
            .unwrap_err();
        assert!(error.url().is_some());

        let error = Error::from(error);
        let text = error.to_string();
        assert!(text.starts_with("request failed"), "{}", text);
        assert!(!text.contains("pk.secret-token"), "{}", text);
        assert!(!format!("{:?}", error).contains("pk.secret-token"));
        match error {
            Error::Network(inner) => assert!(inner.url().is_none()),
            other => panic!("unexpected {:?}", other),
        }
    }
}
