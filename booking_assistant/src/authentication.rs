use crate::config::Config;
use crate::retrieve::authentication::{BearerAuthentication, KeyAuthentication};

pub fn token_key(config: &Config) -> KeyAuthentication {
    KeyAuthentication {
        parameter: "key",
        key: config.api_key.clone(),
    }
}

pub fn dispatch(token: &str) -> BearerAuthentication {
    BearerAuthentication {
        token: token.to_string(),
    }
}

pub fn mapbox(config: &Config) -> KeyAuthentication {
    KeyAuthentication {
        parameter: "access_token",
        key: config.mapbox_access_token.clone(),
    }
}
