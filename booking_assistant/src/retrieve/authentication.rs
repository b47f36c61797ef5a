use reqwest::blocking::RequestBuilder;

pub trait Authentication {
    fn apply(&self, request_builder: RequestBuilder) -> RequestBuilder;
}

// Passes a key as a query parameter, ie mapbox's `access_token` or the
// dispatch token endpoint's `key`.  Applied here rather than baked into the
// endpoint so it never shows up in a logged url.
pub struct KeyAuthentication {
    pub parameter: &'static str,
    pub key: String,
}

impl Authentication for KeyAuthentication {
    fn apply(&self, request_builder: RequestBuilder) -> RequestBuilder {
        request_builder.query(&[(self.parameter, self.key.as_str())])
    }
}

pub struct BearerAuthentication {
    pub token: String,
}

impl Authentication for BearerAuthentication {
    fn apply(&self, request_builder: RequestBuilder) -> RequestBuilder {
        request_builder.bearer_auth(&self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::blocking::Client;
    use reqwest::header::AUTHORIZATION;

    #[test]
    fn bearer_sets_the_authorization_header() {
        let auth = BearerAuthentication {
            token: String::from("abc.def.ghi"),
        };
        let request = auth
            .apply(Client::new().get("https://dispatch.example.com/orders"))
            .build()
            .unwrap();
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer abc.def.ghi");
    }

    #[test]
    fn key_is_added_to_the_query() {
        let auth = KeyAuthentication {
            parameter: "access_token",
            key: String::from("pk.secret"),
        };
        let request = auth
            .apply(Client::new().get("https://api.mapbox.com/geocoding?country=nz"))
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://api.mapbox.com/geocoding?country=nz&access_token=pk.secret"
        );
    }
}
