use tracing::warn;
use url::Url;

pub trait Endpoint {
    fn url(&self) -> String;
}

pub struct BasicEndpoint {
    pub base_url: String,
}

impl Endpoint for BasicEndpoint {
    fn url(&self) -> String {
        self.base_url.clone()
    }
}

// An endpoint with extra path segments and query parameters, both of which
// get percent-encoded.  Used for the mapbox lookups where a free-text
// address ends up in the path.
pub struct QueryEndpoint {
    pub base_url: String,
    pub segments: Vec<String>,
    pub params: Vec<(String, String)>,
}

impl QueryEndpoint {
    pub fn new(base_url: &str) -> Self {
        QueryEndpoint {
            base_url: base_url.to_string(),
            segments: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn segment(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn param(mut self, name: &str, value: &str) -> Self {
        self.params.push((name.to_string(), value.to_string()));
        self
    }
}

impl Endpoint for QueryEndpoint {
    fn url(&self) -> String {
        let mut url = match Url::parse(&self.base_url) {
            Ok(url) => url,
            // Hand back the base url unchanged, the request itself will fail
            // with a more useful error than we can give here.
            Err(e) => {
                warn!("invalid base url {}: {}", self.base_url, e);
                return self.base_url.clone();
            }
        };

        if !self.segments.is_empty() {
            if let Ok(mut path) = url.path_segments_mut() {
                path.pop_if_empty();
                path.extend(self.segments.iter());
            }
        }

        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(self.params.iter());
        }

        url.into()
    }
}
