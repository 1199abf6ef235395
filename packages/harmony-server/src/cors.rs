//! Cross-origin resource sharing.
//!
//! The allowed origins come from configuration as a list of strings; a `*`
//! anywhere in the list allows every origin. Credentials are always allowed,
//! so an allowed origin is echoed back instead of answering with `*`.

const ALLOWED_METHODS: &str = "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT";
const PREFLIGHT_MAX_AGE: &str = "600";

#[derive(Debug, Clone, PartialEq)]
pub enum CorsPolicy {
    AllowAll,
    AllowList(Vec<String>),
}

impl CorsPolicy {
    pub fn from_origins(origins: &[String]) -> Self {
        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            CorsPolicy::AllowAll
        } else {
            CorsPolicy::AllowList(origins.to_vec())
        }
    }

    pub fn allows(&self, origin: &str) -> bool {
        match self {
            CorsPolicy::AllowAll => true,
            CorsPolicy::AllowList(origins) => origins.iter().any(|allowed| allowed == origin),
        }
    }

    /// Headers added to an ordinary response for a request from `origin`
    pub fn response_headers(&self, origin: Option<&str>) -> Vec<(String, String)> {
        match origin {
            Some(origin) if self.allows(origin) => vec![
                header("Access-Control-Allow-Origin", origin),
                header("Access-Control-Allow-Credentials", "true"),
                header("Vary", "Origin"),
            ],
            Some(_) => Vec::new(),
            None if *self == CorsPolicy::AllowAll => {
                vec![header("Access-Control-Allow-Origin", "*")]
            }
            None => Vec::new(),
        }
    }

    /// Headers for a preflight answer, or `None` when the origin is refused
    pub fn preflight_headers(
        &self,
        origin: &str,
        requested_headers: Option<&str>,
    ) -> Option<Vec<(String, String)>> {
        if !self.allows(origin) {
            return None;
        }
        let mut headers = self.response_headers(Some(origin));
        headers.push(header("Access-Control-Allow-Methods", ALLOWED_METHODS));
        headers.push(header("Access-Control-Max-Age", PREFLIGHT_MAX_AGE));
        if let Some(requested) = requested_headers {
            headers.push(header("Access-Control-Allow-Headers", requested));
        }
        Some(headers)
    }
}

fn header(name: &str, value: &str) -> (String, String) {
    (name.to_string(), value.to_string())
}
