// Request and response values passed to `routes::handle`, plus the
// conversions to and from `tiny_http`.
//
// `tiny_http` owns the wire protocol (framing, keep-alive, `Expect:
// 100-continue`, bodyless HEAD replies). This module only copies a received
// request into an owned `Request`, enforcing the body limit, and turns a
// `Response` back into a `tiny_http::Response`. Query strings arrive raw, so
// they are url-decoded here.

use std::io::{Cursor, Read};

use serde::Serialize;

use crate::error::ServerError;

/// Upper bound on a request body
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Header names are stored lowercased.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    /// Build a request from a method and a target such as `/quick-harmony?pitch=C4`.
    pub fn new(method: &str, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (target, Vec::new()),
        };
        Self {
            method: method.to_ascii_uppercase(),
            path: path.to_string(),
            query,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_ascii_lowercase(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Copy a received request, reading its body.
    ///
    /// A declared length over [`MAX_BODY_BYTES`] is refused before any body
    /// byte is read, so a client waiting on `100 Continue` never gets one.
    pub fn from_tiny(raw: &mut tiny_http::Request) -> Result<Self, ServerError> {
        let mut request = Request::new(&raw.method().to_string(), raw.url());
        for header in raw.headers() {
            request = request.with_header(header.field.as_str().as_str(), header.value.as_str());
        }

        if let Some(length) = raw.body_length() {
            if length > MAX_BODY_BYTES {
                return Err(ServerError::PayloadTooLarge(length));
            }
        }
        let mut body = Vec::new();
        raw.as_reader()
            .take(MAX_BODY_BYTES as u64 + 1)
            .read_to_end(&mut body)?;
        if body.len() > MAX_BODY_BYTES {
            return Err(ServerError::PayloadTooLarge(body.len()));
        }
        request.body = body;

        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

impl Response {
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Serialize `value` as the JSON body.
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                body,
            },
            Err(e) => {
                log::error!("Failed to serialize response: {}", e);
                Self::error(500, "Internal server error")
            }
        }
    }

    /// `{"detail": ...}` error body
    pub fn error(status: u16, detail: &str) -> Self {
        let body = serde_json::to_vec(&ErrorBody { detail }).unwrap_or_default();
        Self {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body,
        }
    }

    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Headers `tiny_http` cannot represent are dropped with a warning.
    pub fn into_tiny(self) -> tiny_http::Response<Cursor<Vec<u8>>> {
        let mut response = tiny_http::Response::from_data(self.body).with_status_code(self.status);
        for (name, value) in &self.headers {
            match tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()) {
                Ok(header) => response.add_header(header),
                Err(()) => log::warn!("Dropping unencodable response header '{}'", name),
            }
        }
        response
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (percent_decode(key), percent_decode(value)),
            None => (percent_decode(pair), String::new()),
        })
        .collect()
}

/// Decode `application/x-www-form-urlencoded` text: `+` is a space, `%XX` a byte.
/// Invalid escapes are kept literally.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(high), Some(low)) => {
                        decoded.push(high << 4 | low);
                        i += 3;
                    }
                    _ => {
                        decoded.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                decoded.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_decoding() {
        let request = Request::new("post", "/quick-harmony?pitch=D%235&harmony_type=parallel_fourth&x");
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/quick-harmony");
        assert_eq!(request.query_param("pitch"), Some("D#5"));
        assert_eq!(request.query_param("harmony_type"), Some("parallel_fourth"));
        assert_eq!(request.query_param("x"), Some(""));
        assert_eq!(request.query_param("missing"), None);
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let request = Request::new("GET", "/health")
            .with_header("Origin", "http://a.test")
            .with_header("HOST", "localhost");
        assert_eq!(request.header("origin"), Some("http://a.test"));
        assert_eq!(request.header("Host"), Some("localhost"));
        assert_eq!(request.header("referer"), None);
    }

    #[test]
    fn test_percent_decode_edge_cases() {
        assert_eq!(percent_decode("a+b"), "a b");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%41%62"), "Ab");
    }

    #[test]
    fn test_error_body() {
        let response = Response::error(404, "Not Found");
        assert_eq!(response.status, 404);
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.body, br#"{"detail":"Not Found"}"#);
    }

    #[test]
    fn test_into_tiny_keeps_status_and_headers() {
        let response = Response::empty(204)
            .with_headers(vec![("Access-Control-Allow-Origin".to_string(), "http://a.test".to_string())])
            .into_tiny();
        assert_eq!(response.status_code().0, 204);
        assert!(response
            .headers()
            .iter()
            .any(|h| h.field.equiv("Access-Control-Allow-Origin") && h.value.as_str() == "http://a.test"));
    }
}
