// Integration smoke test for the API server.
//
// Starts the server on an ephemeral localhost port and talks to it over plain
// TCP sockets with hand-written HTTP/1.1 requests, checking status lines,
// CORS headers and JSON bodies end to end. Requests ask for
// `Connection: close` and the client half-closes after writing, so each
// exchange reads until the server hangs up.

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

use harmony_server::schema::{HarmonyResponse, QuickHarmonyResponse};
use harmony_server::{start_server, ServerConfig};
use serde_json::Value;

struct RawResponse {
    status: u16,
    head: String,
    body: String,
}

fn connect(addr: SocketAddr) -> TcpStream {
    let stream = TcpStream::connect(addr).unwrap();
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    stream
}

fn split_response(text: &str) -> RawResponse {
    let (head, body) = text.split_once("\r\n\r\n").unwrap();
    let status = head.split_whitespace().nth(1).unwrap().parse().unwrap();
    RawResponse {
        status,
        head: head.to_string(),
        body: body.to_string(),
    }
}

/// Read one response head, up to and including the blank line.
fn read_head(stream: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut byte = [0u8; 1];
    while !head.ends_with(b"\r\n\r\n") {
        stream.read_exact(&mut byte).unwrap();
        head.push(byte[0]);
    }
    String::from_utf8(head).unwrap()
}

/// Helper: send raw request bytes and read until the server closes.
fn exchange(addr: SocketAddr, raw: &str) -> RawResponse {
    let mut stream = connect(addr);
    stream.write_all(raw.as_bytes()).unwrap();
    stream.shutdown(Shutdown::Write).unwrap();

    let mut text = String::new();
    stream.read_to_string(&mut text).unwrap();
    split_response(&text)
}

fn get(addr: SocketAddr, path: &str) -> RawResponse {
    exchange(
        addr,
        &format!("GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n", path),
    )
}

fn post(addr: SocketAddr, path: &str, body: &str) -> RawResponse {
    exchange(
        addr,
        &format!(
            "POST {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            path,
            body.len(),
            body
        ),
    )
}

fn local_config(origins: &[&str]) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
        workers: 2,
    }
}

#[test]
fn test_server_endpoints() {
    let (handle, addr) = start_server(local_config(&["*"])).unwrap();

    let health = get(addr, "/health");
    assert_eq!(health.status, 200);
    let json: Value = serde_json::from_str(&health.body).unwrap();
    assert_eq!(json["status"], "healthy");

    let types = get(addr, "/harmony-types");
    assert_eq!(types.status, 200);
    let json: Value = serde_json::from_str(&types.body).unwrap();
    assert_eq!(json["harmony_types"].as_array().unwrap().len(), 7);

    let melody = r#"{"melody": [
        {"pitch": "C4", "duration": 1.0, "offset": 0.0},
        {"pitch": "D4", "duration": 1.0, "offset": 1.0},
        {"pitch": "E4", "duration": 1.0, "offset": 2.0},
        {"pitch": "F4", "duration": 1.0, "offset": 3.0},
        {"pitch": "G4", "duration": 1.0, "offset": 4.0}
    ], "harmony_type": "pedal"}"#;
    let generated = post(addr, "/generate-harmony", melody);
    assert_eq!(generated.status, 200);
    let parsed: HarmonyResponse = serde_json::from_str(&generated.body).unwrap();
    assert_eq!(parsed.melody.len(), 5);
    assert_eq!(parsed.harmony.len(), 1);
    assert_eq!(parsed.harmony[0].pitch, "C3");
    assert_eq!(parsed.harmony[0].duration, 5.0);
    assert_eq!(parsed.harmony[0].offset, 0.0);

    let quick = post(addr, "/quick-harmony?pitch=Bb3&harmony_type=parallel_sixth", "");
    assert_eq!(quick.status, 200);
    let parsed: QuickHarmonyResponse = serde_json::from_str(&quick.body).unwrap();
    assert_eq!(parsed.harmony_note.as_deref(), Some("D3"));

    let invalid = post(addr, "/generate-harmony", r#"{"melody": [], "harmony_type": "tritone"}"#);
    assert_eq!(invalid.status, 400);
    assert!(invalid.body.contains("Invalid harmony type: tritone"));

    assert_eq!(get(addr, "/missing").status, 404);

    handle.stop();
}

#[test]
fn test_server_cors_and_malformed_requests() {
    let (handle, addr) = start_server(local_config(&["http://app.test"])).unwrap();

    let allowed = exchange(
        addr,
        "GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\nOrigin: http://app.test\r\n\r\n",
    );
    assert!(allowed
        .head
        .contains("Access-Control-Allow-Origin: http://app.test"));

    let preflight = exchange(
        addr,
        "OPTIONS /generate-harmony HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\nOrigin: http://app.test\r\n\
         Access-Control-Request-Method: POST\r\nAccess-Control-Request-Headers: content-type\r\n\r\n",
    );
    assert_eq!(preflight.status, 204);
    assert!(preflight
        .head
        .contains("Access-Control-Allow-Headers: content-type"));

    let refused = exchange(
        addr,
        "GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\nOrigin: http://elsewhere.test\r\n\r\n",
    );
    assert_eq!(refused.status, 200);
    assert!(!refused.head.contains("Access-Control-Allow-Origin"));

    let garbage = exchange(addr, "NONSENSE\r\n\r\n");
    assert_eq!(garbage.status, 400);

    let too_large = exchange(
        addr,
        "POST /generate-harmony HTTP/1.1\r\nConnection: close\r\nContent-Length: 99999999\r\n\r\n",
    );
    assert_eq!(too_large.status, 413);

    handle.stop();
}

#[test]
fn test_server_protocol_handling() {
    let (handle, addr) = start_server(local_config(&["*"])).unwrap();

    // HEAD gets the GET status and headers but no body
    let head = exchange(
        addr,
        "HEAD /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    );
    assert_eq!(head.status, 200);
    assert!(head.body.is_empty());

    // two requests on one connection
    let both = exchange(
        addr,
        "GET /health HTTP/1.1\r\nHost: localhost\r\n\r\n\
         GET /harmony-types HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    );
    assert_eq!(both.head.matches("HTTP/1.1 200").count(), 1);
    assert_eq!(both.body.matches("HTTP/1.1 200").count(), 1);
    assert!(both.body.contains("\"healthy\""));
    assert!(both.body.contains("parallel_sixth"));

    // the body is only sent after the server agrees to read it
    let body = r#"{"melody": [{"pitch": "E4"}], "harmony_type": "third"}"#;
    let mut stream = connect(addr);
    write!(
        stream,
        "POST /generate-harmony HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
         Content-Type: application/json\r\nContent-Length: {}\r\nExpect: 100-continue\r\n\r\n",
        body.len()
    )
    .unwrap();
    let interim = read_head(&mut stream);
    assert!(interim.starts_with("HTTP/1.1 100"), "got {:?}", interim);
    stream.write_all(body.as_bytes()).unwrap();
    stream.shutdown(Shutdown::Write).unwrap();
    let mut text = String::new();
    stream.read_to_string(&mut text).unwrap();
    let generated = split_response(&text);
    assert_eq!(generated.status, 200);
    let parsed: HarmonyResponse = serde_json::from_str(&generated.body).unwrap();
    assert_eq!(parsed.harmony[0].pitch, "C#4");

    handle.stop();
}

#[test]
fn test_idle_connections_do_not_block_workers() {
    let config = local_config(&["*"]);
    let workers = config.workers;
    let (handle, addr) = start_server(config).unwrap();

    // connections that never finish a request
    let idle: Vec<TcpStream> = (0..workers * 4)
        .map(|_| {
            let mut stream = connect(addr);
            stream.write_all(b"GET /health HTTP/1.1\r\n").unwrap();
            stream
        })
        .collect();

    let health = get(addr, "/health");
    assert_eq!(health.status, 200);
    assert!(health.body.contains("healthy"));

    drop(idle);
    handle.stop();
}
