// Worker pool serving requests from a `tiny_http::Server`.
//
// `tiny_http` accepts connections and parses requests on its own threads;
// the fixed set of workers started here pulls complete requests with
// `recv_timeout`, checking the `keep_running` flag between polls. Slow or idle
// clients therefore never occupy a worker, and the number of handler threads
// is bounded by `ServerConfig::workers`.
//
// Each worker copies the request (`http::Request::from_tiny`), runs it
// through `routes::handle` and responds. A panic inside a handler becomes a
// 500 response instead of a dropped request.
//
// The only state shared between workers is the `tiny_http::Server`, the
// immutable `CorsPolicy` and the stop flag, each behind an `Arc`.

use std::net::SocketAddr;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tiny_http::Server;

use crate::config::ServerConfig;
use crate::cors::CorsPolicy;
use crate::error::ServerError;
use crate::http::{Request, Response};
use crate::routes;

const RECV_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Handle returned by `start_server` to control the running server.
pub struct ServerHandle {
    keep_running: Arc<AtomicBool>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl ServerHandle {
    /// Signal the workers to stop and wait for them to exit. The listening
    /// socket closes once the last worker is gone.
    pub fn stop(mut self) {
        self.keep_running.store(false, Ordering::SeqCst);
        self.join();
    }

    /// Block until every worker exits.
    pub fn wait(mut self) {
        self.join();
    }

    fn join(&mut self) {
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

/// Start the server on background threads. Returns a handle for stopping it
/// and the bound address (useful with port 0).
pub fn start_server(config: ServerConfig) -> Result<(ServerHandle, SocketAddr), ServerError> {
    let bind_error = |reason: String| ServerError::Bind {
        addr: format!("{}:{}", config.host, config.port),
        reason,
    };
    let server = Server::http((config.host.as_str(), config.port)).map_err(|e| bind_error(e.to_string()))?;
    let addr = server
        .server_addr()
        .to_ip()
        .ok_or_else(|| bind_error("not an IP listener".to_string()))?;

    let server = Arc::new(server);
    let cors = Arc::new(CorsPolicy::from_origins(&config.allowed_origins));
    log::info!("CORS policy: {:?}", cors);

    let keep_running = Arc::new(AtomicBool::new(true));
    let worker_count = config.workers.max(1);
    let mut workers = Vec::with_capacity(worker_count);
    for id in 0..worker_count {
        let server = server.clone();
        let cors = cors.clone();
        let running = keep_running.clone();
        let spawned = thread::Builder::new()
            .name(format!("harmony-worker-{}", id))
            .spawn(move || worker_loop(&server, &cors, &running));
        match spawned {
            Ok(worker) => workers.push(worker),
            Err(e) => {
                ServerHandle {
                    keep_running,
                    workers,
                }
                .stop();
                return Err(e.into());
            }
        }
    }
    log::debug!("Started {} workers", worker_count);

    Ok((
        ServerHandle {
            keep_running,
            workers,
        },
        addr,
    ))
}

fn worker_loop(server: &Server, cors: &CorsPolicy, keep_running: &AtomicBool) {
    while keep_running.load(Ordering::SeqCst) {
        match server.recv_timeout(RECV_POLL_INTERVAL) {
            Ok(Some(request)) => serve_request(request, cors),
            Ok(None) => {}
            Err(e) => {
                log::error!("Receiving requests failed, stopping worker: {}", e);
                break;
            }
        }
    }
}

fn serve_request(mut raw: tiny_http::Request, cors: &CorsPolicy) {
    let response = match Request::from_tiny(&mut raw) {
        Ok(request) => {
            let response = dispatch(&request, cors);
            log::info!("{} {} -> {}", request.method, request.path, response.status);
            response
        }
        Err(ServerError::PayloadTooLarge(length)) => {
            log::warn!("Rejected {} byte request body", length);
            Response::error(413, "Request body too large")
        }
        Err(e) => {
            log::warn!("Could not read request from {:?}: {}", raw.remote_addr(), e);
            Response::error(400, "Could not read request body")
        }
    };

    if let Err(e) = raw.respond(response.into_tiny()) {
        log::debug!("Failed to send response: {}", e);
    }
}

fn dispatch(request: &Request, cors: &CorsPolicy) -> Response {
    panic::catch_unwind(AssertUnwindSafe(|| routes::handle(request, cors))).unwrap_or_else(|_| {
        log::error!("Handler panicked for {} {}", request.method, request.path);
        Response::error(500, "Internal server error")
            .with_headers(cors.response_headers(request.header("origin")))
    })
}
