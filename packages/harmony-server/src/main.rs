// CLI entry point for the Harmony Helper API server.
//
// Usage:
//   harmony-server [OPTIONS]
//     --host <HOST>                 Bind address (env HARMONY_HOST, default 0.0.0.0)
//     --port <PORT>                 Listen port (env HARMONY_PORT, default 8000)
//     --allowed-origins <ORIGINS>   Comma-separated CORS origins (env ALLOWED_ORIGINS, default *)
//     --workers <N>                 Request handler threads (env HARMONY_WORKERS, default 8)
//
// Log verbosity follows RUST_LOG (default `info`).

use clap::Parser;
use harmony_server::config::{parse_origins, DEFAULT_WORKERS};
use harmony_server::{start_server, ServerConfig};

#[derive(Parser)]
#[command(name = "harmony-server")]
#[command(about = "HTTP API that generates harmony lines for melodies")]
struct Cli {
    #[arg(long, env = "HARMONY_HOST", default_value = "0.0.0.0")]
    host: String,
    #[arg(short, long, env = "HARMONY_PORT", default_value_t = 8000)]
    port: u16,
    #[arg(long, env = "ALLOWED_ORIGINS", default_value = "*")]
    allowed_origins: String,
    #[arg(long, env = "HARMONY_WORKERS", default_value_t = DEFAULT_WORKERS)]
    workers: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        allowed_origins: parse_origins(&cli.allowed_origins),
        workers: cli.workers,
    };

    let (handle, addr) = match start_server(config) {
        Ok(result) => result,
        Err(e) => {
            log::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Harmony Helper API listening on http://{}", addr);
    handle.wait();
}
