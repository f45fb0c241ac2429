//! Shared Pomodoro room server.
//!
//! Rooms are created over HTTP; participants join them and drive the shared timer
//! over a WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin shuchu-server
//! cargo run --bin shuchu-server -- --host 0.0.0.0 --port 3000 --tick-interval-ms 500
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use shuchu_server::{
    domain::{MessagePusher, RoomRepository},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::{Server, ServerConfig, state::AppState},
    usecase::TickTimersUseCase,
};
use shuchu_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "shuchu-server")]
#[command(about = "Shared Pomodoro room server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3000")]
    port: u16,

    /// Ticker cadence in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    tick_interval_ms: u64,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. Clock
    // 4. UseCases (AppState + ticker)
    // 5. Server
    let repository: Arc<dyn RoomRepository> = Arc::new(InMemoryRoomRepository::new());
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let tick_timers_usecase = Arc::new(TickTimersUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let app_state = AppState::new(repository, message_pusher, clock);

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        tick_interval: Duration::from_millis(args.tick_interval_ms),
    };

    let server = Server::new(app_state, tick_timers_usecase);
    if let Err(e) = server.run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
