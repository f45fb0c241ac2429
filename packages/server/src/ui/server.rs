//! Server execution logic.

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use crate::usecase::TickTimersUseCase;

use super::{
    handler::{create_room, get_room, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
    ticker::spawn_ticker,
};

/// Listen address and tick cadence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub tick_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            tick_interval: Duration::from_secs(1),
        }
    }
}

/// Build the HTTP + WebSocket router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check))
        .route("/api/rooms", post(create_room).get(get_rooms))
        .route("/api/rooms/{room_id}", get(get_room))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Shared Pomodoro room server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state, tick_timers_usecase);
/// server.run(ServerConfig::default()).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    tick_timers_usecase: Arc<TickTimersUseCase>,
}

impl Server {
    pub fn new(state: AppState, tick_timers_usecase: Arc<TickTimersUseCase>) -> Self {
        Self {
            state: Arc::new(state),
            tick_timers_usecase,
        }
    }

    /// Run the server and the ticker until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self, config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(self.state);

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let ticker = spawn_ticker(self.tick_timers_usecase, config.tick_interval, shutdown_rx);

        tracing::info!("Room server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        // サーバーの終了結果に関わらず ticker を止める
        let _ = shutdown_tx.send(true);
        if let Err(e) = ticker.await {
            tracing::warn!("Ticker task ended abnormally: {}", e);
        }
        served?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
