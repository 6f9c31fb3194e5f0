use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the application router around `state`.
pub fn app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

fn load_bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.server.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("{raw}: {e}")))
}

/// Serve `state` on an already bound listener until the server stops.
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    axum::serve(listener, app(state)).await?;
    Ok(())
}

/// Public entry: create the store, bind the configured address and serve.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    // 内存存储：进程退出即丢失
    let state = AppState::in_memory();

    // Bind and serve
    let addr = load_bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr)
        .await
        // 端口不可用属于致命错误，不重试
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })?;
    info!(%addr, "server listening");
    println!("Server is running on {}...", addr);

    serve(listener, state).await?;
    Ok(())
}
