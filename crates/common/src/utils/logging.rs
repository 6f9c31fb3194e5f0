use std::io;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info";

/// Initialize tracing subscriber with compact human-readable output.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info`
/// - Writes to stdout to improve visibility in environments that hide stderr
pub fn init_logging_default() {
    // 默认启用 info，可通过 RUST_LOG 覆盖，例如 RUST_LOG=debug,tower_http=debug
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        // 重复初始化（例如测试中）时忽略错误
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
///
/// Same filter rules as [`init_logging_default`]; one JSON object per line,
/// which is what log shippers in container setups expect.
pub fn init_logging_json() {
    // 与 compact 格式共用同一过滤规则
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}
