//! Logging setup utilities for the Shuchu binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// This function sets up logging for the server library crate, the shared crate and
/// the binary. The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "shuchu-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use shuchu_shared::logger::setup_logger;
///
/// setup_logger("shuchu-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    tracing::debug!(
        "Logger initialized for '{}' (default level: {})",
        binary_name,
        default_log_level
    );
}

/// Build the filter directive used when `RUST_LOG` is not set.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "shuchu_server={level},shuchu_shared={level},{bin}={level},tower_http={level}",
        level = default_log_level,
        bin = binary_name.replace('-', "_"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_binary_and_crates() {
        // テスト項目: デフォルトのフィルタにバイナリ名とクレート名が含まれる
        // given (前提条件):
        let binary_name = "shuchu-server";

        // when (操作):
        let filter = default_filter(binary_name, "info");

        // then (期待する結果):
        assert!(filter.contains("shuchu_server=info"));
        assert!(filter.contains("shuchu_shared=info"));
        assert!(filter.contains("tower_http=info"));
        assert!(!filter.contains("shuchu-server"));
    }

    #[test]
    fn test_setup_logger_enables_default_level_for_crate() {
        // テスト項目: RUST_LOG 未設定時、デフォルトのレベルで自クレートのログが有効になる
        // given (前提条件):
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }

        // when (操作):
        setup_logger("shuchu-shared-test", "debug");

        // then (期待する結果):
        assert!(tracing::enabled!(tracing::Level::DEBUG));
        assert!(!tracing::enabled!(tracing::Level::TRACE));
    }
}
