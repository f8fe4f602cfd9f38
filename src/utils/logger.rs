use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins over the level picked from `--verbose`.
fn env_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "warn" };
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pattern_catalog={}", level)))
}

/// Compact logs on stderr; stdout is reserved for demo transcripts.
/// Returns `false` when a global subscriber was already installed.
pub fn init_cli_logger(verbose: bool) -> bool {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .compact();

    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(layer)
        .try_init()
    {
        eprintln!("Logger already initialised: {}", e);
        return false;
    }
    true
}

/// JSON 格式日誌，搭配 `--format json` 使用
pub fn init_json_logger(verbose: bool) -> bool {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .json();

    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(layer)
        .try_init()
    {
        eprintln!("Logger already initialised: {}", e);
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        init_cli_logger(false);
        assert!(!init_json_logger(true));
        assert!(!init_cli_logger(true));
    }
}
