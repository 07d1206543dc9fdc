use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directive used when `RUST_LOG` is unset. A configured level wins over the
/// verbose flag.
fn filter_directive(verbose: bool, level: Option<&str>) -> String {
    match level {
        Some(level) => format!("course_registry={}", level),
        None if verbose => "course_registry=debug,tower_http=debug,info".to_string(),
        None => "course_registry=info".to_string(),
    }
}

fn default_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, level)))
}

pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(), // 給日誌收集器用的 JSON 格式
        )
        .init();
}

/// `RUST_LOG` wins when set; otherwise `[logging] level` from the config file,
/// then the verbose flag.
pub fn init_logger(json: bool, verbose: bool, level: Option<&str>) {
    if json {
        init_json_logger(verbose, level);
    } else {
        init_cli_logger(verbose, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_level_wins_over_verbose() {
        assert_eq!(filter_directive(true, Some("warn")), "course_registry=warn");
        assert_eq!(filter_directive(false, Some("trace")), "course_registry=trace");
    }

    #[test]
    fn test_verbose_without_config_level() {
        assert_eq!(
            filter_directive(true, None),
            "course_registry=debug,tower_http=debug,info"
        );
        assert_eq!(filter_directive(false, None), "course_registry=info");
    }
}
