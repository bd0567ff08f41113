use nicprobe_domain::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries only the JSON results.
pub fn init_logging(cfg: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if cfg.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
