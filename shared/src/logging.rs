//! Tracing setup shared by the service binary and integration harnesses

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for the service process.
///
/// `RUST_LOG` wins when set; otherwise the given base level is applied to the
/// service crates with the noisier HTTP dependencies pinned to `warn`.
pub fn init_tracing(log_level: Option<&str>) {
    let base_level = log_level.unwrap_or("info");
    let default_filter = format!(
        "paymentservice={base_level},shared={base_level},tower_http=warn,hyper=warn,reqwest=warn"
    );

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

/// Same as [`init_tracing`] but safe to call repeatedly (tests).
pub fn try_init_tracing(log_level: Option<&str>) {
    let base_level = log_level.unwrap_or("info");
    let default_filter = format!("paymentservice={base_level},shared={base_level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .compact()
        .try_init();
}
