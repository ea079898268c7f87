use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset. A successful run without `-v`
/// prints nothing; warnings still get through.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "ini2xml=debug,info"
    } else {
        "ini2xml=warn"
    }
}

/// Installs the global subscriber. Output goes to stderr so stdout stays
/// free for help text and dry-run summaries.
pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
