use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log to stderr so stdout stays reserved for command output. `RUST_LOG`
/// overrides the default `claimsheet=warn` directive.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "claimsheet=debug" } else { "claimsheet=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
