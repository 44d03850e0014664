use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// `RUST_LOG` wins; otherwise `info`, or `debug` for our crates when verbose
pub fn init(verbose: bool) {
    let default = if verbose {
        "info,jita_app=debug,jita_scraper=debug,jita_anki=debug,jita_core=debug"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .with_ansi(atty::is(atty::Stream::Stdout)),
        )
        .init();
}
