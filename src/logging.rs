//! Log setup for the `crs` binary.
//!
//! Events go to stderr so stdout stays clean for reports and piping.
//! `RUST_LOG` wins when set; otherwise the level comes from `-v` / `-q`.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static INIT: OnceLock<()> = OnceLock::new();

/// Default filter directive for a verbosity offset (`-v` count minus `-q` count).
pub fn default_directive(verbosity: i8) -> &'static str {
    match verbosity {
        i8::MIN..=-2 => "error",
        -1 => "credit_risk_scoring=warn",
        0 => "credit_risk_scoring=info",
        1 => "credit_risk_scoring=debug",
        _ => "credit_risk_scoring=trace",
    }
}

/// Install the global subscriber.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init(verbosity: i8) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(default_directive(0), "credit_risk_scoring=info");
        assert_eq!(default_directive(1), "credit_risk_scoring=debug");
        assert_eq!(default_directive(5), "credit_risk_scoring=trace");
        assert_eq!(default_directive(-1), "credit_risk_scoring=warn");
        assert_eq!(default_directive(-3), "error");
    }

    #[test]
    fn init_is_idempotent() {
        init(0);
        init(2);
    }
}
