//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `--debug` selects `debug`,
/// `--verbose` selects `info`, and the default is `warn`.
pub fn init(verbose: bool, debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(default_level(verbose, debug))
    });

    // A second call (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .try_init();
}

const fn default_level(verbose: bool, debug: bool) -> &'static str {
    if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_beats_verbose() {
        assert_eq!(default_level(true, true), "debug");
        assert_eq!(default_level(true, false), "info");
        assert_eq!(default_level(false, false), "warn");
    }
}
