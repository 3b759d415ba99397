//! Tracing setup
//!
//! `RUST_LOG` wins when set; otherwise debug builds log at `debug` and
//! release builds at `info`, with the Tauri/wry internals quietened.

use std::io;

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

fn build_filter_directives(is_dev: bool) -> Vec<String> {
    vec![
        if is_dev { "debug" } else { "info" }.to_string(),
        "tauri=warn".to_string(),
        "wry=off".to_string(),
        "ipc::request=off".to_string(),
        if is_dev {
            "clipstack_lib=debug"
        } else {
            "clipstack_lib=info"
        }
        .to_string(),
    ]
}

/// Install the global subscriber. Fails only if one is already installed.
pub fn init_tracing_subscriber() -> Result<(), TryInitError> {
    let is_dev = cfg!(debug_assertions);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(build_filter_directives(is_dev).join(",")));

    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(io::stdout);

    registry().with(env_filter).with(stdout_layer).try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_follows_build_profile() {
        assert_eq!(build_filter_directives(true)[0], "debug");
        assert_eq!(build_filter_directives(false)[0], "info");
    }

    #[test]
    fn directives_parse_as_env_filter() {
        for is_dev in [true, false] {
            let joined = build_filter_directives(is_dev).join(",");
            assert!(EnvFilter::try_new(&joined).is_ok(), "{joined}");
        }
    }

    #[test]
    fn second_init_is_an_error_not_a_panic() {
        let _ = init_tracing_subscriber();
        assert!(init_tracing_subscriber().is_err());
    }
}
