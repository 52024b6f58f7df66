//! Logger bootstrap for the binary and tests.
//!
//! The renderer's GPU crates log heavily at debug level, so they are held at
//! `warn` unless `RUST_LOG` says otherwise.

use env_logger::{Builder, Env};
use log::LevelFilter;

const QUIET_CRATES: &[&str] = &["wgpu", "naga", "winit"];

/// Default filter directive for the given verbosity.
#[must_use]
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    QUIET_CRATES
        .iter()
        .fold(level.to_string().to_lowercase(), |filter, name| {
            format!("{filter},{name}=warn")
        })
}

/// Initializes the global logger.
///
/// When `verbose` is `true`, game debug messages are printed. Otherwise only
/// info level and above are shown. `RUST_LOG` takes precedence over both.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
}
