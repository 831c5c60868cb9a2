//! Diagnostic logging to stderr.
//!
//! `RUST_LOG` wins when set; otherwise `-v` raises the level from `warn` to
//! `debug`, and `-vv` to `trace`.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A second init (tests) is harmless.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "vclc=debug,vclc_compiler=debug",
        _ => "vclc=trace,vclc_compiler=trace",
    }
}
