//! Logging initialization
//!
//! Diagnostics go to stderr through `tracing`; reports and listings stay on
//! stdout. `RUST_LOG` always wins over the verbosity flag.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

/// Default filter directive for a `-v` count
#[must_use]
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "sheetnum=warn",
        1 => "sheetnum=info",
        _ => "sheetnum=debug",
    }
}

/// Install the stderr subscriber; later calls are no-ops
pub fn init(verbosity: u8) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
        let result = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
        if let Err(e) = result {
            eprintln!("Warning: logging disabled: {e}");
        }
    });
}
