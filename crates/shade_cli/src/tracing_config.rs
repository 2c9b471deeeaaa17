//! Tracing setup for the `shade` binary.
//!
//! ```bash
//! SHADE_LOG=debug shade tree.json
//! SHADE_LOG="shade_lint=trace" shade tree.json
//! ```
//!
//! The subscriber is only installed when `SHADE_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::EnvFilter;

/// Build an `EnvFilter` from `SHADE_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("SHADE_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Install the global subscriber, writing to stderr.
pub fn init_tracing() {
    let has_shade_log = std::env::var("SHADE_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_shade_log && !has_rust_log {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .init();
}
