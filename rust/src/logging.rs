//! Logging setup with verbosity level control.
//!
//! The crate logs through `tracing`; this module only installs a subscriber.
//! Verbosity levels:
//! - 0: SILENT (warnings and errors only)
//! - 1: CHANGES (run summaries)
//! - 2: CHECKS (per-task decisions)
//! - 3: DEBUG (full algorithm internals)

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Map a verbosity level onto a `tracing` level filter.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        VERBOSITY_SILENT => LevelFilter::WARN,
        VERBOSITY_CHANGES => LevelFilter::INFO,
        VERBOSITY_CHECKS => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install a stderr subscriber at the given verbosity.
///
/// `RUST_LOG` overrides the level when set. Returns `false` if a global
/// subscriber was already installed, in which case nothing changes.
pub fn init_logging(verbosity: u8) -> bool {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for_verbosity(verbosity).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
