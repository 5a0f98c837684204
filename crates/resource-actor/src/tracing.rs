//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber for a process
//! built on resource actors.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup and shutdown with the final store size
//! - **Entity Operations**: Create, Get, List, Find, Update and Delete
//! - **Errors**: rejected hooks and missing ids, with the entity id attached
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default level is info)
//! cargo run
//!
//! # Show full payloads with debug logs
//! RUST_LOG=debug cargo run
//!
//! # Filter to the actor loop only
//! RUST_LOG=resource_actor=debug cargo run
//! ```
//!
//! With `RUST_LOG=info`:
//!
//! ```text
//! INFO Actor started entity_type="User"
//! INFO Created entity_type="User" size=1
//! INFO Deleted entity_type="User" id=1 size=0
//! ```

use tracing_subscriber::EnvFilter;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line output with spans inline.
    #[default]
    Compact,
    /// One JSON object per event, for log shippers.
    Json,
}

/// Initializes the global subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to `info`. Calling this a
/// second time (for example from several tests) is a no-op.
pub fn setup_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false); // entity_type already names the source

    let result = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(e) = result {
        tracing::debug!(error = %e, "tracing already initialised");
    }
}
