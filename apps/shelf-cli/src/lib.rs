//! # shelf-cli: Menu Front-End for Shelf
//!
//! Loads a catalog from configuration and serves it through a text menu.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Startup Sequence                               │
//! │                                                                         │
//! │  1. Initialize Tracing ──────────────────────────────────────────────►  │
//! │     • RUST_LOG, else warn + info for this crate, to stderr             │
//! │                                                                         │
//! │  2. Load Configuration ──────────────────────────────────────────────►  │
//! │     • defaults -> shelf.toml -> SHELF_* env -> validate                │
//! │                                                                         │
//! │  3. Build Store ─────────────────────────────────────────────────────►  │
//! │     • promotions first, then products referencing them                 │
//! │                                                                         │
//! │  4. Run Menu ────────────────────────────────────────────────────────►  │
//! │     • stdin/stdout until "4" or end of input                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod menu;

pub use catalog::build_store;
pub use config::AppConfig;
pub use error::{CliError, CliResult};
pub use menu::Menu;

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn,shelf_cli=info";

/// Text printed by `shelf --help`.
pub const USAGE: &str = "\
Shelf store menu

Usage: shelf [OPTIONS]

Options:
  -c, --config <PATH>  Catalog file (default: platform config dir)
      --json           Print receipts as JSON
      --print-config   Print the effective configuration and exit
  -h, --help           Show this help message

Environment:
  SHELF_CONFIG         Catalog file, if --config is not given
  SHELF_STORE_NAME     Overrides [store] name
  SHELF_ORDER_POLICY   best_effort | all_or_nothing (also: atomic;
                       case-insensitive, '-' may replace '_')
  RUST_LOG             Log filter (default: warn,shelf_cli=info)
";

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so they never interleave with menu output on stdout.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every purchase
/// - `RUST_LOG=shelf_core=debug` - Debug for the domain crate only
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    log_subscriber(filter, std::io::stderr).init();
}

/// The formatting subscriber, filtered only by `filter`.
fn log_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}

// =============================================================================
// Unit Tests
// =============================================================================
