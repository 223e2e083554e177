//! # SmartMandi Host Library
//!
//! Headless wiring for the SmartMandi core: configuration, logging, and one
//! instance each of the mock API and the session store.
//!
//! ## Module Organization
//! ```text
//! smartmandi_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── app.rs          ◄─── App handle (MockApi + SessionStore)
//! ├── config.rs       ◄─── AppConfig loading
//! └── error.rs        ◄─── Host error type
//! ```

pub mod app;
pub mod config;
pub mod error;

use tracing::info;
use tracing_subscriber::EnvFilter;

pub use app::{App, Overview};
pub use config::{ApiSettings, AppConfig};
pub use error::{AppError, AppResult};

/// Runs the host.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize logging (RUST_LOG, default INFO)                         │
/// │  2. Load config: defaults → smartmandi.toml → SMARTMANDI_* env          │
/// │  3. Build MockApi (seeded) and SessionStore (restores saved session)    │
/// │  4. Log the active session's dashboard figures                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> AppResult<()> {
    init_tracing();

    info!("Starting SmartMandi");

    let config = AppConfig::load_or_default(None);
    info!(
        default_delay_ms = config.api.default_delay_ms,
        session_storage = %config.session.storage,
        "Configuration loaded"
    );

    let app = App::new(&config);
    if app.session().is_degraded() {
        info!("Session storage unavailable, sessions will not survive a restart");
    }

    app.log_status().await;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=mandi_mock=trace` - Show simulated latency
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
