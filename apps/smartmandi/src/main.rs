//! # SmartMandi Entry Point
//!
//! The actual setup is in lib.rs for better testability.

#[tokio::main]
async fn main() {
    if let Err(e) = smartmandi_lib::run().await {
        tracing::error!(code = e.code(), "SmartMandi failed: {}", e);
        std::process::exit(1);
    }
}
