//! # Luhn-Verify RS
//!
//! Card number validation microservice.
//!
//! ## Usage
//!
//! ```bash
//! # Optional overrides
//! export HOST=0.0.0.0
//! export PORT=4000
//! export LOG_FORMAT=json
//!
//! # Run the server
//! luhn-verify
//!
//! # Check a number
//! curl -X GET http://localhost:4000/Verify -d '{"ccn": "5333-6195-0371-5702"}'
//! ```

use luhn_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_tracing();

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Luhn-Verify starting on http://{}", addr);

    if !is_prod {
        info!("Health: GET http://{}/health", addr);
        info!("Verify: GET|POST http://{}/Verify", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}

fn print_banner() {
    println!(
        r#"
  Luhn-Verify RS
  ━━━━━━━━━━━━━━━━━━━━━━━
  Card number validation
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
