//! # luhn-api
//!
//! HTTP API layer for luhn-verify-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - JSON verify endpoint backed by `luhn_core`
//! - Layered configuration (defaults, `config/server.toml`, environment)
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET, POST | `/Verify` | Validate a card number |
//! | GET, POST | `/api/v1/verify` | Validate a card number |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
