//! HTTP host adapter.
//!
//! # Data Flow
//! ```text
//! HTTP request /<name>
//!     → server.rs (Axum, trace + timeout layers)
//!     → GET:  CommandInterpreter::read (one host open)
//!       HEAD: CommandInterpreter::stat
//!     → Outcome → status code (200 | 404 Skip | 503 Fail)
//! ```

pub mod server;

pub use server::{shutdown_signal, HttpServer};
