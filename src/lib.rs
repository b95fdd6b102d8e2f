//! Player stat server library.
//!
//! Serves per-player battle statistics to an XML consumer that reads
//! pseudo-files. Names are either `<ID>.xml` lookups or `@COMMAND` requests;
//! lookups go through a cache with negative entries, a circuit breaker and a
//! randomly selected upstream proxy.

pub mod cache;
pub mod clock;
pub mod command;
pub mod config;
pub mod http;
pub mod load_balancer;
pub mod observability;
pub mod resilience;
pub mod upstream;

pub use cache::StatCache;
pub use command::{CommandInterpreter, Outcome};
pub use config::StatServerConfig;
pub use http::HttpServer;
pub use upstream::{RemoteFetcher, StatFetcher};
