//! Consumer command interpreter.
//!
//! # Data Flow
//! ```text
//! Host stat/open(name)
//!     → parser.rs (member `<ID>.xml` | `@COMMAND[ params]` | violation)
//!     → interpreter.rs
//!         member      → StatCache::get_or_fetch
//!         @SET/@ADD   → pending.rs
//!         @RUN        → StatCache::get_or_fetch_batch (discarded)
//!         @GET_*      → StatCache::get_or_fetch_batch → users envelope
//!     → payload.rs (BOM + Latin-1)
//!     → Outcome: Ok(bytes | length) | Skip | Fail
//! ```
//!
//! # Design Decisions
//! - Violations are not errors for the host, they yield `Skip`
//! - Effects run once per open, never on stat
//! - An open snapshots its payload; chunked reads never rebuild it
//! - A panic fails the one call and leaves state as it was

pub mod interpreter;
pub mod outcome;
pub mod parser;
pub mod payload;
pub mod pending;

pub use interpreter::{CommandInterpreter, OpenFile};
pub use outcome::{FailKind, Outcome};
pub use parser::{parse_request, Command, CommandError, Request};
pub use pending::PendingList;
