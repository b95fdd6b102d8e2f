//! Host-facing entry points.
//!
//! # Responsibilities
//! - Resolve a requested name into a member lookup or a command
//! - Execute state-changing commands exactly once per host open
//! - Produce the encoded payload once per open and its exact length
//! - Turn panics below this layer into `Fail` for the one call
//!
//! `stat` never runs a state-changing command, so a host may stat a name any
//! number of times. Chunked reads are served from the [`OpenFile`] snapshot
//! taken at open, never from a rebuilt payload.

use futures_util::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use crate::cache::StatCache;
use crate::command::outcome::{FailKind, Outcome};
use crate::command::parser::{parse_request, Command, Request};
use crate::command::payload;
use crate::command::pending::PendingList;
use crate::observability::metrics;
use crate::upstream::StatFetcher;

/// Which host call is being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Stat,
    Open,
}

impl Access {
    fn as_str(self) -> &'static str {
        match self {
            Access::Stat => "stat",
            Access::Open => "open",
        }
    }
}

/// Payload snapshot for one host open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenFile {
    bytes: Vec<u8>,
}

impl OpenFile {
    /// Byte length of the payload.
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Up to `max_len` bytes starting at `offset`. Empty past the end.
    pub fn read_at(&self, offset: u64, max_len: usize) -> &[u8] {
        let start = usize::try_from(offset)
            .unwrap_or(usize::MAX)
            .min(self.bytes.len());
        let end = start.saturating_add(max_len).min(self.bytes.len());
        &self.bytes[start..end]
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Explicit context for all consumer requests: cache plus pending list.
#[derive(Debug)]
pub struct CommandInterpreter<F> {
    cache: StatCache<F>,
    pending: PendingList,
}

impl<F: StatFetcher> CommandInterpreter<F> {
    pub fn new(cache: StatCache<F>) -> Self {
        Self {
            cache,
            pending: PendingList::new(),
        }
    }

    pub fn cache(&self) -> &StatCache<F> {
        &self.cache
    }

    pub fn pending(&self) -> &PendingList {
        &self.pending
    }

    /// Byte length an open of `name` would return right now.
    ///
    /// State-changing commands report a length of 0 and are not executed.
    pub async fn stat(&self, name: &str) -> Outcome<u64> {
        self.guarded(name, Access::Stat, self.resolve_text(name, Access::Stat))
            .await
            .map(|text| text.as_deref().map_or(0, payload::encoded_len))
    }

    /// One host open: runs a state-changing command once, or snapshots the
    /// payload (BOM followed by Latin-1 text) for subsequent reads.
    pub async fn open(&self, name: &str) -> Outcome<OpenFile> {
        self.guarded(name, Access::Open, self.resolve_text(name, Access::Open))
            .await
            .map(|text| OpenFile {
                bytes: text.as_deref().map_or_else(Vec::new, payload::encode),
            })
    }

    /// Open `name` and return the whole payload.
    pub async fn read(&self, name: &str) -> Outcome<Vec<u8>> {
        self.open(name).await.map(OpenFile::into_bytes)
    }

    async fn guarded<T>(
        &self,
        name: &str,
        access: Access,
        operation: impl Future<Output = Outcome<T>>,
    ) -> Outcome<T> {
        match AssertUnwindSafe(operation).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::error!(name = %name, access = access.as_str(), "Request aborted");
                Outcome::Fail(FailKind::Internal)
            }
        }
    }

    /// Text to encode for `name`. `Ok(None)` means an empty payload.
    async fn resolve_text(&self, name: &str, access: Access) -> Outcome<Option<String>> {
        let request = match parse_request(name) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(name = %name, error = %e, "Ignoring request");
                return Outcome::Skip;
            }
        };

        match request {
            Request::Member(id) => match self.cache.get_or_fetch(&id).await {
                Some(fragment) => Outcome::Ok(Some(fragment)),
                None => Outcome::Fail(FailKind::Unavailable),
            },
            Request::Command(command) if command.is_effect() => {
                if access == Access::Open {
                    self.execute(command).await;
                }
                Outcome::Ok(None)
            }
            Request::Command(command) => {
                if access == Access::Open {
                    metrics::record_command(command.name());
                }
                let fragments = self.cache.get_or_fetch_batch(&self.pending.snapshot()).await;
                Outcome::Ok(Some(payload::users_document(&fragments)))
            }
        }
    }

    async fn execute(&self, command: Command) {
        metrics::record_command(command.name());
        match command {
            Command::Log(message) => {
                tracing::info!(target: "stat_server::consumer", "{}", message);
            }
            Command::SetUsers(members) => {
                tracing::debug!(count = members.len(), "Pending list replaced");
                self.pending.replace(members);
            }
            Command::AddUsers(members) => {
                tracing::debug!(count = members.len(), "Pending list extended");
                self.pending.extend(members);
            }
            Command::Run => {
                let fragments = self.cache.get_or_fetch_batch(&self.pending.snapshot()).await;
                tracing::debug!(count = fragments.len(), "Pending list warmed");
            }
            Command::GetUsers | Command::GetLastStat => {}
        }
    }
}
