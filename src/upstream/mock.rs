//! Scriptable in-memory fetcher for unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use crate::upstream::codec::user_fragment;
use crate::upstream::{FetchError, StatFetcher};

#[derive(Debug, Default)]
pub(crate) struct MockFetcher {
    failing: AtomicBool,
    panicking: AtomicBool,
    single_calls: AtomicUsize,
    batch_requests: Mutex<Vec<Vec<String>>>,
}

impl MockFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Make every call panic, as a bug inside a fetcher would.
    pub(crate) fn set_panicking(&self, panicking: bool) {
        self.panicking.store(panicking, Ordering::SeqCst);
    }

    fn check_panic(&self) {
        if self.panicking.load(Ordering::SeqCst) {
            panic!("mock fetcher panic");
        }
    }

    pub(crate) fn single_calls(&self) -> usize {
        self.single_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn batch_requests(&self) -> Vec<Vec<String>> {
        self.batch_requests.lock().unwrap().clone()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.single_calls() + self.batch_requests().len()
    }

    /// Fragment the mock serves for `id` in single mode.
    pub(crate) fn single_fragment(id: &str) -> String {
        user_fragment(id, 7, "70")
    }

    /// Fragment the mock serves for `id` in batch mode.
    pub(crate) fn batch_fragment(id: &str) -> String {
        user_fragment(id, 3, "30")
    }
}

impl StatFetcher for MockFetcher {
    async fn fetch_one(&self, id: &str) -> Result<String, FetchError> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        self.check_panic();
        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::Transport("connection refused".into()));
        }
        Ok(Self::single_fragment(id))
    }

    async fn fetch_batch(&self, ids: &[String]) -> Result<Vec<String>, FetchError> {
        self.batch_requests.lock().unwrap().push(ids.to_vec());
        self.check_panic();
        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::Transport("connection refused".into()));
        }
        Ok(ids.iter().map(|id| Self::batch_fragment(id)).collect())
    }
}
