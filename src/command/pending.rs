//! Pending member list.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Ordered working set of players targeted by `@RUN` and `@GET_USERS`.
#[derive(Debug, Default)]
pub struct PendingList {
    members: RwLock<Vec<String>>,
}

impl PendingList {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<String>> {
        self.members.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<String>> {
        self.members.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the list (`@SET_USERS`).
    pub fn replace(&self, members: Vec<String>) {
        *self.write() = members;
    }

    /// Append to the list (`@ADD_USERS`).
    pub fn extend(&self, members: Vec<String>) {
        self.write().extend(members);
    }

    /// Copy of the current list.
    pub fn snapshot(&self) -> Vec<String> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
