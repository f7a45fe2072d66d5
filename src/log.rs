//! Scoped, append-only error logs.
//!
//! A [`ScopedLog`] collects opaque failure messages under one qualifying
//! name. Logs nest: a parent log [`incorporate`](ScopedLog::incorporate)s a
//! child's messages and stamps its own name on each of them, which is how
//! the `parent::child::message` scope chains build up through a test tree.
//!
//! The log is internally synchronized, so a test procedure may spawn threads
//! that append concurrently without extra locking. Messages from different
//! threads land in an unspecified relative order; the order of appends made
//! by a single thread is preserved.

use std::{
    io,
    sync::{Mutex, MutexGuard, PoisonError},
};

#[derive(Debug)]
pub struct ScopedLog {
    qualifying_name: String,
    messages: Mutex<Vec<String>>,
    // Held across a whole incorporate call so the absorbed batch stays
    // contiguous relative to other incorporate batches.
    batch: Mutex<()>,
}

impl ScopedLog {
    pub fn new(qualifying_name: impl Into<String>) -> Self {
        Self {
            qualifying_name: qualifying_name.into(),
            messages: Mutex::new(Vec::new()),
            batch: Mutex::new(()),
        }
    }

    /// The name every message of this log is qualified with.
    pub fn qualifying_name(&self) -> &str {
        &self.qualifying_name
    }

    /// Record a failure message, qualified with this log's name.
    ///
    /// An empty message stores the qualifying name alone, marking the whole
    /// scope as failed (see [`fail`](Self::fail)).
    pub fn append(&self, message: &str) {
        let entry = match message.is_empty() {
            true => self.qualifying_name.clone(),
            false => format!("{}::{message}", self.qualifying_name),
        };
        self.lock_messages().push(entry);
    }

    /// [`append`](Self::append) when `failed` is true, no-op otherwise.
    pub fn append_if(&self, message: &str, failed: bool) {
        if failed {
            self.append(message);
        }
    }

    /// Record the qualifying name alone, marking this scope as failed.
    pub fn fail(&self) {
        self.append("");
    }

    /// [`fail`](Self::fail) when `failed` is true, no-op otherwise.
    pub fn fail_if(&self, failed: bool) {
        if failed {
            self.fail();
        }
    }

    /// Number of messages recorded so far.
    pub fn len(&self) -> usize {
        self.lock_messages().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Absorb every message of `other`, re-qualifying each with this log's
    /// own name.
    ///
    /// `other`'s messages already carry `other`'s name, so the absorbed
    /// entries read `self_name::other_name::…`; nesting deepens the chain by
    /// one level per incorporating ancestor. Concurrent incorporate calls on
    /// the same log do not interleave their batches, though direct
    /// [`append`](Self::append)s from other threads may land inside one.
    pub fn incorporate(&self, other: &ScopedLog) {
        let _batch = self.lock_batch();
        let absorbed = other.lock_messages().clone();
        for message in &absorbed {
            self.append(message);
        }
    }

    /// Write every recorded message to `sink`, one `\n`-terminated line per
    /// message, in insertion order. No summary line.
    pub fn report(&self, sink: &mut dyn io::Write) -> io::Result<()> {
        for message in self.lock_messages().iter() {
            writeln!(sink, "{message}")?;
        }
        Ok(())
    }

    fn lock_messages(&self) -> MutexGuard<'_, Vec<String>> {
        // A panicking appender must not wedge the log, so poisoning is
        // deliberately ignored.
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_batch(&self) -> MutexGuard<'_, ()> {
        self.batch.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
