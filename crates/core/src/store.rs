//! Per-run trace store
//!
//! Accumulates one [`TraceRecord`] per example while a suite runs and hands
//! the whole run to the report assembler exactly once at the end.
//!
//! ## Lifecycle
//!
//! ```text
//! new() ──add()*──▶ Open ──snapshot()──▶ Finalized ──snapshot()──▶ same Snapshot
//!                                            │
//!                                            └──add()──▶ Err(StoreFinalized)
//! ```
//!
//! ## Concurrency
//!
//! Examples may run on several threads. `add` and `snapshot` share one lock,
//! so the duplicate check, the ordered insert and the switch to `Finalized`
//! are each observed atomically. Any `add` that loses the race against
//! `snapshot` fails with [`Error::StoreFinalized`] instead of being dropped.

use crate::{Error, ExampleMetadata, Result, ScopedId, TraceRecord};
use parking_lot::Mutex;
use stacktrace_events::{emit_store_finalized, emit_trace_rejected, emit_trace_stored};
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Receipt for a stored trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHandle {
    position: usize,
    scoped_id: ScopedId,
}

impl RecordHandle {
    /// Zero-based insertion position of the record
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Scoped id of the record
    #[must_use]
    pub fn scoped_id(&self) -> &ScopedId {
        &self.scoped_id
    }
}

/// Immutable, ordered view of every record in a finalized store.
///
/// Cloning is cheap; all clones share the same records.
pub struct Snapshot<T> {
    records: Arc<[TraceRecord<T>]>,
}

impl<T> Snapshot<T> {
    fn new(records: Vec<TraceRecord<T>>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Scoped ids in insertion order
    pub fn scoped_ids(&self) -> impl Iterator<Item = &ScopedId> {
        self.records.iter().map(TraceRecord::scoped_id)
    }

    /// Whether two snapshots share the same underlying records
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = [TraceRecord<T>];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl<T: PartialEq> PartialEq for Snapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.records[..] == other.records[..]
    }
}

impl<T: fmt::Debug> fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.records.iter()).finish()
    }
}

enum StoreState<T> {
    Open {
        records: Vec<TraceRecord<T>>,
        ids: HashSet<ScopedId>,
    },
    Finalized(Snapshot<T>),
}

/// Thread-safe accumulator of trace records for one run
pub struct TraceStore<T> {
    state: Mutex<StoreState<T>>,
}

impl<T> TraceStore<T> {
    /// Create an empty, open store
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState::Open {
                records: Vec::new(),
                ids: HashSet::new(),
            }),
        }
    }

    /// Store the trace of one example.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateKey`] if a record with the same scoped id exists
    /// - [`Error::StoreFinalized`] if [`Self::snapshot`] was already called
    ///
    /// On error the store is left untouched.
    pub fn add(&self, trace: T, metadata: ExampleMetadata) -> Result<RecordHandle> {
        let scoped_id = metadata.scoped_id().clone();

        let outcome = {
            let mut state = self.state.lock();
            match &mut *state {
                StoreState::Finalized(_) => Err(Error::store_finalized(scoped_id.clone())),
                StoreState::Open { ids, .. } if ids.contains(&scoped_id) => {
                    Err(Error::duplicate_key(scoped_id.clone()))
                }
                StoreState::Open { records, ids } => {
                    ids.insert(scoped_id.clone());
                    records.push(TraceRecord::new(trace, metadata));
                    Ok(records.len() - 1)
                }
            }
        };

        match outcome {
            Ok(position) => {
                emit_trace_stored!(scoped_id, position);
                Ok(RecordHandle {
                    position,
                    scoped_id,
                })
            }
            Err(e) => {
                emit_trace_rejected!(scoped_id, e);
                Err(e)
            }
        }
    }

    /// Finalize the store and return every record in insertion order.
    ///
    /// The first call freezes the store; later calls return the same
    /// snapshot without re-deriving it.
    pub fn snapshot(&self) -> Snapshot<T> {
        let mut state = self.state.lock();
        let snapshot = match &mut *state {
            StoreState::Finalized(snapshot) => return snapshot.clone(),
            StoreState::Open { records, .. } => Snapshot::new(std::mem::take(records)),
        };
        *state = StoreState::Finalized(snapshot.clone());
        drop(state);

        emit_store_finalized!(snapshot.len());
        snapshot
    }

    /// Number of records currently held
    #[must_use]
    pub fn size(&self) -> usize {
        match &*self.state.lock() {
            StoreState::Open { records, .. } => records.len(),
            StoreState::Finalized(snapshot) => snapshot.len(),
        }
    }

    /// Whether the store has been snapshotted
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        matches!(&*self.state.lock(), StoreState::Finalized(_))
    }
}

impl<T> Default for TraceStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TraceStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceStore")
            .field("size", &self.size())
            .field("finalized", &self.is_finalized())
            .finish()
    }
}
