//! Transactional primitives over the embedded key-value engine.
//!
//! A [`Store`] owns the single store file (or an in-memory image of one) and
//! exposes exactly two ways to touch it:
//!
//! - [`Store::read`] runs a closure inside a read-only transaction. Any number
//!   of these run concurrently, each against a consistent snapshot.
//! - [`Store::write`] runs a closure inside a read-write transaction and commits
//!   only if the closure returns `Ok`. On `Err` every write made inside the
//!   closure is rolled back, including sequence draws.
//!
//! The engine admits one write transaction at a time across the whole file, so
//! writes to `users` and writes to `todos` serialize against each other. A
//! get-modify-put sequence inside a single [`Store::write`] closure therefore
//! cannot interleave with another writer and needs no version check.
//!
//! Namespaces are fixed ([`Namespace::Users`] and [`Namespace::Todos`]) and are
//! created on open. Values are stored as JSON documents.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};

use crate::{
    Result,
    clock::{Clock, SystemClock},
    constants::{SEQUENCES, TODOS, USERS},
};

mod errors;
pub use errors::StoreError;

const USERS_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new(USERS);
const TODOS_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new(TODOS);
const SEQUENCES_TABLE: TableDefinition<&str, u64> = TableDefinition::new(SEQUENCES);

/// A named, independently keyed partition of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// User records keyed by username.
    Users,
    /// Todo records keyed by `"{owner_id}:{todo_id}"`.
    Todos,
}

impl Namespace {
    /// Every namespace the store bootstraps on open.
    pub const ALL: [Namespace; 2] = [Namespace::Users, Namespace::Todos];

    /// The persisted table name of this namespace.
    pub fn name(self) -> &'static str {
        match self {
            Namespace::Users => USERS,
            Namespace::Todos => TODOS,
        }
    }

    fn definition(self) -> TableDefinition<'static, &'static [u8], &'static [u8]> {
        match self {
            Namespace::Users => USERS_TABLE,
            Namespace::Todos => TODOS_TABLE,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// A single store file on disk.
    File(PathBuf),
    /// A non-persistent in-memory image, discarded on drop.
    Memory,
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreLocation::File(path) => write!(f, "{}", path.display()),
            StoreLocation::Memory => f.write_str(":memory:"),
        }
    }
}

/// Handle to an open store.
///
/// Cloning is cheap and every clone refers to the same underlying engine, so a
/// process opens its store once and hands clones to each repository. The file
/// stays locked against other processes until the last clone is dropped.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    db: Database,
    location: StoreLocation,
    clock: Arc<dyn Clock>,
}

impl Store {
    /// Open the store file at `path`, creating it if absent.
    ///
    /// Ensures the `users` and `todos` namespaces exist. Safe to call on every
    /// process start. Fails with an engine error if another process holds the
    /// file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_impl(path.as_ref(), Arc::new(SystemClock))
    }

    /// Open a store file with a custom clock.
    ///
    /// Same as [`Store::open`] but allows injecting a clock for controllable
    /// timestamps in tests.
    ///
    /// Only available with the `testing` feature or in test builds.
    #[cfg(any(test, feature = "testing"))]
    pub fn open_with_clock(path: impl AsRef<Path>, clock: Arc<dyn Clock>) -> Result<Self> {
        Self::open_impl(path.as_ref(), clock)
    }

    /// Open a fresh, non-persistent store.
    pub fn in_memory() -> Result<Self> {
        Self::in_memory_impl(Arc::new(SystemClock))
    }

    /// Open a fresh, non-persistent store with a custom clock.
    ///
    /// Only available with the `testing` feature or in test builds.
    #[cfg(any(test, feature = "testing"))]
    pub fn in_memory_with_clock(clock: Arc<dyn Clock>) -> Result<Self> {
        Self::in_memory_impl(clock)
    }

    fn open_impl(path: &Path, clock: Arc<dyn Clock>) -> Result<Self> {
        let db = Database::create(path)?;
        Self::from_database(db, StoreLocation::File(path.to_path_buf()), clock)
    }

    fn in_memory_impl(clock: Arc<dyn Clock>) -> Result<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::from_database(db, StoreLocation::Memory, clock)
    }

    fn from_database(db: Database, location: StoreLocation, clock: Arc<dyn Clock>) -> Result<Self> {
        let store = Self {
            inner: Arc::new(StoreInner {
                db,
                location,
                clock,
            }),
        };
        store.bootstrap()?;
        Ok(store)
    }

    /// Create every namespace and the sequence table if they are missing.
    fn bootstrap(&self) -> Result<()> {
        self.write(|txn| {
            for namespace in Namespace::ALL {
                txn.txn.open_table(namespace.definition())?;
            }
            txn.txn.open_table(SEQUENCES_TABLE)?;
            Ok(())
        })?;
        info!(location = %self.inner.location, "Store opened");
        Ok(())
    }

    /// Where this store keeps its data.
    pub fn location(&self) -> &StoreLocation {
        &self.inner.location
    }

    /// The clock used for every timestamp written through this store.
    pub fn clock(&self) -> &dyn Clock {
        self.inner.clock.as_ref()
    }

    /// Run `f` inside a read-only transaction.
    ///
    /// Errors from `f` are returned unchanged.
    pub fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ReadTxn) -> Result<T>,
    {
        let txn = ReadTxn {
            txn: self.inner.db.begin_read()?,
        };
        f(&txn)
    }

    /// Run `f` inside a read-write transaction.
    ///
    /// Blocks until any in-flight write transaction finishes. Commits when `f`
    /// returns `Ok`; otherwise rolls back every write made by `f` and returns
    /// its error. A commit failure is returned as an engine error and nothing
    /// is retried.
    pub fn write<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&WriteTxn) -> Result<T>,
    {
        let txn = WriteTxn {
            txn: self.inner.db.begin_write()?,
        };
        match f(&txn) {
            Ok(value) => {
                txn.txn.commit()?;
                Ok(value)
            }
            Err(err) => {
                debug!(error = %err, "Rolling back write transaction");
                if let Err(abort_err) = txn.txn.abort() {
                    warn!(error = %abort_err, "Failed to roll back write transaction");
                }
                Err(err)
            }
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("location", &self.inner.location)
            .field("clock", &self.inner.clock)
            .finish()
    }
}

/// A read-only transaction scope handed to [`Store::read`] closures.
pub struct ReadTxn {
    txn: redb::ReadTransaction,
}

impl ReadTxn {
    /// Open a namespace for reading.
    pub fn bucket(&self, namespace: Namespace) -> Result<ReadBucket> {
        Ok(ReadBucket {
            namespace,
            table: self.txn.open_table(namespace.definition())?,
        })
    }
}

/// Read access to one namespace within a [`ReadTxn`].
pub struct ReadBucket {
    namespace: Namespace,
    table: redb::ReadOnlyTable<&'static [u8], &'static [u8]>,
}

impl ReadBucket {
    /// Raw bytes stored at `key`.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.table.get(key)?.map(|value| value.value().to_vec()))
    }

    /// Decode the JSON value stored at `key`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>> {
        match self.table.get(key)? {
            Some(value) => decode(self.namespace, key, value.value()).map(Some),
            None => Ok(None),
        }
    }

    /// Decode every value whose key starts with `prefix`, in key order.
    ///
    /// Key order is byte-lexicographic. The cursor starts at `prefix` and stops
    /// at the first key that no longer carries it.
    pub fn scan_prefix<T: DeserializeOwned>(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, T)>> {
        let mut out = Vec::new();
        for entry in self.table.range(prefix..)? {
            let (key_guard, value_guard) = entry?;
            let key = key_guard.value();
            if !key.starts_with(prefix) {
                break;
            }
            out.push((key.to_vec(), decode(self.namespace, key, value_guard.value())?));
        }
        Ok(out)
    }

    /// Number of records in the namespace.
    pub fn len(&self) -> Result<u64> {
        Ok(self.table.len()?)
    }

    /// Whether the namespace holds no records.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// A read-write transaction scope handed to [`Store::write`] closures.
pub struct WriteTxn {
    txn: redb::WriteTransaction,
}

impl WriteTxn {
    /// Open a namespace for reading and writing.
    ///
    /// Each namespace may be open at most once at a time within a transaction.
    pub fn bucket(&self, namespace: Namespace) -> Result<WriteBucket<'_>> {
        Ok(WriteBucket {
            namespace,
            table: self.txn.open_table(namespace.definition())?,
        })
    }

    /// Advance and return the sequence counter of `namespace`.
    ///
    /// The first draw returns 1. The draw is part of this transaction, so a
    /// rollback also un-draws it.
    pub fn next_sequence(&self, namespace: Namespace) -> Result<u64> {
        let mut sequences = self.txn.open_table(SEQUENCES_TABLE)?;
        let current = sequences
            .get(namespace.name())?
            .map(|value| value.value())
            .unwrap_or(0);
        let next = current
            .checked_add(1)
            .ok_or(StoreError::SequenceExhausted {
                namespace: namespace.name(),
            })?;
        sequences.insert(namespace.name(), next)?;
        Ok(next)
    }
}

/// Read-write access to one namespace within a [`WriteTxn`].
pub struct WriteBucket<'txn> {
    namespace: Namespace,
    table: redb::Table<'txn, &'static [u8], &'static [u8]>,
}

impl WriteBucket<'_> {
    /// Whether any value is stored at `key`.
    pub fn contains(&self, key: &[u8]) -> Result<bool> {
        Ok(self.table.get(key)?.is_some())
    }

    /// Decode the JSON value stored at `key`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>> {
        match self.table.get(key)? {
            Some(value) => decode(self.namespace, key, value.value()).map(Some),
            None => Ok(None),
        }
    }

    /// Encode `value` as JSON and store it at `key`, replacing any prior value.
    pub fn put_json<T: Serialize>(&mut self, key: &[u8], value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value).map_err(|source| StoreError::Encode {
            namespace: self.namespace.name(),
            source,
        })?;
        self.table.insert(key, bytes.as_slice())?;
        Ok(())
    }

    /// Remove the value at `key`. Returns whether a value was present.
    ///
    /// Removing an absent key is a no-op, not an error.
    pub fn delete(&mut self, key: &[u8]) -> Result<bool> {
        Ok(self.table.remove(key)?.is_some())
    }
}

fn decode<T: DeserializeOwned>(namespace: Namespace, key: &[u8], bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|source| {
        StoreError::Decode {
            namespace: namespace.name(),
            key: String::from_utf8_lossy(key).into_owned(),
            source,
        }
        .into()
    })
}
