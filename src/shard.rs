use hashbrown::HashMap;
use parking_lot::{Mutex, RwLock};

/// Key/value table owned by a shard or by an unsharded map.
pub(crate) type Table<V> = HashMap<String, V>;

pub(crate) fn new_table<V>(capacity: Option<usize>) -> Table<V> {
    match capacity {
        Some(capacity) => HashMap::with_capacity(capacity),
        None => HashMap::new(),
    }
}

/// Overwrite in place when the key exists, so only new keys allocate.
#[inline]
pub(crate) fn upsert<V>(table: &mut Table<V>, key: &str, value: V) {
    match table.get_mut(key) {
        Some(slot) => *slot = value,
        None => {
            table.insert(key.to_owned(), value);
        }
    }
}

/// A table protected by an exclusive lock.
pub(crate) struct MutexShard<V> {
    table: Mutex<Table<V>>,
}

impl<V: Clone> MutexShard<V> {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            table: Mutex::new(new_table(capacity)),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.table.lock().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: V) {
        upsert(&mut self.table.lock(), key, value);
    }

    pub fn len(&self) -> usize {
        self.table.lock().len()
    }
}

/// A table protected by a read-write lock, both in one record.
pub(crate) struct RwLockShard<V> {
    table: RwLock<Table<V>>,
}

impl<V: Clone> RwLockShard<V> {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            table: RwLock::new(new_table(capacity)),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.table.read().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: V) {
        upsert(&mut self.table.write(), key, value);
    }

    pub fn len(&self) -> usize {
        self.table.read().len()
    }
}
