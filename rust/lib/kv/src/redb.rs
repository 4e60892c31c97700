use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};
use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("documents");

/// RedbStore is a KVStore backed by redb, a pure-Rust embedded
/// key-value database. Every write is its own committed transaction.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        let db = Database::create(path).map_err(KVError::storage)?;

        // Ensure the table exists so read transactions never miss it.
        let write_txn = db.begin_write().map_err(KVError::storage)?;
        write_txn.open_table(TABLE).map_err(KVError::storage)?;
        write_txn.commit().map_err(KVError::storage)?;

        debug!("RedbStore: opened {:?}", path);
        Ok(Self { db: Arc::new(db) })
    }

    /// Run `f` against the table inside a single committed write transaction.
    fn write<F>(&self, f: F) -> Result<(), KVError>
    where
        F: FnOnce(&mut redb::Table<'_, &'static str, &'static [u8]>) -> Result<(), redb::StorageError>,
    {
        let write_txn = self.db.begin_write().map_err(KVError::storage)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(KVError::storage)?;
            f(&mut table).map_err(KVError::storage)?;
        }
        write_txn.commit().map_err(KVError::storage)
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let read_txn = self.db.begin_read().map_err(KVError::storage)?;
        let table = read_txn.open_table(TABLE).map_err(KVError::storage)?;

        let value = table.get(key).map_err(KVError::storage)?;
        Ok(value.map(|v| v.value().to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.write(|table| table.insert(key, value).map(|_| ()))
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        self.write(|table| table.remove(key).map(|_| ()))
    }

    fn batch_delete(&self, keys: &[&str]) -> Result<(), KVError> {
        self.write(|table| {
            for key in keys {
                table.remove(*key)?;
            }
            Ok(())
        })
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let read_txn = self.db.begin_read().map_err(KVError::storage)?;
        let table = read_txn.open_table(TABLE).map_err(KVError::storage)?;

        let mut results = Vec::new();
        for entry in table.range(prefix..).map_err(KVError::storage)? {
            let (key, value) = entry.map_err(KVError::storage)?;
            let key = key.value();
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key.to_string(), value.value().to_vec()));
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_tmp() -> (RedbStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(&dir.path().join("test.redb")).unwrap();
        (store, dir)
    }

    #[test]
    fn set_get_delete() {
        let (store, _dir) = open_tmp();
        store.set("posts:1", b"hello").unwrap();
        assert_eq!(store.get("posts:1").unwrap(), Some(b"hello".to_vec()));

        store.delete("posts:1").unwrap();
        assert_eq!(store.get("posts:1").unwrap(), None);
    }

    #[test]
    fn delete_missing_is_ok() {
        let (store, _dir) = open_tmp();
        store.delete("nothing:here").unwrap();
    }

    #[test]
    fn scan_respects_prefix_boundary() {
        let (store, _dir) = open_tmp();
        store.set("posts:b", b"2").unwrap();
        store.set("posts:a", b"1").unwrap();
        store.set("profiles:a", b"x").unwrap();
        store.set("postsx:a", b"y").unwrap();

        let rows = store.scan("posts:").unwrap();
        let keys: Vec<&str> = rows.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["posts:a", "posts:b"]);
    }

    #[test]
    fn batch_delete_removes_all() {
        let (store, _dir) = open_tmp();
        store.set("users:1", b"u").unwrap();
        store.set("profiles:1", b"p").unwrap();
        store.batch_delete(&["users:1", "profiles:1"]).unwrap();
        assert!(store.get("users:1").unwrap().is_none());
        assert!(store.get("profiles:1").unwrap().is_none());
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store.set("users:1", b"alice").unwrap();
        }
        let store = RedbStore::open(&path).unwrap();
        assert_eq!(store.get("users:1").unwrap(), Some(b"alice".to_vec()));
    }
}
