//! Typed document collections over a [`KVStore`].
//!
//! A model implements [`Document`] to declare its collection and key.
//! [`DocOps<T>`] provides get/save/list/delete, storing each document as
//! JSON under `{collection}:{key}`.

use std::marker::PhantomData;
use std::sync::Arc;

use devconnector_core::ServiceError;
use devconnector_kv::{KVError, KVStore};
use serde::{de::DeserializeOwned, Serialize};

/// Trait implemented by models persisted as documents.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name, used as the key prefix: `"posts"`, `"users"`, ...
    const COLLECTION: &'static str;

    /// The document's key within its collection.
    fn key_value(&self) -> String;

    /// Called before inserting a new document. Use for auto-fill (id, date).
    fn before_create(&mut self) {}
}

/// Documents from any collections, removed together by [`DocOps::delete_batch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteBatch {
    keys: Vec<String>,
}

impl DeleteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the document `id` of collection `D`.
    pub fn with<D: Document>(mut self, id: &str) -> Self {
        self.keys.push(DocOps::<D>::make_key(id));
        self
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

/// CRUD operations for one collection. Holds a reference to the KV backend.
pub struct DocOps<T: Document> {
    kv: Arc<dyn KVStore>,
    _phantom: PhantomData<T>,
}

impl<T: Document> Clone for DocOps<T> {
    fn clone(&self) -> Self {
        Self::new(self.kv.clone())
    }
}

impl<T: Document> DocOps<T> {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            kv,
            _phantom: PhantomData,
        }
    }

    fn prefix() -> String {
        format!("{}:", T::COLLECTION)
    }

    fn make_key(id: &str) -> String {
        format!("{}:{}", T::COLLECTION, id)
    }

    fn kv_err(e: KVError) -> ServiceError {
        ServiceError::Storage(e.to_string())
    }

    fn decode(bytes: &[u8]) -> Result<T, ServiceError> {
        serde_json::from_slice(bytes)
            .map_err(|e| ServiceError::Internal(format!("deserialize {}: {}", T::COLLECTION, e)))
    }

    fn write(&self, record: &T) -> Result<(), ServiceError> {
        let key = Self::make_key(&record.key_value());
        let bytes = serde_json::to_vec(record)
            .map_err(|e| ServiceError::Internal(format!("serialize {}: {}", T::COLLECTION, e)))?;
        self.kv.set(&key, &bytes).map_err(Self::kv_err)
    }

    /// Get a document by key. Returns None if not found.
    pub fn get(&self, id: &str) -> Result<Option<T>, ServiceError> {
        match self.kv.get(&Self::make_key(id)).map_err(Self::kv_err)? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Get a document, or fail with the error built by `missing`.
    ///
    /// Each route reports absence with its own field and message, so the
    /// caller supplies the error.
    pub fn get_or(&self, id: &str, missing: impl FnOnce() -> ServiceError) -> Result<T, ServiceError> {
        self.get(id)?.ok_or_else(missing)
    }

    /// All documents in the collection, in key order.
    pub fn list(&self) -> Result<Vec<T>, ServiceError> {
        let entries = self.kv.scan(&Self::prefix()).map_err(Self::kv_err)?;
        entries.iter().map(|(_, bytes)| Self::decode(bytes)).collect()
    }

    /// First document matching `pred`. Scans the whole collection.
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Result<Option<T>, ServiceError> {
        Ok(self.list()?.into_iter().find(|doc| pred(doc)))
    }

    /// Create a new document. Calls `before_create`, refuses to overwrite.
    pub fn save_new(&self, mut record: T) -> Result<T, ServiceError> {
        record.before_create();

        let id = record.key_value();
        if self.kv.get(&Self::make_key(&id)).map_err(Self::kv_err)?.is_some() {
            return Err(ServiceError::Internal(format!(
                "{} '{}' already exists",
                T::COLLECTION,
                id
            )));
        }

        self.write(&record)?;
        tracing::debug!(collection = T::COLLECTION, id = %id, "created");
        Ok(record)
    }

    /// Insert or replace a document.
    pub fn save(&self, record: T) -> Result<T, ServiceError> {
        self.write(&record)?;
        Ok(record)
    }

    /// Remove a document. Removing a missing key is not an error.
    pub fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.kv.delete(&Self::make_key(id)).map_err(Self::kv_err)?;
        tracing::debug!(collection = T::COLLECTION, id = %id, "deleted");
        Ok(())
    }

    /// Remove `id` from this collection and every document in `batch`,
    /// all or nothing. Missing keys are skipped.
    pub fn delete_batch(&self, id: &str, batch: DeleteBatch) -> Result<(), ServiceError> {
        let batch = batch.with::<T>(id);
        let keys: Vec<&str> = batch.keys().iter().map(String::as_str).collect();
        self.kv.batch_delete(&keys).map_err(Self::kv_err)?;
        tracing::debug!(keys = ?keys, "batch deleted");
        Ok(())
    }
}
