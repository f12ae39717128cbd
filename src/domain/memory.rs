use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::SyncError;
use crate::domain::ports::TemplateStore;
use crate::domain::value_objects::RowId;

/// In-memory implementation of [`TemplateStore`].
///
/// Used by the test suite and by library consumers who want to exercise the
/// sync flow without a live database.
#[derive(Debug, Default)]
pub struct MemoryTemplateStore(Mutex<BTreeMap<i64, Value>>);

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row, replacing any existing document under the same id.
    pub fn insert(&self, id: RowId, document: Value) {
        self.0.lock().unwrap().insert(id.as_i64(), document);
    }

    /// Current document of a row, if any.
    pub fn get(&self, id: RowId) -> Option<Value> {
        self.0.lock().unwrap().get(&id.as_i64()).cloned()
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn fetch_document(&self, id: RowId) -> Result<Option<Value>, SyncError> {
        Ok(self.get(id))
    }

    async fn replace_document(&self, id: RowId, document: &Value) -> Result<(), SyncError> {
        let mut rows = self.0.lock().unwrap();
        match rows.get_mut(&id.as_i64()) {
            Some(slot) => {
                *slot = document.clone();
                Ok(())
            }
            None => Err(SyncError::RowNotFound(id)),
        }
    }
}
