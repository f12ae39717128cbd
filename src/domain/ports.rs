use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::SyncError;
use crate::domain::text_diff::DiffLine;
use crate::domain::value_objects::RowId;

/// Port: access to the JSON document of a template row
/// (implemented by PgTemplateStore, and in memory by MemoryTemplateStore).
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Fetch the document of the row with the given id, `None` if absent.
    async fn fetch_document(&self, id: RowId) -> Result<Option<Value>, SyncError>;

    /// Overwrite the row's document. Fails with [`SyncError::RowNotFound`]
    /// when the row no longer exists.
    async fn replace_document(&self, id: RowId, document: &Value) -> Result<(), SyncError>;
}

/// Port: interactive consent before overwriting (implemented by StdinPrompt).
///
/// The implementation is expected to show `diff` to the user and return
/// whether the answer was affirmative.
pub trait ConfirmPrompt {
    fn confirm_overwrite(&mut self, diff: &[DiffLine]) -> Result<bool, SyncError>;
}
