use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::domain::errors::SyncError;

/// Parse the JSON template file at `path`.
///
/// Missing files, permission problems, and malformed JSON map to the two
/// file-error variants, each carrying the offending path.
pub fn load_document(path: &Path) -> Result<Value, SyncError> {
    let text = std::fs::read_to_string(path).map_err(|source| SyncError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let document = serde_json::from_str(&text).map_err(|source| SyncError::FileParse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded template document from {}", path.display());
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_a_valid_document() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"name": "welcome-mail", "version": 3}"#)
            .unwrap();
        let doc = load_document(file.path()).unwrap();
        assert_eq!(doc, json!({"name": "welcome-mail", "version": 3}));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_document(Path::new("/nonexistent/template.json")).unwrap_err();
        assert!(matches!(err, SyncError::FileRead { .. }));
        assert!(err.to_string().contains("/nonexistent/template.json"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{\"name\": ").unwrap();
        let err = load_document(file.path()).unwrap_err();
        assert!(matches!(err, SyncError::FileParse { .. }));
    }
}
