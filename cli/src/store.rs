//! File-backed credential store for the native harness.
//!
//! Keeps the same shape the extension keeps in `chrome.storage.sync`: a JSON
//! object with the key under `geminiApiKey`. Other keys in the file are
//! preserved on write.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use common::{CREDENTIAL_STORAGE_KEY, Credential, KeyStore, StorageError};
use serde_json::{Map, Value};

const APP_DIR: &str = "text-explainer";
const FILE_NAME: &str = "credentials.json";

#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/text-explainer/credentials.json`, if the platform has a
    /// config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored object, or an empty one when the file does not exist yet.
    fn read_items(&self) -> Result<Map<String, Value>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&text)? {
            Value::Object(items) => Ok(items),
            other => Err(StorageError::Backend(format!(
                "{} holds a JSON {} instead of an object",
                self.path.display(),
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait::async_trait(?Send)]
impl KeyStore for FileKeyStore {
    async fn get(&self) -> Result<Option<Credential>, StorageError> {
        let items = self.read_items()?;
        Ok(items
            .get(CREDENTIAL_STORAGE_KEY)
            .and_then(Value::as_str)
            .and_then(Credential::parse))
    }

    async fn set(&self, credential: &Credential) -> Result<(), StorageError> {
        let mut items = self.read_items()?;
        items.insert(CREDENTIAL_STORAGE_KEY.to_owned(), Value::String(credential.as_str().to_owned()));
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(items))?)?;
        Ok(())
    }
}
