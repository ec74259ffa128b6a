//! Key store: the single API credential.
//!
//! DESIGN
//! ======
//! The extension persists exactly one value: the provider API key, stored
//! under [`CREDENTIAL_STORAGE_KEY`]. Last write wins. Readers treat a missing,
//! blank or non-string value as absent. Stores never retry; callers decide how
//! to present a [`StorageError`].

#[cfg(test)]
#[path = "keystore_test.rs"]
mod keystore_test;

use std::cell::RefCell;
use std::fmt;

/// Storage key holding the credential in every backend.
pub const CREDENTIAL_STORAGE_KEY: &str = "geminiApiKey";

// =============================================================================
// CREDENTIAL
// =============================================================================

/// The provider API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Trim raw input into a credential; `None` when nothing is left.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() { None } else { Some(Self(trimmed.to_owned())) }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(****)")
    }
}

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by a credential store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The extension storage API rejected the read or write.
    #[error("storage backend failed: {0}")]
    Backend(String),

    /// A file-backed store could not be read or written.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted data could not be (de)serialized.
    #[error("stored data is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

// =============================================================================
// KEY STORE TRAIT
// =============================================================================

/// Read/write access to the persisted credential.
///
/// Futures are not `Send`: every backend runs on a single-threaded event
/// loop, and the browser bindings hold `JsValue`s.
#[async_trait::async_trait(?Send)]
pub trait KeyStore {
    /// Read the stored credential, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the read.
    async fn get(&self) -> Result<Option<Credential>, StorageError>;

    /// Replace the stored credential.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the write.
    async fn set(&self, credential: &Credential) -> Result<(), StorageError>;
}

#[async_trait::async_trait(?Send)]
impl<T: KeyStore + ?Sized> KeyStore for std::rc::Rc<T> {
    async fn get(&self) -> Result<Option<Credential>, StorageError> {
        (**self).get().await
    }

    async fn set(&self, credential: &Credential) -> Result<(), StorageError> {
        (**self).set(credential).await
    }
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Process-local store, used by tests and embedders without persistence.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    value: RefCell<Option<Credential>>,
}

impl MemoryKeyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_credential(credential: Credential) -> Self {
        Self { value: RefCell::new(Some(credential)) }
    }
}

#[async_trait::async_trait(?Send)]
impl KeyStore for MemoryKeyStore {
    async fn get(&self) -> Result<Option<Credential>, StorageError> {
        Ok(self.value.borrow().clone())
    }

    async fn set(&self, credential: &Credential) -> Result<(), StorageError> {
        *self.value.borrow_mut() = Some(credential.clone());
        Ok(())
    }
}
