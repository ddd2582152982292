//! Session token persistence.
//!
//! The token lives in exactly one place, a [`TokenStore`], and every
//! controller reaches it through an explicit [`Session`] handle.

use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, warn};

/// Key under which the token is persisted.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Token storage unavailable: {0}")]
    Unavailable(String),

    #[error("Token storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token storage format error: {0}")]
    Format(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Backing storage for the session token.
pub trait TokenStore {
    fn load(&self) -> StoreResult<Option<String>>;

    fn save(&self, token: &str) -> StoreResult<()>;

    fn clear(&self) -> StoreResult<()>;
}

/// In-memory store; clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(token.into()))),
        }
    }

    pub fn peek(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> StoreResult<Option<String>> {
        Ok(self.peek())
    }

    fn save(&self, token: &str) -> StoreResult<()> {
        *self.slot.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileTokenStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::{StoreResult, TOKEN_KEY, TokenStore};
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    /// JSON file holding `{ "token": "..." }`.
    #[derive(Debug, Clone)]
    pub struct FileTokenStore {
        path: PathBuf,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct StoredEntries(BTreeMap<String, String>);

    impl FileTokenStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_entries(&self) -> StoreResult<StoredEntries> {
            if !self.path.exists() {
                return Ok(StoredEntries::default());
            }
            let contents = std::fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&contents)?)
        }
    }

    impl TokenStore for FileTokenStore {
        fn load(&self) -> StoreResult<Option<String>> {
            Ok(self.read_entries()?.0.remove(TOKEN_KEY))
        }

        fn save(&self, token: &str) -> StoreResult<()> {
            if let Some(dir) = self.path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let mut entries = self.read_entries().unwrap_or_default();
            entries.0.insert(TOKEN_KEY.to_string(), token.to_string());
            std::fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
            Ok(())
        }

        fn clear(&self) -> StoreResult<()> {
            if self.path.exists() {
                std::fs::remove_file(&self.path)?;
            }
            Ok(())
        }
    }
}

/// Handle to the current session, shared by the controllers of a page.
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Rc::new(store),
        }
    }

    /// The stored token. Unreadable storage and empty tokens count as absent.
    pub fn token(&self) -> Option<String> {
        match self.store.load() {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(err) => {
                warn!(error = %err, "Failed to read session token");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn begin(&self, token: &str) -> StoreResult<()> {
        debug!("Storing session token");
        self.store.save(token)
    }

    /// Forget the token locally. The server is not contacted.
    pub fn end(&self) {
        debug!("Clearing session token");
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "Failed to clear session token");
        }
    }
}
