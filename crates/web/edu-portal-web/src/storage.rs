//! Session token kept in `window.localStorage`.

use edu_portal_controllers::{StoreError, StoreResult, TOKEN_KEY, TokenStore};
use wasm_bindgen::JsValue;
use web_sys::Storage;

fn js_error(context: &str, err: JsValue) -> StoreError {
    StoreError::Unavailable(format!("{context}: {err:?}"))
}

pub struct LocalStorageTokenStore {
    storage: Storage,
}

impl LocalStorageTokenStore {
    pub fn new() -> StoreResult<Self> {
        let storage = gloo_utils::window()
            .local_storage()
            .map_err(|e| js_error("localStorage access denied", e))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))?;

        Ok(Self { storage })
    }
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> StoreResult<Option<String>> {
        self.storage
            .get_item(TOKEN_KEY)
            .map_err(|e| js_error("failed to read token", e))
    }

    fn save(&self, token: &str) -> StoreResult<()> {
        self.storage
            .set_item(TOKEN_KEY, token)
            .map_err(|e| js_error("failed to write token", e))
    }

    fn clear(&self) -> StoreResult<()> {
        self.storage
            .remove_item(TOKEN_KEY)
            .map_err(|e| js_error("failed to remove token", e))
    }
}
