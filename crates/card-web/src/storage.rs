use card_engine::{SessionStore, StoreError};
use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};

/// `sessionStorage`, when the browser lets us have it.
pub struct BrowserSession {
    storage: Option<Storage>,
}

impl BrowserSession {
    pub fn new(window: &Window) -> Self {
        let storage = match window.session_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("sessionStorage blocked: {}", describe(&err));
                None
            }
        };
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("no sessionStorage on this window".to_string()))
    }
}

impl SessionStore for BrowserSession {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StoreError::Unavailable(describe(&err)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StoreError::WriteRejected {
                key: key.to_string(),
                reason: describe(&err),
            })
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
