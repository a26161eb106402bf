use serde::{Deserialize, Serialize};
use web_sys::{window, Storage};

pub const KEY_SETTINGS: &str = "flow_settings_v1";
pub const KEY_GITHUB_REPO: &str = "flow_github_repo_v1";

/// JSON values in `window.localStorage`. Every call degrades to a no-op when
/// storage is unavailable (private mode, no window).
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<Storage> {
        window()?.local_storage().ok()?
    }

    pub fn get<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
        let json = Self::storage()?.get_item(key).ok()??;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("[Storage] discarding unreadable {}: {}", key, e);
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(key: &str, value: &T) {
        let Some(storage) = Self::storage() else { return };
        match serde_json::to_string(value) {
            Ok(json) => {
                if storage.set_item(key, &json).is_err() {
                    log::warn!("[Storage] could not write {}", key);
                }
            }
            Err(e) => log::error!("[Storage] could not encode {}: {}", key, e),
        }
    }

    pub fn remove(key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
