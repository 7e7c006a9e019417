//! Persistent session record, kept in `localStorage` under the keys the
//! backend-era front end used. Framework-free so it can be driven from tests.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{cell::RefCell, collections::HashMap, rc::Rc};
use thiserror::Error;

use crate::{
    api::{ApiError, Employee, LoginData, Module, Role},
    state::menu,
    utils::{storage as storage_utils, token},
};

pub const TOKEN_KEY: &str = "token";
pub const ROLES_KEY: &str = "roles";
pub const MODULES_KEY: &str = "modules";
pub const MENUS_KEY: &str = "menus";
pub const USER_KEY: &str = "user";
pub const USER_DATA_KEY: &str = "userData";
pub const FULL_NAME_KEY: &str = "userFullName";
pub const EMPLOYEE_ID_KEY: &str = "employeeID";
pub const REMEMBERED_EMAIL_KEY: &str = "rememberedEmail";

/// Keys removed on logout. `rememberedEmail` deliberately survives.
pub const SESSION_KEYS: &[&str] = &[
    TOKEN_KEY,
    ROLES_KEY,
    MODULES_KEY,
    MENUS_KEY,
    USER_KEY,
    USER_DATA_KEY,
    FULL_NAME_KEY,
    EMPLOYEE_ID_KEY,
];

pub const ADMIN_ROLE: &str = "Administrador";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("localStorage is not available: {0}")]
    Unavailable(String),
    #[error("failed to read `{0}`")]
    Read(String),
    #[error("failed to write `{0}`")]
    Write(String),
    #[error("failed to remove `{0}`")]
    Remove(String),
    #[error("failed to serialize `{key}`: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::storage(err.to_string())
    }
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        storage_utils::local_storage()
            .map_err(StorageError::Unavailable)?
            .get_item(key)
            .map_err(|_| StorageError::Read(key.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        storage_utils::local_storage()
            .map_err(StorageError::Unavailable)?
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        storage_utils::local_storage()
            .map_err(StorageError::Unavailable)?
            .remove_item(key)
            .map_err(|_| StorageError::Remove(key.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Stored under `user`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    #[serde(rename = "userID")]
    pub user_id: i64,
    #[serde(rename = "employeeID")]
    pub employee_id: i64,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub employee_id: Option<i64>,
    pub user_id: Option<i64>,
    pub roles: Vec<Role>,
    pub modules: Vec<Module>,
    pub full_name: Option<String>,
}

/// Handle over the session keys. Cheap to clone; every clone shares one
/// backend.
#[derive(Clone)]
pub struct SessionStore {
    backend: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn browser() -> Self {
        Self::with_backend(Rc::new(BrowserStorage))
    }

    pub fn in_memory() -> Self {
        Self::with_backend(Rc::new(MemoryStorage::default()))
    }

    pub fn with_backend(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(err) => {
                log::warn!("session read failed: {}", err);
                None
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("stored `{}` is not valid JSON: {}", key, err);
                None
            }
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &raw)
    }

    pub fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    pub fn roles(&self) -> Vec<Role> {
        self.read_json(ROLES_KEY).unwrap_or_default()
    }

    pub fn modules(&self) -> Vec<Module> {
        self.read_json(MODULES_KEY).unwrap_or_default()
    }

    pub fn menu(&self) -> Vec<menu::MenuEntry> {
        self.read_json(MENUS_KEY)
            .unwrap_or_else(|| menu::build_menu(&self.roles(), &self.modules()))
    }

    pub fn employee_id(&self) -> Option<i64> {
        self.read(EMPLOYEE_ID_KEY)
            .and_then(|raw| raw.trim().parse().ok())
    }

    pub fn user(&self) -> Option<StoredUser> {
        self.read_json(USER_KEY)
    }

    pub fn full_name(&self) -> Option<String> {
        self.read(FULL_NAME_KEY)
    }

    pub fn snapshot(&self) -> Session {
        Session {
            token: self.token(),
            employee_id: self.employee_id(),
            user_id: self.user().map(|u| u.user_id),
            roles: self.roles(),
            modules: self.modules(),
            full_name: self.full_name(),
        }
    }

    /// Writes everything the login response carries. The token goes last so a
    /// stored token always has its roles and modules next to it.
    pub fn persist_login(&self, data: &LoginData, email: &str) -> Result<(), StorageError> {
        self.write_json(ROLES_KEY, &data.roles)?;
        self.write_json(MODULES_KEY, &data.modules)?;
        self.write_json(MENUS_KEY, &menu::build_menu(&data.roles, &data.modules))?;
        self.write_json(
            USER_KEY,
            &StoredUser {
                user_id: data.user_id,
                employee_id: data.employee_id,
                email: email.to_string(),
            },
        )?;
        self.backend
            .set(EMPLOYEE_ID_KEY, &data.employee_id.to_string())?;
        self.backend.set(TOKEN_KEY, &data.token)
    }

    pub fn persist_profile(&self, employee: &Employee) -> Result<String, StorageError> {
        let full_name = employee.person.full_name();
        self.write_json(USER_DATA_KEY, employee)?;
        self.backend.set(FULL_NAME_KEY, &full_name)?;
        Ok(full_name)
    }

    /// Removes every session key. Individual failures are logged and skipped so
    /// one bad key cannot keep the rest of the session alive.
    pub fn clear(&self) {
        for key in SESSION_KEYS {
            if let Err(err) = self.backend.remove(key) {
                log::warn!("failed to clear session key: {}", err);
            }
        }
    }

    pub fn is_token_expired_at(&self, now_secs: i64) -> bool {
        match self.token() {
            Some(token) => token::is_expired_at(&token, now_secs),
            None => true,
        }
    }

    pub fn is_token_expired(&self) -> bool {
        self.is_token_expired_at(chrono::Utc::now().timestamp())
    }

    /// True when a stored module path is a path-segment prefix of `url`.
    pub fn check_route_permission(&self, url: &str) -> bool {
        self.modules()
            .iter()
            .any(|module| path_has_prefix(url, &module.module_path))
    }

    pub fn has_role(&self, role_name: &str) -> bool {
        self.roles()
            .iter()
            .any(|role| role.role_name.trim().eq_ignore_ascii_case(role_name))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    pub fn remember_email(&self, email: &str) -> Result<(), StorageError> {
        self.backend.set(REMEMBERED_EMAIL_KEY, email.trim())
    }

    pub fn remembered_email(&self) -> Option<String> {
        self.read(REMEMBERED_EMAIL_KEY)
    }

    pub fn forget_email(&self) -> Result<(), StorageError> {
        self.backend.remove(REMEMBERED_EMAIL_KEY)
    }
}

/// `/menu/projects` is a prefix of `/menu/projects` and `/menu/projects/3`
/// but not of `/menu/projectsX`. Query strings and fragments are ignored.
pub fn path_has_prefix(url: &str, prefix: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_end_matches('/');
    let prefix = prefix.trim().trim_end_matches('/');
    if prefix.is_empty() {
        return false;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn browser_storage_round_trips_and_clears() {
        let store = SessionStore::browser();
        store.clear();
        BrowserStorage.set(TOKEN_KEY, "a.b.c").unwrap();
        BrowserStorage.set(EMPLOYEE_ID_KEY, "9").unwrap();
        assert_eq!(store.token().as_deref(), Some("a.b.c"));
        assert_eq!(store.employee_id(), Some(9));
        store.clear();
        assert!(store.token().is_none());
    }
}
