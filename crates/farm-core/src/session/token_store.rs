//! Token Persistence
//!
//! The bearer token lives in two places: a storage key the app reads, and
//! a cookie the route gate reads. Saving and clearing always touch both.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::config::AppConfig;
use crate::gate::parse_cookie;

/// Where the token is written
#[derive(Debug, Clone, PartialEq)]
pub struct TokenLocations {
    pub storage_key: String,
    pub cookie_name: String,
    pub cookie_max_age_secs: u64,
}

impl TokenLocations {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            storage_key: config.token_storage_key.clone(),
            cookie_name: config.cookie_name.clone(),
            cookie_max_age_secs: config.cookie_max_age_secs,
        }
    }

    /// `document.cookie` assignment that stores the token
    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; path=/; max-age={}; secure; samesite=strict",
            self.cookie_name, token, self.cookie_max_age_secs
        )
    }

    /// `document.cookie` assignment that deletes the token
    pub fn expired_cookie(&self) -> String {
        format!("{}=; path=/; max-age=0; secure; samesite=strict", self.cookie_name)
    }
}

pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// In-memory storage map plus cookie jar
#[derive(Debug)]
pub struct MemoryTokenStore {
    locations: TokenLocations,
    storage: RefCell<HashMap<String, String>>,
    cookies: RefCell<HashMap<String, String>>,
    last_cookie_write: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(locations: TokenLocations) -> Self {
        Self {
            locations,
            storage: RefCell::new(HashMap::new()),
            cookies: RefCell::new(HashMap::new()),
            last_cookie_write: RefCell::new(None),
        }
    }

    pub fn storage_value(&self) -> Option<String> {
        self.storage.borrow().get(&self.locations.storage_key).cloned()
    }

    pub fn cookie_value(&self) -> Option<String> {
        self.cookies.borrow().get(&self.locations.cookie_name).cloned()
    }

    /// Last raw `document.cookie` style assignment
    pub fn last_cookie_write(&self) -> Option<String> {
        self.last_cookie_write.borrow().clone()
    }

    fn write_cookie(&self, assignment: String) {
        let value = parse_cookie(&assignment, &self.locations.cookie_name).unwrap_or_default();
        let mut cookies = self.cookies.borrow_mut();
        if assignment.contains("max-age=0") || value.is_empty() {
            cookies.remove(&self.locations.cookie_name);
        } else {
            cookies.insert(self.locations.cookie_name.clone(), value.to_string());
        }
        *self.last_cookie_write.borrow_mut() = Some(assignment);
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.storage_value().or_else(|| self.cookie_value())
    }

    fn save(&self, token: &str) {
        self.storage
            .borrow_mut()
            .insert(self.locations.storage_key.clone(), token.to_string());
        self.write_cookie(self.locations.session_cookie(token));
    }

    fn clear(&self) {
        self.storage.borrow_mut().remove(&self.locations.storage_key);
        self.write_cookie(self.locations.expired_cookie());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locations() -> TokenLocations {
        TokenLocations::from_config(&AppConfig::default())
    }

    #[test]
    fn test_session_cookie_attributes() {
        assert_eq!(
            locations().session_cookie("abc"),
            "farm_mall_token=abc; path=/; max-age=604800; secure; samesite=strict"
        );
        assert_eq!(
            locations().expired_cookie(),
            "farm_mall_token=; path=/; max-age=0; secure; samesite=strict"
        );
    }

    #[test]
    fn test_save_and_clear_touch_both_locations() {
        let store = MemoryTokenStore::new(locations());
        store.save("jwt-1");
        assert_eq!(store.storage_value().as_deref(), Some("jwt-1"));
        assert_eq!(store.cookie_value().as_deref(), Some("jwt-1"));

        store.clear();
        assert_eq!(store.storage_value(), None);
        assert_eq!(store.cookie_value(), None);
        assert!(store.last_cookie_write().unwrap().contains("max-age=0"));
    }
}
