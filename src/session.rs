use std::cell::RefCell;

use ammowatch_shared::{HEADER_AUTHORIZATION, Identity, Session};
use tracing::{info, warn};

use crate::config::ClientConfig;

// =========================================================
// Storage abstraction
// =========================================================

/// String key/value persistence (`window.localStorage` in the browser).
///
/// Failures are swallowed by implementations: an unavailable store reads as
/// empty and writes report `false`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

/// The process-wide auth state. Mutated only by login, token verification
/// and logout.
pub trait SessionStore {
    /// `None` when no token is stored.
    fn get(&self) -> Option<Session>;
    fn set(&self, session: &Session);
    /// Replaces the identity of an existing session, keeping its token.
    fn set_identity(&self, identity: &Identity);
    fn clear(&self);

    fn token(&self) -> Option<String> {
        self.get().map(|s| s.token)
    }

    /// `("Authorization", "Bearer <token>")`, or `None` without a session.
    fn auth_header(&self) -> Option<(&'static str, String)> {
        self.token()
            .map(|token| (HEADER_AUTHORIZATION, format!("Bearer {token}")))
    }
}

// =========================================================
// Persistent store (two entries: token + JSON identity)
// =========================================================

pub struct PersistentSessionStore<K> {
    kv: K,
    token_key: String,
    identity_key: String,
}

impl<K: KeyValueStore> PersistentSessionStore<K> {
    pub fn new(kv: K, config: &ClientConfig) -> Self {
        Self {
            kv,
            token_key: config.token_key.clone(),
            identity_key: config.identity_key.clone(),
        }
    }

    pub fn inner(&self) -> &K {
        &self.kv
    }

    fn write_identity(&self, identity: &Identity) {
        match serde_json::to_string(identity) {
            Ok(json) => {
                if !self.kv.set(&self.identity_key, &json) {
                    warn!(key = %self.identity_key, "identity not persisted");
                }
            }
            Err(e) => warn!(error = %e, "identity not serializable"),
        }
    }
}

impl<K: KeyValueStore> SessionStore for PersistentSessionStore<K> {
    fn get(&self) -> Option<Session> {
        let token = self.kv.get(&self.token_key).filter(|t| !t.is_empty())?;

        let user = self.kv.get(&self.identity_key).and_then(|raw| {
            serde_json::from_str::<Identity>(&raw)
                .inspect_err(|e| warn!(error = %e, "discarding corrupt stored identity"))
                .ok()
        });

        Some(Session { token, user })
    }

    fn set(&self, session: &Session) {
        // Identity first: whoever sees the token must also see its identity.
        match &session.user {
            Some(identity) => self.write_identity(identity),
            None => {
                self.kv.remove(&self.identity_key);
            }
        }
        if !self.kv.set(&self.token_key, &session.token) {
            warn!(key = %self.token_key, "token not persisted");
        }
        info!(role = ?session.role(), "session stored");
    }

    fn set_identity(&self, identity: &Identity) {
        self.write_identity(identity);
    }

    fn clear(&self) {
        self.kv.remove(&self.token_key);
        self.kv.remove(&self.identity_key);
        info!("session cleared");
    }
}

// =========================================================
// In-memory store
// =========================================================

#[derive(Default)]
pub struct MemorySessionStore {
    slot: RefCell<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            slot: RefCell::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<Session> {
        self.slot.borrow().clone()
    }

    fn set(&self, session: &Session) {
        *self.slot.borrow_mut() = Some(session.clone());
    }

    fn set_identity(&self, identity: &Identity) {
        if let Some(session) = self.slot.borrow_mut().as_mut() {
            session.user = Some(identity.clone());
        }
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}

// =========================================================
// Test utility: MemoryKeyValue
// =========================================================

#[cfg(test)]
#[derive(Default)]
pub struct MemoryKeyValue {
    pub entries: RefCell<std::collections::HashMap<String, String>>,
    /// Every mutation in order, as `set:<key>` / `remove:<key>`.
    pub journal: RefCell<Vec<String>>,
}

#[cfg(test)]
impl KeyValueStore for MemoryKeyValue {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.journal.borrow_mut().push(format!("set:{key}"));
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.journal.borrow_mut().push(format!("remove:{key}"));
        self.entries.borrow_mut().remove(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ammowatch_shared::Role;

    fn identity(role: Role) -> Identity {
        Identity {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            role,
        }
    }

    fn persistent() -> PersistentSessionStore<MemoryKeyValue> {
        PersistentSessionStore::new(MemoryKeyValue::default(), &ClientConfig::default())
    }

    #[test]
    fn test_persistent_round_trip_and_header() {
        let store = persistent();
        assert!(store.get().is_none());
        assert!(store.auth_header().is_none());

        store.set(&Session::new("tok-1", identity(Role::Worker)));
        let session = store.get().unwrap();
        assert_eq!(session.token, "tok-1");
        assert_eq!(session.role(), Some(Role::Worker));
        assert_eq!(
            store.auth_header(),
            Some(("Authorization", "Bearer tok-1".to_string()))
        );
    }

    #[test]
    fn test_write_and_clear_order() {
        let store = persistent();
        store.set(&Session::new("tok", identity(Role::Admin)));
        store.clear();

        let journal = store.inner().journal.borrow().clone();
        assert_eq!(
            journal,
            [
                "set:userInfo",
                "set:authToken",
                "remove:authToken",
                "remove:userInfo"
            ]
        );
        assert!(store.get().is_none());
    }

    #[test]
    fn test_corrupt_identity_reads_as_absent() {
        let store = persistent();
        store.inner().set("authToken", "tok");
        store.inner().set("userInfo", "{not json");

        let session = store.get().unwrap();
        assert_eq!(session.token, "tok");
        assert!(session.user.is_none());
    }

    #[test]
    fn test_set_identity_keeps_token() {
        let store = persistent();
        store.set(&Session::new("tok", identity(Role::User)));

        let mut promoted = identity(Role::Admin);
        promoted.name = "Asha K".into();
        store.set_identity(&promoted);

        let session = store.get().unwrap();
        assert_eq!(session.token, "tok");
        assert_eq!(session.user, Some(promoted));
    }

    #[test]
    fn test_memory_store() {
        let store = MemorySessionStore::new();
        store.set_identity(&identity(Role::User));
        assert!(store.get().is_none());

        store.set(&Session::new("t", identity(Role::User)));
        store.set_identity(&identity(Role::Worker));
        assert_eq!(store.get().unwrap().role(), Some(Role::Worker));

        store.clear();
        assert!(store.token().is_none());
    }
}
