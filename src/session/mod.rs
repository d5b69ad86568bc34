//! Session and token store
//!
//! Holds the current credential set (user + access token + refresh token) as
//! a single all-or-nothing unit, persists it across restarts, and exposes the
//! accessors the request layer reads on every call.

pub mod jwt;

use std::sync::RwLock;

use crate::error::ApiResult;
use crate::models::User;
use crate::storage::StateStore;

const ACCESS_TOKEN_KEY: &str = "access_token";
const REFRESH_TOKEN_KEY: &str = "refresh_token";
const USER_KEY: &str = "user";

/// Fully populated credential set. A session is never partially filled;
/// anything less than all three fields is treated as logged out.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// In-memory session guarded by a lock, mirrored to the state store
#[derive(Debug)]
pub struct SessionStore {
    current: RwLock<Option<Session>>,
    store: StateStore,
}

impl SessionStore {
    /// Load the persisted session if it is internally consistent.
    ///
    /// All three keys must be present and parseable; otherwise the persisted
    /// copy is discarded wholesale so we never resume from a torn write.
    pub fn load(store: StateStore) -> Self {
        let access_token = store.get::<String>(ACCESS_TOKEN_KEY);
        let refresh_token = store.get::<String>(REFRESH_TOKEN_KEY);
        let user = store.get::<User>(USER_KEY);

        let session = match (access_token, refresh_token, user) {
            (Some(access_token), Some(refresh_token), Some(user)) => Some(Session {
                user,
                access_token,
                refresh_token,
            }),
            (None, None, None) => None,
            _ => {
                tracing::warn!("Discarding partially persisted session");
                store.remove(ACCESS_TOKEN_KEY);
                store.remove(REFRESH_TOKEN_KEY);
                store.remove(USER_KEY);
                None
            }
        };

        Self {
            current: RwLock::new(session),
            store,
        }
    }

    /// Replace the session atomically and persist it
    pub fn set_session(&self, session: Session) -> ApiResult<()> {
        self.store.set(ACCESS_TOKEN_KEY, &session.access_token)?;
        self.store.set(REFRESH_TOKEN_KEY, &session.refresh_token)?;
        self.store.set(USER_KEY, &session.user)?;
        *self.current.write().expect("session lock poisoned") = Some(session);
        Ok(())
    }

    /// Apply a refresh outcome: new access token, rotated refresh token and
    /// updated identity only when the server sent them
    pub fn apply_refresh(
        &self,
        access_token: String,
        refresh_token: Option<String>,
        user: Option<User>,
    ) -> ApiResult<()> {
        let mut guard = self.current.write().expect("session lock poisoned");
        if let Some(session) = guard.as_mut() {
            session.access_token = access_token;
            if let Some(rotated) = refresh_token {
                session.refresh_token = rotated;
            }
            if let Some(user) = user {
                session.user = user;
            }
            self.store.set(ACCESS_TOKEN_KEY, &session.access_token)?;
            self.store.set(REFRESH_TOKEN_KEY, &session.refresh_token)?;
            self.store.set(USER_KEY, &session.user)?;
        }
        Ok(())
    }

    /// Wipe in-memory and persisted state; safe to call when already empty
    pub fn clear(&self) {
        *self.current.write().expect("session lock poisoned") = None;
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(REFRESH_TOKEN_KEY);
        self.store.remove(USER_KEY);
    }

    pub fn user(&self) -> Option<User> {
        self.current
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.user.clone())
    }

    pub fn access_token(&self) -> Option<String> {
        self.current
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.current
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.refresh_token.clone())
    }

    /// True iff user and both tokens are present
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .expect("session lock poisoned")
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use uuid::Uuid;

    fn temp_store() -> StateStore {
        let dir = std::env::temp_dir().join(format!("fxdesk-test-{}", Uuid::new_v4()));
        StateStore::open(dir).unwrap()
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "desk@fxdesk.example".to_string(),
            name: "Desk Operator".to_string(),
            role: UserRole::Client,
        }
    }

    fn test_session() -> Session {
        Session {
            user: test_user(),
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
        }
    }

    #[test]
    fn test_set_and_read_session() {
        let sessions = SessionStore::load(temp_store());
        assert!(!sessions.is_authenticated());

        sessions.set_session(test_session()).unwrap();
        assert!(sessions.is_authenticated());
        assert_eq!(sessions.access_token().as_deref(), Some("access"));
        assert_eq!(sessions.refresh_token().as_deref(), Some("refresh"));
        assert_eq!(sessions.user().unwrap().name, "Desk Operator");
    }

    #[test]
    fn test_session_survives_restart() {
        let store = temp_store();
        SessionStore::load(store.clone())
            .set_session(test_session())
            .unwrap();

        let reloaded = SessionStore::load(store);
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.access_token().as_deref(), Some("access"));
    }

    #[test]
    fn test_partial_persisted_state_is_rejected() {
        let store = temp_store();
        SessionStore::load(store.clone())
            .set_session(test_session())
            .unwrap();

        // Simulate a torn write: one of the three keys is gone
        store.remove("refresh_token");

        let reloaded = SessionStore::load(store.clone());
        assert!(!reloaded.is_authenticated());
        assert_eq!(reloaded.access_token(), None);
        assert_eq!(reloaded.user(), None);
        // The leftover keys were cleaned up too
        assert!(!store.contains("access_token"));
        assert!(!store.contains("user"));
    }

    #[test]
    fn test_corrupted_user_record_is_rejected() {
        let store = temp_store();
        SessionStore::load(store.clone())
            .set_session(test_session())
            .unwrap();
        store.set("user", &"not a user record").unwrap();

        let reloaded = SessionStore::load(store);
        assert!(!reloaded.is_authenticated());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let sessions = SessionStore::load(temp_store());
        sessions.set_session(test_session()).unwrap();
        sessions.clear();
        sessions.clear();
        assert!(!sessions.is_authenticated());
    }

    #[test]
    fn test_apply_refresh_keeps_refresh_token_unless_rotated() {
        let sessions = SessionStore::load(temp_store());
        sessions.set_session(test_session()).unwrap();

        sessions
            .apply_refresh("access-2".to_string(), None, None)
            .unwrap();
        assert_eq!(sessions.access_token().as_deref(), Some("access-2"));
        assert_eq!(sessions.refresh_token().as_deref(), Some("refresh"));

        sessions
            .apply_refresh("access-3".to_string(), Some("refresh-2".to_string()), None)
            .unwrap();
        assert_eq!(sessions.refresh_token().as_deref(), Some("refresh-2"));
    }
}
