//! Identity store — registered users, credential checks, token resolution.
//!
//! Tokens are not distinct from usernames: `login` hands the username back as
//! the token, and `authenticate` looks a token up directly as a username key.
//! That trade-off lives entirely behind this store, so real token issuance
//! could replace it without touching the task routes.

use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A registered user. Write-once — never updated or deleted while the
/// process lives.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Errors returned by the identity store.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("user already exists")]
    AlreadyExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid or missing token")]
    UnknownToken,
}

// ─── Store ────────────────────────────────────────────────────────────────────

pub struct IdentityStore {
    users: RwLock<HashMap<String, User>>,
}

impl IdentityStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new user. Fails if the username is already taken.
    /// No token is returned — the caller logs in separately.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), IdentityError> {
        let mut users = self.users.write().await;
        if users.contains_key(username) {
            return Err(IdentityError::AlreadyExists);
        }
        users.insert(
            username.to_string(),
            User {
                username: username.to_string(),
                password: password.to_string(),
            },
        );
        Ok(())
    }

    /// Check credentials and return the caller's token.
    ///
    /// Passwords are compared by exact match — hashing is out of scope for
    /// this service. The token is the username itself.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, IdentityError> {
        let users = self.users.read().await;
        match users.get(username) {
            Some(user) if user.password == password => Ok(user.username.clone()),
            _ => Err(IdentityError::InvalidCredentials),
        }
    }

    /// Resolve a per-request token to the user it names.
    pub async fn authenticate(&self, token: &str) -> Result<User, IdentityError> {
        let users = self.users.read().await;
        users.get(token).cloned().ok_or(IdentityError::UnknownToken)
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
