//! User records. Passwords are kept only as Argon2id hashes.

use serde::{Deserialize, Serialize};

use crate::auth::crypto::hash_password;
use crate::auth::AuthError;

use super::{non_empty, required, ModelResult, RecordId};

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredUser")]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub password_hash: String,
}

/// A user as found in a data file.
///
/// Older files keep a clear-text `password`; it is hashed on load and
/// never written back.
#[derive(Debug, Deserialize)]
struct StoredUser {
    id: RecordId,

    #[serde(default)]
    username: String,

    #[serde(default)]
    password_hash: String,

    #[serde(default)]
    password: Option<String>,
}

impl TryFrom<StoredUser> for User {
    type Error = AuthError;

    fn try_from(stored: StoredUser) -> Result<Self, Self::Error> {
        let password_hash = match non_empty(stored.password) {
            Some(password) if stored.password_hash.is_empty() => hash_password(&password)?,
            _ => stored.password_hash,
        };

        Ok(User {
            id: stored.id,
            username: stored.username,
            password_hash,
        })
    }
}

impl User {
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(username) = changes.username {
            self.username = username;
        }
        if let Some(password_hash) = changes.password_hash {
            self.password_hash = password_hash;
        }
    }

    pub fn view(&self) -> UserView {
        UserView::from(self)
    }
}

/// A user as returned over the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: RecordId,
    pub username: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Body of a create request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl NewUser {
    /// Presence-check the body and hash the password.
    pub fn validate(self) -> ModelResult<UserDraft> {
        let username = required(self.username, "username")?;
        let password = required(self.password, "password")?;

        Ok(UserDraft {
            username,
            password_hash: hash_password(&password)?,
        })
    }
}

/// A validated user waiting for its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub username: String,
    pub password_hash: String,
}

impl UserDraft {
    pub fn into_user(self, id: RecordId) -> User {
        User {
            id,
            username: self.username,
            password_hash: self.password_hash,
        }
    }
}

/// Body of an update request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl UserPatch {
    /// Drop empty fields and hash a supplied password.
    pub fn prepare(self) -> ModelResult<UserChanges> {
        let password_hash = match non_empty(self.password) {
            Some(password) => Some(hash_password(&password)?),
            None => None,
        };

        Ok(UserChanges {
            username: non_empty(self.username),
            password_hash,
        })
    }
}

/// An update with its password already hashed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub password_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::crypto::verify_password;
    use crate::model::ModelError;

    #[test]
    fn test_create_hashes_password() {
        let draft = NewUser {
            username: Some("alice".to_string()),
            password: Some("hunter22".to_string()),
        }
        .validate()
        .unwrap();

        assert_ne!(draft.password_hash, "hunter22");
        assert!(verify_password("hunter22", &draft.password_hash));

        let user = draft.into_user(7);
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn test_create_requires_password() {
        let err = NewUser {
            username: Some("alice".to_string()),
            password: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ModelError::MissingField("password"));
    }

    #[test]
    fn test_view_omits_password() {
        let user = User {
            id: 1,
            username: "bob".to_string(),
            password_hash: "secret".to_string(),
        };
        let json = serde_json::to_value(user.view()).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "username": "bob"}));
    }

    #[test]
    fn test_clear_text_password_is_hashed_on_load() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 1, "username": "alice", "password": "s3cret"
        }))
        .unwrap();

        assert!(user.password_hash.starts_with("$argon2id$"));
        assert!(verify_password("s3cret", &user.password_hash));

        let written = serde_json::to_value(&user).unwrap();
        assert!(written.get("password").is_none());
        assert_eq!(written["password_hash"], user.password_hash.as_str());
    }

    #[test]
    fn test_stored_hash_wins_over_clear_text() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 1, "username": "alice", "password_hash": "kept", "password": "ignored"
        }))
        .unwrap();
        assert_eq!(user.password_hash, "kept");

        let bare: User = serde_json::from_value(serde_json::json!({"id": 2})).unwrap();
        assert_eq!(bare.username, "");
        assert_eq!(bare.password_hash, "");
    }

    #[test]
    fn test_patch_keeps_existing_on_empty() {
        let mut user = User {
            id: 1,
            username: "bob".to_string(),
            password_hash: "old".to_string(),
        };

        let changes = UserPatch {
            username: Some(String::new()),
            password: None,
        }
        .prepare()
        .unwrap();
        user.apply(changes);

        assert_eq!(user.username, "bob");
        assert_eq!(user.password_hash, "old");
    }

    #[test]
    fn test_patch_rehashes_password() {
        let mut user = User {
            id: 1,
            username: "bob".to_string(),
            password_hash: "old".to_string(),
        };

        let changes = UserPatch {
            username: Some("robert".to_string()),
            password: Some("n3w-pass".to_string()),
        }
        .prepare()
        .unwrap();
        user.apply(changes);

        assert_eq!(user.username, "robert");
        assert!(verify_password("n3w-pass", &user.password_hash));
    }
}
