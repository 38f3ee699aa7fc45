//! User data model.
//!
//! A user exists in two shapes. [`NewUser`] is what a caller submits: a name
//! and an email, nothing else. [`User`] is the same record after the document
//! store has assigned it a [`UserId`]. Neither shape validates its text beyond
//! requiring it to be present.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned identifier.
///
/// Document stores hand back identifiers in more than one shape; adapters
/// normalise them into one of these variants at the boundary. MongoDB
/// object ids arrive as [`UserId::Text`] holding the 24-character hex form.
///
/// Serialises untagged, so JSON carries either a string or a number.
///
/// # Examples
/// ```
/// use users_backend::domain::UserId;
///
/// let id = UserId::text("65f1c0a4e4b0a1b2c3d4e5f6");
/// assert_eq!(serde_json::to_string(&id).unwrap(), "\"65f1c0a4e4b0a1b2c3d4e5f6\"");
/// assert_eq!(serde_json::to_string(&UserId::numeric(7)).unwrap(), "7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    /// Textual identifier, including hex-encoded object ids.
    Text(String),
    /// Integral identifier.
    Numeric(i64),
}

impl UserId {
    /// Build a textual identifier.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Build a numeric identifier.
    #[must_use]
    pub const fn numeric(value: i64) -> Self {
        Self::Numeric(value)
    }

    /// Whether the identifier carries no information.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(value) => value.trim().is_empty(),
            Self::Numeric(_) => false,
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Numeric(value) => write!(f, "{value}"),
        }
    }
}

/// A user record that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    name: String,
    email: String,
}

impl NewUser {
    /// Build a new user from its two text fields.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Name supplied by the caller.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email supplied by the caller.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Attach the identifier assigned by the document store.
    #[must_use]
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

/// A user record as persisted, including its store-assigned identifier.
///
/// Field order matches the JSON handed to the search index and returned to
/// the caller: `id`, `name`, `email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
}

impl User {
    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// User name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// User email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}
