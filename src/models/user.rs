use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse authorization tier for a logged-in identity.
///
/// Roles only decide which controls the UI presents; the backend is the
/// actual authorization enforcer and will reject calls the role would have
/// hidden anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Author,
    /// Sentinel for "no session". Never sent by the backend.
    Guest,
    /// Also absorbs role strings this client does not know about.
    #[default]
    #[serde(other)]
    User,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Author => "author",
            Role::User => "user",
            Role::Guest => "guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The identity half of a session, as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// An author as listed by the author-management endpoint: a user plus their
/// public blurb. Author create/edit has no backend endpoint; authors come
/// into existence by promoting an existing user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_wire_strings() {
        assert_eq!(serde_json::from_str::<Role>("\"admin\"").unwrap(), Role::Admin);
        assert_eq!(serde_json::from_str::<Role>("\"author\"").unwrap(), Role::Author);
        assert_eq!(serde_json::from_str::<Role>("\"user\"").unwrap(), Role::User);
        // Unknown tiers degrade to the plain user tier
        assert_eq!(serde_json::from_str::<Role>("\"editor\"").unwrap(), Role::User);
    }

    #[test]
    fn test_user_parses_mongo_id() {
        let json = r#"{"_id":"65a1b2c3","username":"jdoe","email":"jdoe@example.com","role":"author"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "65a1b2c3");
        assert_eq!(user.role, Role::Author);
    }

    #[test]
    fn test_user_role_defaults_to_user() {
        let json = r#"{"_id":"65a1b2c3","username":"jdoe","email":"jdoe@example.com"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::User);
    }
}
