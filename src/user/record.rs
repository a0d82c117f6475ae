use serde::{Deserialize, Serialize};

/// An authenticated user as handed over by the login flow.
///
/// All fields are opaque to this crate. `roles` keeps its order and may
/// contain duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub session_id: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserRecord {
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            session_id: session_id.into(),
            roles: Vec::new(),
        }
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Exact, case-sensitive role membership.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Session state: a user, or nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    user: Option<UserRecord>,
}

impl UserState {
    pub fn new(user: Option<UserRecord>) -> Self {
        Self { user }
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// False whenever nobody is signed in.
    pub fn has_role(&self, role: &str) -> bool {
        self.user.as_ref().is_some_and(|user| user.has_role(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn al() -> UserRecord {
        UserRecord::new("1", "al", "s1").with_roles(["admin", "editor"])
    }

    #[test]
    fn anonymous_state_has_no_roles() {
        let state = UserState::default();
        assert!(!state.is_authenticated());
        assert!(!state.has_role("admin"));
        assert!(!state.has_role(""));
    }

    #[test]
    fn role_match_is_exact() {
        let state = UserState::new(Some(al()));
        assert!(state.is_authenticated());
        assert!(state.has_role("editor"));
        assert!(!state.has_role("Editor"));
        assert!(!state.has_role("edit"));
        assert!(!state.has_role("viewer"));
    }

    #[test]
    fn has_role_matches_roles_contains() {
        let user = al().with_roles(["a", "a", "b"]);
        let state = UserState::new(Some(user.clone()));
        for role in ["a", "b", "c", "", "A"] {
            assert_eq!(state.has_role(role), user.roles.contains(&role.to_string()));
        }
    }

    #[test]
    fn record_uses_camel_case_fields() {
        let user: UserRecord = serde_json::from_str(
            r#"{"id":"1","username":"al","sessionId":"s1","roles":["admin","editor"]}"#,
        )
        .unwrap();
        assert_eq!(user, al());

        let bare: UserRecord =
            serde_json::from_str(r#"{"id":"2","username":"bo","sessionId":"s2"}"#).unwrap();
        assert!(bare.roles.is_empty());
    }
}
