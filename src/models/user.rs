use serde::{Deserialize, Serialize};

/// Only employees may use the clock client.
pub const EMPLOYEE_ROLE: &str = "employee";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl UserProfile {
    pub fn is_employee(&self) -> bool {
        self.role == EMPLOYEE_ROLE
    }

    /// First name, capitalized; "User" when the profile has no name.
    pub fn first_name(&self) -> String {
        let Some(first) = self.name.split_whitespace().next() else {
            return "User".to_string();
        };
        let mut chars = first.chars();
        match chars.next() {
            Some(c) => c.to_uppercase().chain(chars).collect(),
            None => "User".to_string(),
        }
    }
}

/// Authenticated session, persisted as one JSON blob `{token, ...user}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(flatten)]
    pub user: UserProfile,
}
