//! User roles.
//!
//! The platform reports a numeric role code at login; the client keeps the
//! role by name everywhere else (storage, session, routing).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role codes sent by `/user/login` in the `rol` field.
pub mod codes {
    pub const ADMIN: &str = "1";
    pub const TEACHER: &str = "2";
    pub const PARENT: &str = "3";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Parent,
    Student,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Parent => "parent",
            Role::Student => "student",
        }
    }

    /// Maps a login role code to a role.
    ///
    /// Unrecognised codes fall back to [`Role::Parent`], the least
    /// privileged role the login endpoint hands out.
    pub fn from_login_code(code: &str) -> Self {
        match code.trim() {
            codes::ADMIN => Role::Admin,
            codes::TEACHER => Role::Teacher,
            codes::PARENT => Role::Parent,
            _ => Role::Parent,
        }
    }

    /// Whether this role reads data about a single student (their own or
    /// their child's).
    pub fn is_student_scoped(&self) -> bool {
        matches!(self, Role::Parent | Role::Student)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "parent" => Ok(Role::Parent),
            "student" => Ok(Role::Student),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_codes() {
        assert_eq!(Role::from_login_code("1"), Role::Admin);
        assert_eq!(Role::from_login_code("2"), Role::Teacher);
        assert_eq!(Role::from_login_code("3"), Role::Parent);
    }

    #[test]
    fn test_unknown_code_falls_back_to_parent() {
        assert_eq!(Role::from_login_code("9"), Role::Parent);
        assert_eq!(Role::from_login_code(""), Role::Parent);
    }

    #[test]
    fn test_name_parsing() {
        for role in [Role::Admin, Role::Teacher, Role::Parent, Role::Student] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert_eq!("janitor".parse::<Role>(), Err(UnknownRole("janitor".into())));
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"teacher\"");
        let role: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, Role::Student);
    }
}
