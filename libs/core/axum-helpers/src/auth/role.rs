use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles.
///
/// A closed enumeration: the role claim inside tokens deserializes into this
/// type, so an unknown or mistyped role can never pass an authorization
/// check by accident.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "User"),
            Role::Admin => write!(f, "Admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Admin.to_string(), "Admin");
        assert_eq!(Role::User.to_string(), "User");
    }

    #[test]
    fn test_role_from_str_case_insensitive() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert!("moderator".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serializes_as_pascal_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"Admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"User\"");
    }

    #[test]
    fn test_role_rejects_unknown_value() {
        assert!(serde_json::from_str::<Role>("\"Superuser\"").is_err());
    }
}
