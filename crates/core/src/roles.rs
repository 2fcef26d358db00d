//! Role names used across the platform.
//!
//! Fable has exactly two roles: administrators manage the catalog and the
//! user base; readers consume it. Roles are stored as plain text on the
//! user row and embedded in JWT claims.

/// Full platform access: catalog mutations, user administration.
pub const ROLE_ADMIN: &str = "admin";

/// Default role for self-registered accounts.
pub const ROLE_READER: &str = "reader";

/// Whether `role` is a recognized role name.
pub fn is_valid_role(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_READER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles_are_valid() {
        assert!(is_valid_role(ROLE_ADMIN));
        assert!(is_valid_role(ROLE_READER));
    }

    #[test]
    fn test_unknown_role_is_invalid() {
        assert!(!is_valid_role("superuser"));
        assert!(!is_valid_role(""));
    }
}
