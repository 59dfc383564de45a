use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Club role. Owners publish content and administer memberships.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum UserRole {
    #[default]
    #[display("member")]
    Member = 0,
    #[display("owner")]
    Owner = 1,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn is_owner(&self) -> bool {
        matches!(self, UserRole::Owner)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(UserRole::Member),
            1 => Some(UserRole::Owner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_id() {
        assert_eq!(UserRole::from_id(0), Some(UserRole::Member));
        assert_eq!(UserRole::from_id(1), Some(UserRole::Owner));
        assert_eq!(UserRole::from_id(7), None);
    }

    #[test]
    fn test_user_role_display_matches_wire_format() {
        assert_eq!(UserRole::Member.to_string(), "member");
        assert_eq!(UserRole::Owner.to_string(), "owner");
        assert_eq!(serde_json::to_string(&UserRole::Owner).unwrap(), "\"owner\"");
    }

    #[test]
    fn test_default_is_member() {
        assert_eq!(UserRole::default(), UserRole::Member);
        assert!(!UserRole::Member.is_owner());
        assert!(UserRole::Owner.is_owner());
    }
}
