//! User entity - represents a registered account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    Normal,
    Admin,
}

impl UserRole {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Admin => "ADMIN",
        }
    }

    /// Parse the storage representation, falling back to `Normal`
    pub fn from_str_lossy(s: &str) -> Self {
        if s.eq_ignore_ascii_case("ADMIN") {
            Self::Admin
        } else {
            Self::Normal
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with a fresh id
    pub fn new(username: String, email: String, role: UserRole) -> Self {
        Self {
            id: UserId::new(),
            username,
            email,
            role,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
