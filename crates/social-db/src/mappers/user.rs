//! User entity <-> model mapper

use social_core::entities::{User, UserRole};
use social_core::value_objects::UserId;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::from_uuid(model.id),
            username: model.username,
            email: model.email,
            role: UserRole::from_str_lossy(&model.role),
            created_at: model.created_at,
        }
    }
}
