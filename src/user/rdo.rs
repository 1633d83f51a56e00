//! Response shaping for external callers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::User;

/// Projection of a [`User`] exposed on the read path.
///
/// Exactly five fields survive the copy; password, role and timestamps
/// are dropped. `is_pro` is derived from the user role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRdo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar_path: String,
    pub is_pro: bool,
}

impl From<User> for UserRdo {
    fn from(user: User) -> Self {
        Self {
            // a never-persisted user projects the nil UUID.
            id: user.id.unwrap_or_default(),
            name: user.name,
            email: user.email,
            avatar_path: user.avatar_path,
            is_pro: user.user_type.is_pro(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Hasher;
    use crate::user::UserType;

    fn user() -> User {
        let mut user = User::builder()
            .name("Ann")
            .email("a@b.com")
            .user_type(UserType::Pro)
            .avatar_path("me.png")
            .build();
        user.id = Some(Uuid::new_v4());
        user.set_password("secret", &Hasher::new(b"salt")).unwrap();
        user
    }

    #[test]
    fn test_projection_copies_fields() {
        let user = user();
        let rdo = UserRdo::from(user.clone());

        assert_eq!(rdo.id, user.id.unwrap());
        assert_eq!(rdo.name, "Ann");
        assert_eq!(rdo.email, "a@b.com");
        assert_eq!(rdo.avatar_path, "me.png");
        assert!(rdo.is_pro);
    }

    #[test]
    fn test_regular_user_is_not_pro() {
        let user = User::builder().name("Ann").email("a@b.com").build();

        assert!(!UserRdo::from(user).is_pro);
    }

    #[test]
    fn test_exposes_exactly_five_fields() {
        let rdo = UserRdo::from(user());

        let value = serde_json::to_value(&rdo).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["avatarPath", "email", "id", "isPro", "name"]);
    }

    #[test]
    fn test_unsaved_user_projects_nil_id() {
        let user = User::builder().name("Ann").email("a@b.com").build();

        assert_eq!(UserRdo::from(user).id, Uuid::nil());
    }
}
