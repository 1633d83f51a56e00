//! Creation request consumed by the service layer.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::user::{User, UserType, validate_name};

/// Fields a caller provides to create a user.
///
/// The password is intentionally absent: it is set afterwards through
/// [`User::set_password`], never through construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(custom(
        function = validate_name,
        message = "Name must contain 1 to 15 characters."
    ))]
    pub name: String,
    #[validate(email(message = "Email must be formatted."))]
    pub email: String,
    pub user_type: UserType,
}

impl From<CreateUserRequest> for User {
    fn from(request: CreateUserRequest) -> Self {
        User::builder()
            .name(request.name)
            .user_type(request.user_type)
            .email(request.email)
            .build()
    }
}
