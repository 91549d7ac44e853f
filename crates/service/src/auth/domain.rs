use serde::{Deserialize, Serialize};

/// Registration input; every field is optional so missing ones can be reported.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Operator-created account (`manage create-staff`).
#[derive(Debug, Clone, Default)]
pub struct StaffInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub superuser: bool,
}

/// Domain user (business view)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    #[serde(skip_serializing)]
    pub is_active: bool,
}

impl From<models::user::Model> for AuthUser {
    fn from(u: models::user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            is_staff: u.is_staff,
            is_superuser: u.is_superuser,
            is_active: u.is_active,
        }
    }
}

/// Domain credentials (hashed)
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: i32,
    pub password_hash: String,
    pub password_algorithm: String,
}

/// Login result
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: String,
    /// Whether the token was issued by this login rather than reused.
    #[serde(skip_serializing)]
    pub created: bool,
}
