use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

/// Verification links stay valid for this long after signup.
pub const VERIFICATION_TOKEN_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub is_verified: bool,
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,
    #[serde(skip_serializing)]
    pub verification_expires: Option<DateTime<Utc>>,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// A self-registered user: unverified, with a fresh single-use token.
    pub fn signup(email: String, name: String, password_hash: String) -> Self {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(48)
            .map(char::from)
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash,
            name,
            role: ROLE_USER.to_string(),
            is_verified: false,
            verification_token: Some(token),
            verification_expires: Some(Utc::now() + Duration::hours(VERIFICATION_TOKEN_HOURS)),
            profile_picture: None,
            created_at: Utc::now(),
        }
    }

    /// An admin-created account skips the verification flow entirely.
    pub fn admin(email: String, name: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash,
            name,
            role: ROLE_ADMIN.to_string(),
            is_verified: true,
            verification_token: None,
            verification_expires: None,
            profile_picture: None,
            created_at: Utc::now(),
        }
    }
}
